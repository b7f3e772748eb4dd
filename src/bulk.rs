use crate::engine::Engine;
use std::io;

/// Compresses `data` in a single bounded call.
///
/// The destination is sized with the engine's bound estimate, not the input
/// length, so incompressible input that expands still succeeds. Failure is an
/// explicit `Err`, never an empty buffer.
pub fn compress<E: Engine>(engine: &E, data: &[u8], level: i32) -> io::Result<Vec<u8>> {
    let mut dest = vec![0; engine.compress_bound(data.len())];
    let len = engine.compress(data, &mut dest, level)?;
    dest.truncate(len);
    Ok(dest)
}

/// Decompresses `data` in a single bounded call into a destination of
/// `expected_len` bytes, recovered out-of-band by the caller.
///
/// A wrong `expected_len` is a caller error and surfaces as the engine's
/// failure; there is no retry or resizing.
pub fn decompress<E: Engine>(engine: &E, data: &[u8], expected_len: usize) -> io::Result<Vec<u8>> {
    let mut dest = vec![0; expected_len];
    let len = engine.decompress(data, &mut dest)?;
    dest.truncate(len);
    Ok(dest)
}
