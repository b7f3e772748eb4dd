use crate::buffer::{InputView, OutputView};
use crate::engine::{CompressStream, DecompressStream, Engine};
use log::debug;
use std::io;
use std::io::{Error, ErrorKind, Read, Write};

/// Compresses everything from `input` and writes the compressed stream to
/// `output`, using the engine's advised chunk sizes.
///
/// Memory usage is bounded by the two chunk buffers regardless of input size.
/// Returns the number of compressed bytes written. On failure the context is
/// released and bytes already written to `output` stand; callers needing
/// atomicity must write to a temporary sink and swap on success.
pub fn compress_stream<E: Engine, R: Read, W: Write>(
    engine: &E,
    input: R,
    output: W,
    level: i32,
) -> io::Result<u64> {
    let stream = engine.compressor(level)?;
    let input_len = stream.advised_input_len();
    let output_len = stream.advised_output_len();
    compress_with(stream, input, output, input_len, output_len)
}

/// Same as [`compress_stream`] but with caller-chosen chunk capacities.
/// Any capacities >= 1 produce an equivalent compressed stream.
pub fn compress_stream_sized<E: Engine, R: Read, W: Write>(
    engine: &E,
    input: R,
    output: W,
    level: i32,
    input_chunk: usize,
    output_chunk: usize,
) -> io::Result<u64> {
    let stream = engine.compressor(level)?;
    compress_with(stream, input, output, input_chunk, output_chunk)
}

fn compress_with<C: CompressStream, R: Read, W: Write>(
    mut stream: C,
    mut input: R,
    mut output: W,
    input_chunk: usize,
    output_chunk: usize,
) -> io::Result<u64> {
    assert!(input_chunk > 0 && output_chunk > 0);
    debug!(
        "compressing with chunk sizes: input = {}, output = {}",
        input_chunk, output_chunk
    );

    let mut chunk = InputView::with_capacity(input_chunk);
    let mut produced = OutputView::with_capacity(output_chunk);
    let mut written = 0_u64;

    while chunk.fill_from(&mut input)? > 0 {
        // A single chunk may need several steps when the output view
        // fills before the whole chunk is consumed.
        while !chunk.is_exhausted() {
            produced.reset();
            stream.step(&mut produced, &mut chunk)?;
            written += drain(&produced, &mut output)?;
        }
    }

    loop {
        produced.reset();
        let remaining = stream.finish(&mut produced)?;
        written += drain(&produced, &mut output)?;
        if remaining == 0 {
            break;
        }
    }

    output.flush()?;
    Ok(written)
}

/// Decompresses everything from `input` and writes the decoded bytes to
/// `output`, using the engine's advised chunk sizes.
///
/// Drains every frame contained in the input, including multiple frames per
/// chunk and frames whose decoded size exceeds one output chunk. Returns the
/// number of decompressed bytes written. A stream that ends in the middle of a
/// frame is an error, not a silent truncation.
pub fn decompress_stream<E: Engine, R: Read, W: Write>(
    engine: &E,
    input: R,
    output: W,
) -> io::Result<u64> {
    let stream = engine.decompressor()?;
    let input_len = stream.advised_input_len();
    let output_len = stream.advised_output_len();
    decompress_with(stream, input, output, input_len, output_len)
}

/// Same as [`decompress_stream`] but with caller-chosen chunk capacities,
/// independent of whatever sizes were used for compression.
pub fn decompress_stream_sized<E: Engine, R: Read, W: Write>(
    engine: &E,
    input: R,
    output: W,
    input_chunk: usize,
    output_chunk: usize,
) -> io::Result<u64> {
    let stream = engine.decompressor()?;
    decompress_with(stream, input, output, input_chunk, output_chunk)
}

fn decompress_with<D: DecompressStream, R: Read, W: Write>(
    mut stream: D,
    mut input: R,
    mut output: W,
    input_chunk: usize,
    output_chunk: usize,
) -> io::Result<u64> {
    assert!(input_chunk > 0 && output_chunk > 0);
    debug!(
        "decompressing with chunk sizes: input = {}, output = {}",
        input_chunk, output_chunk
    );

    let mut chunk = InputView::with_capacity(input_chunk);
    let mut produced = OutputView::with_capacity(output_chunk);
    let mut written = 0_u64;
    let mut hint = 0;

    while chunk.fill_from(&mut input)? > 0 {
        loop {
            produced.reset();
            hint = stream.step(&mut produced, &mut chunk)?;
            written += drain(&produced, &mut output)?;
            // A full output view may leave decoded bytes buffered in the
            // context even after the chunk is consumed; step again with the
            // exhausted view to flush them. Hint 0 means fully flushed.
            if chunk.is_exhausted() && (hint == 0 || !produced.is_full()) {
                break;
            }
        }
    }

    if hint != 0 {
        return Err(Error::new(
            ErrorKind::UnexpectedEof,
            "Compressed stream is incomplete",
        ));
    }

    output.flush()?;
    Ok(written)
}

fn drain<W: Write>(produced: &OutputView, output: &mut W) -> io::Result<u64> {
    let bytes = produced.filled();
    if !bytes.is_empty() {
        output.write_all(bytes)?;
    }
    Ok(bytes.len() as u64)
}
