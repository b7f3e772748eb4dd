use crate::buffer::{InputView, OutputView};
use std::io;

pub mod zstd;

/// Compression engine capability surface consumed by the pumps.
///
/// Streaming contexts are owned by exactly one in-flight operation and release
/// their native state on drop, so every pump exit path frees them.
pub trait Engine {
    type Compressor: CompressStream;
    type Decompressor: DecompressStream;

    /// Worst-case compressed length for an input of `uncompressed_len` bytes.
    fn compress_bound(&self, uncompressed_len: usize) -> usize;

    fn compress(&self, src: &[u8], dest: &mut [u8], level: i32) -> io::Result<usize>;

    fn decompress(&self, src: &[u8], dest: &mut [u8]) -> io::Result<usize>;

    fn compressor(&self, level: i32) -> io::Result<Self::Compressor>;

    fn decompressor(&self) -> io::Result<Self::Decompressor>;
}

pub trait CompressStream {
    /// Recommended input chunk capacity for this context.
    fn advised_input_len(&self) -> usize;

    /// Recommended output chunk capacity for this context.
    fn advised_output_len(&self) -> usize;

    /// Consumes a prefix of `input` and produces a prefix of `output`,
    /// advancing both cursors.
    fn step(&mut self, output: &mut OutputView, input: &mut InputView) -> io::Result<()>;

    /// Emits end-of-stream trailer bytes into `output`. Returns the number of
    /// bytes still buffered inside the context; callers must repeat until it
    /// reports 0.
    fn finish(&mut self, output: &mut OutputView) -> io::Result<usize>;
}

pub trait DecompressStream {
    fn advised_input_len(&self) -> usize;

    fn advised_output_len(&self) -> usize;

    /// Consumes a prefix of `input` and produces a prefix of `output`,
    /// advancing both cursors. Returns the engine's progress hint: 0 exactly
    /// when a frame boundary has been reached and fully flushed.
    fn step(&mut self, output: &mut OutputView, input: &mut InputView) -> io::Result<usize>;
}
