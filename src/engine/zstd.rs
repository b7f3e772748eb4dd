use crate::buffer::{InputView, OutputView};
use crate::engine::{CompressStream, DecompressStream, Engine};
use std::io;
use std::io::ErrorKind;
use zstd::zstd_safe;
use zstd::zstd_safe::{CCtx, DCtx, InBuffer, OutBuffer};

/// Zstandard engine backed by the `zstd_safe` streaming ABI.
///
/// Stateless by itself; every streaming operation gets its own context and the
/// advised chunk sizes are queried from the library, never assumed.
#[derive(Default, Clone, Copy)]
pub struct Zstd;

fn map_error_code(code: zstd_safe::ErrorCode) -> io::Error {
    io::Error::new(ErrorKind::Other, zstd_safe::get_error_name(code).to_string())
}

impl Engine for Zstd {
    type Compressor = ZstdCompressor;
    type Decompressor = ZstdDecompressor;

    fn compress_bound(&self, uncompressed_len: usize) -> usize {
        zstd_safe::compress_bound(uncompressed_len)
    }

    fn compress(&self, src: &[u8], dest: &mut [u8], level: i32) -> io::Result<usize> {
        zstd_safe::compress(dest, src, level).map_err(map_error_code)
    }

    fn decompress(&self, src: &[u8], dest: &mut [u8]) -> io::Result<usize> {
        zstd_safe::decompress(dest, src).map_err(map_error_code)
    }

    fn compressor(&self, level: i32) -> io::Result<ZstdCompressor> {
        let mut ctx = CCtx::try_create()
            .ok_or_else(|| io::Error::new(ErrorKind::Other, "Failed to allocate zstd CCtx"))?;
        ctx.init(level).map_err(map_error_code)?;
        Ok(ZstdCompressor { ctx })
    }

    fn decompressor(&self) -> io::Result<ZstdDecompressor> {
        let mut ctx = DCtx::try_create()
            .ok_or_else(|| io::Error::new(ErrorKind::Other, "Failed to allocate zstd DCtx"))?;
        ctx.init().map_err(map_error_code)?;
        Ok(ZstdDecompressor { ctx })
    }
}

pub struct ZstdCompressor {
    ctx: CCtx<'static>,
}

impl CompressStream for ZstdCompressor {
    fn advised_input_len(&self) -> usize {
        CCtx::in_size()
    }

    fn advised_output_len(&self) -> usize {
        CCtx::out_size()
    }

    fn step(&mut self, output: &mut OutputView, input: &mut InputView) -> io::Result<()> {
        let (status, consumed, produced) = {
            let mut src = InBuffer::around(input.remaining());
            let mut dest = OutBuffer::around(output.unfilled());
            let status = self.ctx.compress_stream(&mut dest, &mut src);
            (status, src.pos, dest.pos())
        };
        status.map_err(map_error_code)?;
        input.advance(consumed);
        output.add_produced(produced);
        Ok(())
    }

    fn finish(&mut self, output: &mut OutputView) -> io::Result<usize> {
        let (status, produced) = {
            let mut dest = OutBuffer::around(output.unfilled());
            let status = self.ctx.end_stream(&mut dest);
            (status, dest.pos())
        };
        let remaining = status.map_err(map_error_code)?;
        output.add_produced(produced);
        Ok(remaining)
    }
}

pub struct ZstdDecompressor {
    ctx: DCtx<'static>,
}

impl DecompressStream for ZstdDecompressor {
    fn advised_input_len(&self) -> usize {
        DCtx::in_size()
    }

    fn advised_output_len(&self) -> usize {
        DCtx::out_size()
    }

    fn step(&mut self, output: &mut OutputView, input: &mut InputView) -> io::Result<usize> {
        let (status, consumed, produced) = {
            let mut src = InBuffer::around(input.remaining());
            let mut dest = OutBuffer::around(output.unfilled());
            let status = self.ctx.decompress_stream(&mut dest, &mut src);
            (status, src.pos, dest.pos())
        };
        let hint = status.map_err(map_error_code)?;
        input.advance(consumed);
        output.add_produced(produced);
        Ok(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advised_sizes_are_nonzero() {
        let engine = Zstd;
        let compressor = engine.compressor(1).unwrap();
        assert!(compressor.advised_input_len() > 0);
        assert!(compressor.advised_output_len() > 0);
        let decompressor = engine.decompressor().unwrap();
        assert!(decompressor.advised_input_len() > 0);
        assert!(decompressor.advised_output_len() > 0);
    }

    #[test]
    fn bound_covers_incompressible_input() {
        let engine = Zstd;
        assert!(engine.compress_bound(0) > 0);
        assert!(engine.compress_bound(1 << 20) > 1 << 20);
    }
}
