use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use human_bytes::human_bytes;
use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Error};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;
use zpipe::{stream, Zstd};

const EXTENSION: &str = "zst";

#[derive(Parser)]
struct Config {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress a file
    Compress(CompressionCfg),
    /// Decompress a file
    Decompress(DecompressionCfg),
}

#[derive(Args)]
struct CompressionCfg {
    /// Input file path
    #[arg()]
    path: PathBuf,

    /// Compression level
    #[arg(long, short = 'c', default_value_t = zstd::DEFAULT_COMPRESSION_LEVEL, allow_hyphen_values = true)]
    compression: i32,

    /// Size of a stream chunk in bytes. Defaults to the size advised by the codec.
    #[arg(long, short = 'b')]
    chunk_size: Option<usize>,
}

#[derive(Args)]
struct DecompressionCfg {
    /// Input file path, expected to end with the `zst` extension
    #[arg()]
    path: PathBuf,

    /// Size of a stream chunk in bytes. Defaults to the size advised by the codec.
    #[arg(long, short = 'b')]
    chunk_size: Option<usize>,
}

fn main() {
    env_logger::init();
    let cmd = Config::parse();
    if let Err(e) = run(cmd) {
        eprintln!("error: {}", e);
        exit(1);
    }
}

fn run(cmd: Config) -> anyhow::Result<()> {
    match cmd.command {
        Command::Compress(cfg) => run_compress_cmd(cfg),
        Command::Decompress(cfg) => run_decompress_cmd(cfg),
    }
}

fn run_compress_cmd(cfg: CompressionCfg) -> anyhow::Result<()> {
    let input = open_input(&cfg.path)?;
    let input_len = input.metadata()?.len();
    let output_path = compressed_path(&cfg.path);
    let mut output = BufWriter::new(create_output(&output_path)?);

    let start = Instant::now();
    let engine = Zstd;
    let written = match cfg.chunk_size {
        None => {
            stream::compress_stream(&engine, BufReader::new(input), &mut output, cfg.compression)?
        }
        Some(chunk) => stream::compress_stream_sized(
            &engine,
            BufReader::new(input),
            &mut output,
            cfg.compression,
            chunk,
            chunk,
        )?,
    };
    report(input_len, written, start);
    Ok(())
}

fn run_decompress_cmd(cfg: DecompressionCfg) -> anyhow::Result<()> {
    let output_path = decompressed_path(&cfg.path)?;
    let input = open_input(&cfg.path)?;
    let input_len = input.metadata()?.len();
    let mut output = BufWriter::new(create_output(&output_path)?);

    let start = Instant::now();
    let engine = Zstd;
    let written = match cfg.chunk_size {
        None => stream::decompress_stream(&engine, BufReader::new(input), &mut output)?,
        Some(chunk) => stream::decompress_stream_sized(
            &engine,
            BufReader::new(input),
            &mut output,
            chunk,
            chunk,
        )?,
    };
    report(input_len, written, start);
    Ok(())
}

fn compressed_path(input_path: &Path) -> PathBuf {
    let new_extension = match input_path.extension() {
        None => EXTENSION.to_owned(),
        Some(ext) => format!("{}.{}", ext.to_string_lossy(), EXTENSION),
    };
    input_path.with_extension(new_extension)
}

fn decompressed_path(input_path: &Path) -> anyhow::Result<PathBuf> {
    if input_path.extension() != Some(OsStr::new(EXTENSION)) {
        bail!(
            "Expected a file with the .{} extension: {}",
            EXTENSION,
            input_path.display()
        );
    }
    Ok(input_path.with_extension(""))
}

fn open_input(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        Error::new(
            e.kind(),
            format!("Could not open file {}: {}", path.display(), e),
        )
    })
}

fn create_output(path: &Path) -> io::Result<File> {
    File::create(path).map_err(|e| {
        Error::new(
            e.kind(),
            format!("Could not create file {}: {}", path.display(), e),
        )
    })
}

fn report(input_len: u64, output_len: u64, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    eprintln!(
        "{} => {} ({:.1} %), {:.1} MB/s",
        human_bytes(input_len as f64),
        human_bytes(output_len as f64),
        output_len as f64 / input_len.max(1) as f64 * 100.0,
        input_len as f64 / elapsed / 1_000_000.0
    );
}
