use rand::RngCore;
use std::io::Cursor;
use zpipe::engine::{CompressStream, Engine};
use zpipe::{bulk, stream, Zstd};

fn compress_all(data: &[u8], level: i32) -> Vec<u8> {
    let mut sink = Vec::new();
    stream::compress_stream(&Zstd, Cursor::new(data.to_vec()), &mut sink, level).unwrap();
    sink
}

fn decompress_all(data: &[u8]) -> Vec<u8> {
    let mut sink = Vec::new();
    stream::decompress_stream(&Zstd, Cursor::new(data.to_vec()), &mut sink).unwrap();
    sink
}

#[test]
fn stream_round_trip_repetitive_text() {
    let data = b"All work and no play makes Jack a dull boy. ".repeat(250_000);
    assert!(data.len() > 10_000_000);

    let compressed = compress_all(&data, zstd::DEFAULT_COMPRESSION_LEVEL);
    assert!(compressed.len() < data.len() / 10);
    assert_eq!(decompress_all(&compressed), data);
}

#[test]
fn stream_round_trip_empty_source() {
    let compressed = compress_all(b"", 1);
    assert!(!compressed.is_empty());
    assert_eq!(decompress_all(&compressed), b"");
}

#[test]
fn stream_round_trip_across_levels() {
    let data = b"abcabcabcabc0123456789".repeat(1000);
    for level in [-5, 1, 3, 9, 19] {
        let compressed = compress_all(&data, level);
        assert_eq!(decompress_all(&compressed), data, "level {}", level);
    }
}

#[test]
fn chunk_sizes_do_not_affect_the_result() {
    let mut data = vec![0_u8; 100_000];
    rand::rng().fill_bytes(&mut data[..50_000]);

    let reference = compress_all(&data, 3);
    for (input_chunk, output_chunk) in [(1, 1), (7, 13), (1024, 17), (65536, 65536)] {
        let mut compressed = Vec::new();
        stream::compress_stream_sized(
            &Zstd,
            Cursor::new(data.clone()),
            &mut compressed,
            3,
            input_chunk,
            output_chunk,
        )
        .unwrap();
        assert_eq!(decompress_all(&compressed), data);

        let mut decompressed = Vec::new();
        stream::decompress_stream_sized(
            &Zstd,
            Cursor::new(reference.clone()),
            &mut decompressed,
            output_chunk,
            input_chunk,
        )
        .unwrap();
        assert_eq!(decompressed, data);
    }
}

#[test]
fn input_exactly_one_advised_chunk() {
    let advised = Zstd.compressor(1).unwrap().advised_input_len();
    let data: Vec<u8> = (0..advised).map(|i| (i % 251) as u8).collect();

    let compressed = compress_all(&data, 1);
    assert_eq!(decompress_all(&compressed), data);
}

#[test]
fn multiple_frames_in_one_input_chunk() {
    let first = b"first frame payload".repeat(50);
    let second = b"second frame payload".repeat(50);
    let mut concatenated = bulk::compress(&Zstd, &first, 3).unwrap();
    concatenated.extend(bulk::compress(&Zstd, &second, 3).unwrap());

    // Both frames fit well within a single advised input chunk.
    let mut expected = first.clone();
    expected.extend_from_slice(&second);
    assert_eq!(decompress_all(&concatenated), expected);
}

#[test]
fn one_shot_survives_incompressible_input() {
    let mut data = vec![0_u8; 1 << 20];
    rand::rng().fill_bytes(&mut data);

    let compressed = bulk::compress(&Zstd, &data, 3).unwrap();
    // Random bytes expand; the bound-sized destination must absorb that.
    assert!(compressed.len() >= data.len());
    assert_eq!(bulk::decompress(&Zstd, &compressed, data.len()).unwrap(), data);
}

#[test]
fn one_shot_and_streaming_are_interchangeable() {
    let data = b"interleaved formats should agree".repeat(2000);

    let streamed = compress_all(&data, 3);
    assert_eq!(bulk::decompress(&Zstd, &streamed, data.len()).unwrap(), data);

    let one_shot = bulk::compress(&Zstd, &data, 3).unwrap();
    assert_eq!(decompress_all(&one_shot), data);
}

#[test]
fn truncated_stream_is_rejected() {
    let data = b"payload that spans more than a trivial frame".repeat(4000);
    let compressed = compress_all(&data, 3);

    let truncated = &compressed[..compressed.len() / 2];
    let mut sink = Vec::new();
    let result = stream::decompress_stream(&Zstd, Cursor::new(truncated.to_vec()), &mut sink);
    assert!(result.is_err());
}

#[test]
fn corrupt_stream_is_rejected() {
    let mut sink = Vec::new();
    let garbage = vec![0xAB_u8; 4096];
    assert!(stream::decompress_stream(&Zstd, Cursor::new(garbage), &mut sink).is_err());
}

#[test]
fn invalid_level_fails_before_writing_anything() {
    let mut sink = Vec::new();
    let result = stream::compress_stream(&Zstd, Cursor::new(b"data".to_vec()), &mut sink, 1000);
    if result.is_err() {
        assert!(sink.is_empty());
    }
}
