//! Bounded-memory adapter between byte-oriented I/O streams and a
//! block-oriented compression engine.
//!
//! The engine (Zstandard by default, see [`engine::zstd`]) is consumed through
//! the trait seam in [`engine`]; the [`stream`] pumps drive a streaming context
//! from a `Read` source to a `Write` sink using a pair of fixed-capacity
//! [`buffer`] views allocated once per operation, and [`bulk`] offers the
//! one-shot bounded transforms.

pub mod buffer;
pub mod bulk;
pub mod engine;
pub mod stream;

pub use engine::zstd::Zstd;
