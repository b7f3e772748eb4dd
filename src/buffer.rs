use std::io;
use std::io::Read;

/// Fixed-capacity input region with a consumed cursor.
///
/// The pump refills it with [`InputView::fill_from`] once per chunk and the
/// engine advances the cursor by however much it consumed per step. The backing
/// region is allocated once and reused for every chunk of an operation.
pub struct InputView {
    buf: Box<[u8]>,
    len: usize,
    pos: usize,
}

impl InputView {
    pub fn with_capacity(capacity: usize) -> InputView {
        InputView {
            buf: vec![0; capacity].into_boxed_slice(),
            len: 0,
            pos: 0,
        }
    }

    /// Resets the cursors and fills the region with a single read call.
    /// Returns the number of bytes read; 0 means the source is exhausted.
    pub fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        self.pos = 0;
        self.len = reader.read(&mut self.buf)?;
        Ok(self.len)
    }

    /// The unconsumed suffix of the current chunk.
    pub fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..self.len]
    }

    pub fn advance(&mut self, count: usize) {
        debug_assert!(self.pos + count <= self.len);
        self.pos += count;
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos == self.len
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Fixed-capacity output region with a produced cursor.
///
/// The engine writes into [`OutputView::unfilled`] and records how much it
/// produced; the pump drains [`OutputView::filled`] to the sink and resets the
/// view before the next step.
pub struct OutputView {
    buf: Box<[u8]>,
    pos: usize,
}

impl OutputView {
    pub fn with_capacity(capacity: usize) -> OutputView {
        OutputView {
            buf: vec![0; capacity].into_boxed_slice(),
            pos: 0,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    pub fn unfilled(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..]
    }

    pub fn add_produced(&mut self, count: usize) {
        debug_assert!(self.pos + count <= self.buf.len());
        self.pos += count;
    }

    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn produced(&self) -> usize {
        self.pos
    }

    pub fn is_full(&self) -> bool {
        self.pos == self.buf.len()
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}
