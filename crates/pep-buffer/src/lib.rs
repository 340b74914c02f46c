//! A growable in-memory byte container with independent read and write
//! cursors.
//!
//! Mirrors a classic C buffer-with-two-cursors design: `wpos` tracks the
//! next append position, `rpos` tracks the next consume position, and the
//! invariant `0 <= rpos <= wpos <= data.len()` holds at every public API
//! boundary. Growth never shrinks and targets amortized O(1) append.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::io;

/// Default capacity used when a caller asks for less than 2 bytes.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// A growable byte buffer with independent read (`rpos`) and write (`wpos`)
/// cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    wpos: usize,
    rpos: usize,
}

impl ByteBuffer {
    /// Create an empty buffer with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty buffer with at least `capacity` bytes reserved.
    /// Requests below 2 bytes are rounded up to [`DEFAULT_INITIAL_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity < 2 {
            DEFAULT_INITIAL_CAPACITY
        } else {
            capacity
        };
        Self {
            data: Vec::with_capacity(capacity),
            wpos: 0,
            rpos: 0,
        }
    }

    /// Build a buffer from existing bytes; `wpos` starts at the end, `rpos`
    /// at the start, so the whole content is immediately readable.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let wpos = data.len();
        Self {
            data,
            wpos,
            rpos: 0,
        }
    }

    fn ensure_capacity(&mut self, additional: usize) {
        let available = self.data.len() - self.wpos;
        if additional > available {
            let minimum = self.data.len() + (additional - available);
            let grown = self.data.len() + self.data.len() / 2 + 1;
            let new_size = minimum.max(grown);
            self.data.resize(new_size, 0);
        }
    }

    /// Append a single byte.
    pub fn push_byte(&mut self, byte: u8) {
        self.ensure_capacity(1);
        self.data[self.wpos] = byte;
        self.wpos += 1;
    }

    /// Append a byte slice.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.data[self.wpos..self.wpos + bytes.len()].copy_from_slice(bytes);
        self.wpos += bytes.len();
    }

    /// Consume a single byte, or `None` on exhaustion.
    pub fn pop_byte(&mut self) -> Option<u8> {
        if self.rpos >= self.wpos {
            return None;
        }
        let b = self.data[self.rpos];
        self.rpos += 1;
        Some(b)
    }

    /// Consume up to `n` bytes; returns fewer than `n` on under-run.
    pub fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        let available = self.wpos - self.rpos;
        let take = n.min(available);
        let out = self.data[self.rpos..self.rpos + take].to_vec();
        self.rpos += take;
        out
    }

    /// Push a single byte back onto the front of the unread region, shifting
    /// existing data right by one if `rpos` is already at 0.
    pub fn push_back_byte(&mut self, byte: u8) {
        if self.rpos == 0 {
            self.ensure_capacity(1);
            self.data.copy_within(0..self.wpos, 1);
            self.wpos += 1;
            self.rpos += 1;
        }
        self.rpos -= 1;
        self.data[self.rpos] = byte;
    }

    /// Number of unread bytes (`wpos - rpos`).
    pub fn remaining(&self) -> usize {
        self.wpos - self.rpos
    }

    /// True when there is nothing left to read.
    pub fn is_eof(&self) -> bool {
        self.wpos <= self.rpos
    }

    /// Reset the read cursor to the start, leaving written data intact.
    pub fn rewind(&mut self) {
        self.rpos = 0;
    }

    /// Reset both cursors to the start; the buffer is logically empty.
    pub fn reset(&mut self) {
        self.rpos = 0;
        self.wpos = 0;
    }

    /// Borrow the unread region.
    pub fn unread_slice(&self) -> &[u8] {
        &self.data[self.rpos..self.wpos]
    }

    /// Borrow the whole written region, ignoring the read cursor.
    pub fn written_slice(&self) -> &[u8] {
        &self.data[..self.wpos]
    }

    /// Consume the buffer, returning the whole written region.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.wpos);
        self.data
    }
}

impl io::Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.push_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for ByteBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bytes = self.read_bytes(buf.len());
        let n = bytes.len();
        buf[..n].copy_from_slice(&bytes);
        Ok(n)
    }
}
