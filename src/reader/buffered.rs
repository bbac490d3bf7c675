//! Buffered source
//!
//! Reads from any source implementing Read into a window that the tokenizer
//! scans in place. Consumed bytes are compacted away on the next fill, and
//! the window only grows while a single token does not fit.

use std::io::{self, Read};

/// Buffer size for reading chunks
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

pub struct BufferedReader<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    pos: usize,
    end: usize,
    eof: bool,
}

impl<R: Read> BufferedReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        BufferedReader {
            reader,
            buffer: vec![0u8; capacity.max(1)],
            pos: 0,
            end: 0,
            eof: false,
        }
    }

    /// Read more data into the window
    ///
    /// Returns `Ok(false)` once the source is exhausted.
    pub fn fill_buffer(&mut self) -> io::Result<bool> {
        if self.eof {
            return Ok(false);
        }

        // Compact: move remaining data to start
        if self.pos > 0 {
            let remaining = self.end - self.pos;
            if remaining > 0 {
                self.buffer.copy_within(self.pos..self.end, 0);
            }
            self.end = remaining;
            self.pos = 0;
        }

        // Window is full of one unfinished token: grow it
        if self.end == self.buffer.len() {
            let grow_by = self.buffer.len();
            self.buffer.resize(self.buffer.len() + grow_by, 0);
        }

        loop {
            match self.reader.read(&mut self.buffer[self.end..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(false);
                }
                Ok(read) => {
                    self.end += read;
                    return Ok(true);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }

    /// Get current buffered data as a slice
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[self.pos..self.end]
    }

    /// True once the source has reported end of input (buffered bytes may remain)
    pub fn reached_eof(&self) -> bool {
        self.eof
    }

    /// Consume n bytes from the buffer
    pub fn consume(&mut self, n: usize) {
        self.pos += n.min(self.end - self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_buffered_reader() {
        let data = b"<urlset></urlset>";
        let mut reader = BufferedReader::new(Cursor::new(data.to_vec()));

        assert!(reader.fill_buffer().unwrap());
        assert_eq!(reader.buffered(), data);
        assert!(!reader.fill_buffer().unwrap());
        assert!(reader.reached_eof());
    }

    #[test]
    fn test_consume_and_compact() {
        let mut reader = BufferedReader::with_capacity(Cursor::new(b"abcdefgh".to_vec()), 4);

        reader.fill_buffer().unwrap();
        assert_eq!(reader.buffered(), b"abcd");
        reader.consume(3);
        assert_eq!(reader.buffered(), b"d");

        reader.fill_buffer().unwrap();
        assert_eq!(reader.buffered(), b"defg");
    }

    #[test]
    fn test_grows_when_full() {
        let mut reader = BufferedReader::with_capacity(Cursor::new(b"abcdefgh".to_vec()), 2);

        reader.fill_buffer().unwrap();
        reader.fill_buffer().unwrap();
        reader.fill_buffer().unwrap();
        assert_eq!(reader.buffered(), b"abcdefgh");
    }
}
