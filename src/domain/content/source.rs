//! Input sources for clipboard content

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

/// A byte stream that can be inspected before it is consumed.
///
/// Bytes returned by [`PeekableStream::peek`] stay buffered and are yielded
/// again by `Read`, so peeking never loses data.
pub struct PeekableStream {
    buffer: Vec<u8>,
    position: usize,
    inner: Box<dyn Read + Send>,
    exhausted: bool,
}

impl PeekableStream {
    pub fn new(inner: impl Read + Send + 'static) -> Self {
        Self {
            buffer: Vec::new(),
            position: 0,
            inner: Box::new(inner),
            exhausted: false,
        }
    }

    /// Return up to `limit` unread bytes without consuming them.
    /// Fewer bytes are returned only when the stream ends first.
    pub fn peek(&mut self, limit: usize) -> io::Result<&[u8]> {
        let buffered = self.buffer.len() - self.position;
        if buffered < limit && !self.exhausted {
            let wanted = (limit - buffered) as u64;
            // Grows with the input, not with `limit`
            let read = (&mut self.inner).take(wanted).read_to_end(&mut self.buffer)?;
            if (read as u64) < wanted {
                self.exhausted = true;
            }
        }
        let end = self.buffer.len().min(self.position.saturating_add(limit));
        Ok(&self.buffer[self.position..end])
    }
}

impl Read for PeekableStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.position < self.buffer.len() {
            let available = &self.buffer[self.position..];
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            self.position += n;
            if self.position == self.buffer.len() {
                self.buffer.clear();
                self.position = 0;
            }
            return Ok(n);
        }
        if self.exhausted {
            return Ok(0);
        }
        self.inner.read(out)
    }
}

impl fmt::Debug for PeekableStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeekableStream")
            .field("buffered", &(self.buffer.len() - self.position))
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

/// Where clipboard content comes from
#[derive(Debug)]
pub enum SourceInput {
    /// A file on disk
    Path(PathBuf),
    /// A readable byte stream such as stdin
    Stream(PeekableStream),
    /// An in-memory string
    Text(String),
}

impl SourceInput {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        Self::Stream(PeekableStream::new(reader))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out at most `chunk` bytes per call
    struct Trickle {
        data: Vec<u8>,
        offset: usize,
        chunk: usize,
    }

    impl Read for Trickle {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(out.len()).min(self.data.len() - self.offset);
            out[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
            self.offset += n;
            Ok(n)
        }
    }

    #[test]
    fn peek_does_not_consume() {
        let mut stream = PeekableStream::new(Cursor::new(b"hello world".to_vec()));
        assert_eq!(stream.peek(5).unwrap(), b"hello");
        assert_eq!(stream.peek(5).unwrap(), b"hello");

        let mut all = Vec::new();
        stream.read_to_end(&mut all).unwrap();
        assert_eq!(all, b"hello world");
    }

    #[test]
    fn peek_fills_across_short_reads() {
        let data: Vec<u8> = (0..100u8).collect();
        let mut stream = PeekableStream::new(Trickle {
            data: data.clone(),
            offset: 0,
            chunk: 7,
        });
        assert_eq!(stream.peek(50).unwrap(), &data[..50]);

        let mut all = Vec::new();
        stream.read_to_end(&mut all).unwrap();
        assert_eq!(all, data);
    }

    #[test]
    fn peek_past_end_returns_what_exists() {
        let mut stream = PeekableStream::new(Cursor::new(b"abc".to_vec()));
        assert_eq!(stream.peek(10).unwrap(), b"abc");
        let mut all = String::new();
        stream.read_to_string(&mut all).unwrap();
        assert_eq!(all, "abc");
    }

    #[test]
    fn huge_peek_limit_allocates_for_the_input_only() {
        let mut stream = PeekableStream::new(Cursor::new(b"hello".to_vec()));
        assert_eq!(stream.peek(usize::MAX).unwrap(), b"hello");
        assert!(stream.buffer.capacity() < 64 * 1024);

        let mut all = Vec::new();
        stream.read_to_end(&mut all).unwrap();
        assert_eq!(all, b"hello");
    }

    #[test]
    fn peek_after_partial_read() {
        let mut stream = PeekableStream::new(Cursor::new(b"abcdef".to_vec()));
        stream.peek(4).unwrap();
        let mut two = [0u8; 2];
        stream.read_exact(&mut two).unwrap();
        assert_eq!(&two, b"ab");
        assert_eq!(stream.peek(3).unwrap(), b"cde");
    }
}
