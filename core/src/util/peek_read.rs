use std::io::{self, Read};

/// Wrapper around a `Read` object. Reads a bounded prefix of the input into
/// an internal buffer so it can be inspected, and then replays the prefix
/// followed by the rest of the input. Nothing read for inspection is lost,
/// even if the inner reader cannot be rewound.
pub struct PeekRead<R> {
    inner: R,
    prefix: Vec<u8>,

    /// The position in `prefix` up to which bytes have been replayed
    pos: usize,
}

impl<R: Read> PeekRead<R> {
    /// Wraps `inner` and fills the prefix buffer with up to `limit` bytes.
    /// The prefix is shorter than `limit` only if the input ends earlier.
    pub fn new(mut inner: R, limit: usize) -> io::Result<Self> {
        let mut prefix = Vec::with_capacity(limit);
        (&mut inner).take(limit as u64).read_to_end(&mut prefix)?;
        Ok(Self {
            inner,
            prefix,
            pos: 0,
        })
    }
}

impl<R> PeekRead<R> {
    /// Returns the bytes read for inspection
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }
}

impl<R: Read> Read for PeekRead<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.prefix.len() {
            let remaining = &self.prefix[self.pos..];
            let len = remaining.len().min(buf.len());
            buf[..len].copy_from_slice(&remaining[..len]);
            self.pos += len;
            return Ok(len);
        }
        self.inner.read(buf)
    }
}
