/// Bounds-checked digest output over a caller-owned buffer.
///
/// Writes stop at `capacity - 1`: the final byte stays reserved so a digest
/// that fills the buffer leaves room for a C-style terminator on the
/// caller's side. Once full the sink stays full and remembers that it
/// dropped bytes.
pub(crate) struct DigestBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
    limit: usize,
    truncated: bool,
}

impl<'a> DigestBuf<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        let limit = buf.len().saturating_sub(1);
        Self {
            buf,
            len: 0,
            limit,
            truncated: false,
        }
    }

    pub(crate) fn push(&mut self, b: u8) {
        if self.len < self.limit {
            self.buf[self.len] = b;
            self.len += 1;
        } else {
            self.truncated = true;
        }
    }

    pub(crate) fn push_slice(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Consume the sink, returning the written prefix and whether any byte
    /// was dropped.
    pub(crate) fn finish(self) -> (&'a [u8], bool) {
        let written: &'a [u8] = self.buf;
        (&written[..self.len], self.truncated)
    }
}
