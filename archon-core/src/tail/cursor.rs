/// Trailing bytes of consumed content kept to recognize a rewritten file.
pub const FINGERPRINT_LEN: usize = 64;

/// Line reassembly state for one tailed file.
///
/// Bytes past the last line feed are held in `pending` and are not counted
/// as consumed until their terminator arrives. `consumed` always sits on a
/// line boundary (offset 0 or just past a line feed).
#[derive(Debug, Default)]
pub struct TailCursor {
    consumed: u64,
    pending: Vec<u8>,
    /// The last `FINGERPRINT_LEN` bytes before `consumed`.
    recent: Vec<u8>,
}

impl TailCursor {
    /// `offset` must be a line boundary.
    pub fn starting_at(offset: u64) -> Self {
        Self::resuming_after(offset, &[])
    }

    /// Start at `offset`, where `history` is the file content just before it.
    pub fn resuming_after(offset: u64, history: &[u8]) -> Self {
        let keep = history.len().min(FINGERPRINT_LEN).min(offset as usize);
        Self {
            consumed: offset,
            pending: Vec::new(),
            recent: history[history.len() - keep..].to_vec(),
        }
    }

    /// Offset just past the last complete line handed out.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Offset the next read should start from.
    pub fn read_position(&self) -> u64 {
        self.consumed + self.pending.len() as u64
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// A file shorter than what we already read has been truncated.
    pub fn is_truncated_by(&self, file_len: u64) -> bool {
        file_len < self.read_position()
    }

    /// Bytes the file must still hold, and the offset they start at, for the
    /// next read to continue the same content. A mismatch means the file was
    /// rewritten in place.
    pub fn expected_window(&self) -> (u64, Vec<u8>) {
        let start = self.consumed - self.recent.len() as u64;
        let mut bytes = Vec::with_capacity(self.recent.len() + self.pending.len());
        bytes.extend_from_slice(&self.recent);
        bytes.extend_from_slice(&self.pending);
        (start, bytes)
    }

    pub fn reset(&mut self) {
        self.consumed = 0;
        self.pending.clear();
        self.recent.clear();
    }

    /// Append freshly read bytes and return every line they complete.
    ///
    /// Lines are trimmed; blank lines advance the cursor but are not returned.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);

        let mut lines = Vec::new();
        let mut start = 0;

        while let Some(pos) = self.pending[start..].iter().position(|b| *b == b'\n') {
            let end = start + pos;
            let text = String::from_utf8_lossy(&self.pending[start..end]);
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }
            start = end + 1;
        }

        if start > 0 {
            self.recent.extend_from_slice(&self.pending[..start]);
            if self.recent.len() > FINGERPRINT_LEN {
                let excess = self.recent.len() - FINGERPRINT_LEN;
                self.recent.drain(..excess);
            }
            self.pending.drain(..start);
            self.consumed += start as u64;
        }

        lines
    }
}
