/// Tracks the first comment of a scan as a span over the input.
///
/// The span runs from the opener through the closer: `*/` inclusive for
/// block comments, up to but not including the terminating newline for line
/// comments, end of input when unterminated. Executable `/*!` comments are
/// never captured.
#[derive(Debug, Default)]
pub(crate) struct CommentTracker {
    /// Resolved first-comment span, start inclusive, end exclusive.
    span: Option<(usize, usize)>,
    /// Start of the comment currently being scanned, when it is a candidate.
    candidate: Option<usize>,
}

impl CommentTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A comment opens at `start`. Executable comments and anything after
    /// the first capture are ignored.
    pub(crate) fn open(&mut self, start: usize, executable: bool) {
        if self.span.is_none() && !executable {
            self.candidate = Some(start);
        }
    }

    /// The open comment ends at `end` (exclusive).
    pub(crate) fn close(&mut self, end: usize) {
        if let Some(start) = self.candidate.take() {
            self.span = Some((start, end));
        }
    }

    pub(crate) fn span(&self) -> Option<(usize, usize)> {
        self.span
    }
}
