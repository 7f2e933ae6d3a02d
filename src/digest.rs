use tracing::debug;

use crate::classify::{classify, is_hex_digit, is_ident_char, is_space, ByteClass};
use crate::comment::CommentTracker;
use crate::config::DigestConfig;
use crate::grouping::{CommaAction, LiteralKind, RunTracker, ValueAction};
use crate::sink::DigestBuf;

/// Outcome of digesting one query.
#[derive(Debug)]
pub struct ScanResult<'q, 'b> {
    /// The digest: the written prefix of the caller's buffer.
    pub digest: &'b [u8],
    /// First comment of the query, delimiters included, borrowed from the
    /// input.
    pub first_comment: Option<&'q [u8]>,
    /// The digest did not fit in the buffer and was cut short.
    pub truncated: bool,
}

/// Lexical state of the scan cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexState {
    Normal,
    /// Inside a quoted string literal; `quote` is the closing byte.
    Str { quote: u8 },
    /// Inside a backtick-quoted identifier.
    Backtick,
    LineComment,
    BlockComment,
    /// Inside a numeric literal already rendered as `?`.
    Number { seen_dot: bool, seen_exp: bool },
    /// Inside a `0x` hex literal already rendered as `?`.
    Hex,
}

/// Kind of the last emitted token, for pending-space resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastToken {
    /// Nothing emitted yet.
    None,
    Word,
    Placeholder,
    Operator,
    Comma,
    Open,
    Close,
    /// The `...` of a collapsed run.
    Ellipsis,
}

/// Single forward pass over one query: classifies bytes, rewrites literals
/// to `?`, canonicalizes whitespace, and feeds the run and comment trackers.
///
/// Never backtracks and looks ahead at most two bytes. States that end on a
/// byte they do not own switch back to `Normal` without consuming it, and
/// the byte is re-dispatched.
pub(crate) struct Scanner<'q, 'b> {
    input: &'q [u8],
    pos: usize,
    state: LexState,
    out: DigestBuf<'b>,
    lowercase: bool,
    replace_null: bool,
    no_digits: bool,
    /// One collapsed space waiting to be emitted or dropped.
    pending_space: bool,
    last: LastToken,
    /// The previously consumed input byte was identifier-forming; blocks a
    /// literal from starting mid-word.
    prev_ident: bool,
    /// Inside a digit run already folded to `?` (`no_digits`).
    digit_fold: bool,
    runs: RunTracker,
    comments: CommentTracker,
}

impl<'q, 'b> Scanner<'q, 'b> {
    pub(crate) fn new(query: &'q [u8], buf: &'b mut [u8], cfg: &DigestConfig) -> Self {
        let capped = query.len().min(cfg.max_query_length);
        Self {
            input: &query[..capped],
            pos: 0,
            state: LexState::Normal,
            out: DigestBuf::new(buf),
            lowercase: cfg.lowercase,
            replace_null: cfg.replace_null,
            no_digits: cfg.no_digits,
            pending_space: false,
            last: LastToken::None,
            prev_ident: false,
            digit_fold: false,
            runs: RunTracker::new(cfg.grouping_limit),
            comments: CommentTracker::new(),
        }
    }

    pub(crate) fn scan(mut self) -> ScanResult<'q, 'b> {
        while self.pos < self.input.len() {
            let b = self.input[self.pos];
            match self.state {
                LexState::Normal => self.step_normal(b),
                LexState::Str { quote } => self.step_string(b, quote),
                LexState::Backtick => self.step_backtick(b),
                LexState::LineComment => self.step_line_comment(b),
                LexState::BlockComment => self.step_block_comment(b),
                LexState::Number { seen_dot, seen_exp } => self.step_number(b, seen_dot, seen_exp),
                LexState::Hex => self.step_hex(b),
            }
        }
        self.finish()
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.pos + ahead).copied()
    }

    fn consume(&mut self, n: usize) {
        self.prev_ident = is_ident_char(self.input[self.pos + n - 1]);
        self.pos += n;
    }

    fn step_normal(&mut self, b: u8) {
        let was_folding = self.digit_fold;
        self.digit_fold = false;

        match classify(b) {
            ByteClass::Space => {
                self.pending_space = true;
                self.consume(1);
            }
            ByteClass::Nul if self.replace_null => {
                self.emit_literal(LiteralKind::Nul);
                self.consume(1);
            }
            ByteClass::Digit if !self.prev_ident => {
                // `0x` jumps straight to the hex state; anything else is a
                // plain numeric literal.
                if b == b'0'
                    && matches!(self.peek(1), Some(b'x') | Some(b'X'))
                    && self.peek(2).is_some_and(is_hex_digit)
                {
                    self.emit_literal(LiteralKind::Number);
                    self.state = LexState::Hex;
                    self.consume(2);
                } else {
                    self.emit_literal(LiteralKind::Number);
                    self.state = LexState::Number {
                        seen_dot: false,
                        seen_exp: false,
                    };
                    self.consume(1);
                }
            }
            ByteClass::Digit => {
                // Digit inside an identifier.
                if self.no_digits {
                    if !was_folding {
                        self.emit_plain(LastToken::Word, b"?");
                    }
                    self.digit_fold = true;
                } else {
                    self.emit_plain(LastToken::Word, &[b]);
                }
                self.consume(1);
            }
            ByteClass::Dot
                if !self.prev_ident && self.peek(1).is_some_and(|d| d.is_ascii_digit()) =>
            {
                // Leading-dot float like `.5`.
                self.emit_literal(LiteralKind::Number);
                self.state = LexState::Number {
                    seen_dot: true,
                    seen_exp: false,
                };
                self.consume(1);
            }
            ByteClass::SingleQuote | ByteClass::DoubleQuote => {
                self.emit_literal(LiteralKind::Text);
                self.state = LexState::Str { quote: b };
                self.consume(1);
            }
            ByteClass::Backtick => {
                self.emit_plain(LastToken::Word, b"`");
                self.state = LexState::Backtick;
                self.consume(1);
            }
            ByteClass::Comma => {
                self.emit_comma();
                self.consume(1);
            }
            ByteClass::Open => {
                self.emit_plain(LastToken::Open, &[b]);
                self.consume(1);
            }
            ByteClass::Close => {
                self.emit_plain(LastToken::Close, &[b]);
                self.consume(1);
            }
            ByteClass::Hash => {
                self.comments.open(self.pos, false);
                self.state = LexState::LineComment;
                self.consume(1);
            }
            ByteClass::Operator => self.step_operator(b),
            ByteClass::Question => {
                // A placeholder already in the input passes through but never
                // counts toward a run, so digests stay stable when re-digested.
                self.emit_plain(LastToken::Placeholder, b"?");
                self.consume(1);
            }
            _ => {
                let out = if self.lowercase { b.to_ascii_lowercase() } else { b };
                self.emit_plain(LastToken::Word, &[out]);
                self.consume(1);
            }
        }
    }

    fn step_operator(&mut self, b: u8) {
        // `--` followed by whitespace (or end of input) opens a line comment.
        if b == b'-' && self.peek(1) == Some(b'-') {
            let after = self.peek(2);
            if after.is_none() || after.is_some_and(is_space) {
                self.comments.open(self.pos, false);
                self.state = LexState::LineComment;
                self.consume(2);
                return;
            }
        }
        // `/*` opens a block comment; `/*!` is executable and never captured.
        if b == b'/' && self.peek(1) == Some(b'*') {
            let executable = self.peek(2) == Some(b'!');
            self.comments.open(self.pos, executable);
            self.state = LexState::BlockComment;
            self.consume(2);
            return;
        }
        // A sign glued to a number is part of the literal unless the last
        // token was a value: `(1,-2)` digests to `(?,?)` but `1 -1` to `?-?`.
        if matches!(b, b'+' | b'-') && self.sign_starts_literal() {
            self.consume(1);
            return;
        }
        self.emit_plain(LastToken::Operator, &[b]);
        self.consume(1);
    }

    fn sign_starts_literal(&self) -> bool {
        let number_next = match self.peek(1) {
            Some(d) if d.is_ascii_digit() => true,
            Some(b'.') => self.peek(2).is_some_and(|d| d.is_ascii_digit()),
            _ => false,
        };
        number_next
            && matches!(
                self.last,
                LastToken::None
                    | LastToken::Comma
                    | LastToken::Open
                    | LastToken::Operator
                    | LastToken::Ellipsis
            )
    }

    fn step_string(&mut self, b: u8, quote: u8) {
        if b == b'\\' && self.pos + 1 < self.input.len() {
            // Backslash escape: the next byte is string content.
            self.consume(2);
        } else if b == quote {
            if self.peek(1) == Some(quote) {
                // Doubled quote stays inside the string.
                self.consume(2);
            } else {
                self.state = LexState::Normal;
                self.consume(1);
            }
        } else {
            self.consume(1);
        }
    }

    fn step_backtick(&mut self, b: u8) {
        let was_folding = self.digit_fold;
        self.digit_fold = false;

        if b == b'`' {
            if self.peek(1) == Some(b'`') {
                self.out.push_slice(b"``");
                self.consume(2);
            } else {
                self.out.push(b'`');
                self.state = LexState::Normal;
                self.consume(1);
            }
        } else if b.is_ascii_digit() && self.no_digits {
            if !was_folding {
                self.out.push(b'?');
            }
            self.digit_fold = true;
            self.consume(1);
        } else {
            let out = if self.lowercase { b.to_ascii_lowercase() } else { b };
            self.out.push(out);
            self.consume(1);
        }
    }

    fn step_line_comment(&mut self, b: u8) {
        if matches!(b, b'\r' | b'\n') {
            // The terminator is whitespace, not comment content.
            self.comments.close(self.pos);
            self.state = LexState::Normal;
        } else {
            self.consume(1);
        }
    }

    fn step_block_comment(&mut self, b: u8) {
        if b == b'*' && self.peek(1) == Some(b'/') {
            self.comments.close(self.pos + 2);
            self.state = LexState::Normal;
            self.consume(2);
        } else {
            self.consume(1);
        }
    }

    fn step_number(&mut self, b: u8, seen_dot: bool, seen_exp: bool) {
        if b.is_ascii_digit() {
            self.consume(1);
        } else if b == b'.' && !seen_dot && !seen_exp {
            self.state = LexState::Number {
                seen_dot: true,
                seen_exp,
            };
            self.consume(1);
        } else if matches!(b, b'e' | b'E') && !seen_exp {
            // The exponent marker only counts when digits actually follow,
            // optionally behind a sign.
            match self.peek(1) {
                Some(d) if d.is_ascii_digit() => {
                    self.state = LexState::Number {
                        seen_dot,
                        seen_exp: true,
                    };
                    self.consume(1);
                }
                Some(b'+') | Some(b'-') if self.peek(2).is_some_and(|d| d.is_ascii_digit()) => {
                    self.state = LexState::Number {
                        seen_dot,
                        seen_exp: true,
                    };
                    self.consume(2);
                }
                _ => self.state = LexState::Normal,
            }
        } else {
            // Not part of the literal: re-dispatch in normal state.
            self.state = LexState::Normal;
        }
    }

    fn step_hex(&mut self, b: u8) {
        if is_hex_digit(b) {
            self.consume(1);
        } else {
            self.state = LexState::Normal;
        }
    }

    /// Emit a pass-through token; any such token ends a placeholder run.
    fn emit_plain(&mut self, kind: LastToken, bytes: &[u8]) {
        self.runs.interrupt();
        self.flush_space(kind);
        self.out.push_slice(bytes);
        self.last = kind;
    }

    /// Emit the placeholder for a literal, subject to run grouping.
    fn emit_literal(&mut self, kind: LiteralKind) {
        match self.runs.value(kind) {
            ValueAction::Emit => {
                self.flush_space(LastToken::Placeholder);
                self.out.push(b'?');
                self.last = LastToken::Placeholder;
            }
            ValueAction::Collapse => {
                // The comma before this value is already out, so `...` alone
                // stands in for this and every following run value.
                self.flush_space(LastToken::Ellipsis);
                self.out.push_slice(b"...");
                self.last = LastToken::Ellipsis;
            }
            ValueAction::Suppress => {}
        }
    }

    fn emit_comma(&mut self) {
        match self.runs.comma() {
            CommaAction::Emit => {
                self.flush_space(LastToken::Comma);
                self.out.push(b',');
                self.last = LastToken::Comma;
            }
            CommaAction::Suppress => {}
        }
    }

    /// Resolve the pending collapsed space against the incoming token.
    ///
    /// Commas swallow space on both sides, operators bind tight to
    /// placeholders, and a closing bracket attaches straight to a run `...`.
    /// Every other adjacency keeps a single space.
    fn flush_space(&mut self, incoming: LastToken) {
        if !self.pending_space {
            return;
        }
        self.pending_space = false;
        if self.last == LastToken::None {
            return;
        }
        let drop = incoming == LastToken::Comma
            || self.last == LastToken::Comma
            || (self.last == LastToken::Placeholder && incoming == LastToken::Operator)
            || (self.last == LastToken::Operator && incoming == LastToken::Placeholder)
            || (self.last == LastToken::Ellipsis && incoming == LastToken::Close);
        if !drop {
            self.out.push(b' ');
        }
    }

    fn finish(mut self) -> ScanResult<'q, 'b> {
        if matches!(self.state, LexState::LineComment | LexState::BlockComment) {
            self.comments.close(self.input.len());
        }
        let input = self.input;
        let first_comment = self
            .comments
            .span()
            .map(|(start, stop)| &input[start..stop]);
        let (digest, truncated) = self.out.finish();
        if truncated {
            debug!("digest truncated to {} bytes", digest.len());
        }
        ScanResult {
            digest,
            first_comment,
            truncated,
        }
    }
}
