//! SQL query digests: stable, literal-free fingerprints of SQL statements.
//!
//! A digest rewrites every literal in a statement to `?`, collapses
//! whitespace, groups long placeholder runs behind `...`, and surfaces the
//! statement's first comment without copying it. Queries that differ only in
//! literal values share a digest, which makes it a cache, rule-matching, and
//! statistics key on the hot path of a proxy:
//!
//! ```
//! use sqldigest::{query_digest, DigestConfig};
//!
//! let cfg = DigestConfig::default();
//! assert_eq!(
//!     query_digest("SELECT * FROM t WHERE id IN (1,2,3,4,5)", &cfg),
//!     "SELECT * FROM t WHERE id IN (?,?,?,...)",
//! );
//! ```
//!
//! The scan is a single forward pass over the raw bytes. Malformed or
//! adversarial input degrades gracefully (unterminated literals end the
//! scan, oversized output is cut short and flagged) and never errors.
//! [`query_digest_into`] writes into a caller-owned buffer and does not
//! allocate at all.

mod classify;
mod comment;
mod config;
mod digest;
mod grouping;
mod sink;

pub use config::DigestConfig;
pub use digest::ScanResult;

use digest::Scanner;
use tracing::trace;

/// Default digest buffer capacity for callers that stack-allocate.
pub const QUERY_DIGEST_BUF: usize = 4096;

/// Digest `query` into `buf`, without allocating.
///
/// At most `buf.len() - 1` bytes are written; a digest that does not fit is
/// cut short and flagged in the result rather than failing. The returned
/// comment borrows from `query`, the digest from `buf`. `query` may contain
/// NUL bytes or invalid UTF-8.
pub fn query_digest_into<'q, 'b>(
    query: &'q [u8],
    buf: &'b mut [u8],
    cfg: &DigestConfig,
) -> ScanResult<'q, 'b> {
    Scanner::new(query, buf, cfg).scan()
}

/// Digest `query` into a fresh `String`.
pub fn query_digest(query: &str, cfg: &DigestConfig) -> String {
    let (digest, _) = query_digest_and_first_comment(query, cfg);
    digest
}

/// Digest `query` and return its first comment alongside, if any.
///
/// The comment borrows from `query`. The backing buffer is sized so the
/// digest is never truncated: collapsing a run can grow the text by at most
/// half (`(1,2` digests to `(?,...`).
pub fn query_digest_and_first_comment<'q>(
    query: &'q str,
    cfg: &DigestConfig,
) -> (String, Option<&'q str>) {
    let mut buf = vec![0u8; digest_capacity(query.len(), cfg)];
    let result = Scanner::new(query.as_bytes(), &mut buf, cfg).scan();
    let digest = String::from_utf8_lossy(result.digest).into_owned();
    let comment = result.first_comment.and_then(|c| std::str::from_utf8(c).ok());
    trace!("digest: {digest}");
    (digest, comment)
}

fn digest_capacity(query_len: usize, cfg: &DigestConfig) -> usize {
    let scanned = query_len.min(cfg.max_query_length);
    scanned + scanned / 2 + 8
}
