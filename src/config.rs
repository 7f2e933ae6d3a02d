/// Read-only digest knobs, snapshotted per call.
///
/// Defaults match the proxy's shipped configuration: scan up to 65000 bytes,
/// preserve case, pass NUL bytes through, keep identifier digits, collapse
/// placeholder runs past three values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestConfig {
    /// Bytes of the query inspected; anything beyond is never read.
    pub max_query_length: usize,
    /// Fold unquoted text to ASCII lowercase.
    pub lowercase: bool,
    /// Digest NUL input bytes as literals instead of passing them through.
    pub replace_null: bool,
    /// Fold digit runs inside identifiers to `?`.
    pub no_digits: bool,
    /// Placeholders beyond this many in a comma run collapse to `...`.
    /// Minimum 1.
    pub grouping_limit: u32,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_query_length: 65000,
            lowercase: false,
            replace_null: false,
            no_digits: false,
            grouping_limit: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DigestConfig::default();
        assert_eq!(cfg.max_query_length, 65000);
        assert!(!cfg.lowercase);
        assert!(!cfg.replace_null);
        assert!(!cfg.no_digits);
        assert_eq!(cfg.grouping_limit, 3);
    }
}
