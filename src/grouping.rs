/// Literal class of a placeholder, for run-grouping purposes.
///
/// Runs never mix classes: `IN (1,2,3,4)` collapses at the default limit
/// while `VALUES ('val',2,3,'foo')` keeps all four placeholders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LiteralKind {
    /// Numeric literals, decimal or hex.
    Number,
    /// Single- or double-quoted strings.
    Text,
    /// NUL input bytes, when configured as literals.
    Nul,
}

/// What the scanner should do with the placeholder it is about to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ValueAction {
    /// Emit `?` as usual.
    Emit,
    /// The run just passed the limit: emit `...` in place of this value.
    Collapse,
    /// Inside a collapsed run: emit nothing.
    Suppress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CommaAction {
    Emit,
    Suppress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Not inside a run.
    Idle,
    /// Saw a value; a comma would extend the run.
    AfterValue { kind: LiteralKind, count: u32 },
    /// Saw value-comma; a same-class value extends the run.
    AfterComma { kind: LiteralKind, count: u32 },
    /// Past the limit; run tokens are swallowed until something else shows up.
    Collapsed { expect_value: bool },
}

/// Counts placeholders separated only by commas and decides when the run
/// collapses into `...`.
///
/// Whitespace and comments never reach the tracker; every other non-run
/// token resets it through `interrupt`.
pub(crate) struct RunTracker {
    phase: Phase,
    limit: u32,
}

impl RunTracker {
    pub(crate) fn new(limit: u32) -> Self {
        debug_assert!(limit >= 1, "grouping limit must be at least 1");
        Self {
            phase: Phase::Idle,
            limit: limit.max(1),
        }
    }

    /// A literal placeholder of class `kind` is about to be emitted.
    pub(crate) fn value(&mut self, kind: LiteralKind) -> ValueAction {
        match self.phase {
            Phase::Idle | Phase::AfterValue { .. } => {
                self.phase = Phase::AfterValue { kind, count: 1 };
                ValueAction::Emit
            }
            Phase::AfterComma { kind: run_kind, count } if run_kind == kind => {
                if count >= self.limit {
                    self.phase = Phase::Collapsed { expect_value: false };
                    ValueAction::Collapse
                } else {
                    self.phase = Phase::AfterValue { kind, count: count + 1 };
                    ValueAction::Emit
                }
            }
            // Class switch restarts the run.
            Phase::AfterComma { .. } => {
                self.phase = Phase::AfterValue { kind, count: 1 };
                ValueAction::Emit
            }
            Phase::Collapsed { expect_value: true } => {
                self.phase = Phase::Collapsed { expect_value: false };
                ValueAction::Suppress
            }
            // Two values with no comma between them break the run pattern.
            Phase::Collapsed { expect_value: false } => {
                self.phase = Phase::AfterValue { kind, count: 1 };
                ValueAction::Emit
            }
        }
    }

    /// A comma is about to be emitted.
    pub(crate) fn comma(&mut self) -> CommaAction {
        match self.phase {
            Phase::AfterValue { kind, count } => {
                self.phase = Phase::AfterComma { kind, count };
                CommaAction::Emit
            }
            Phase::Collapsed { expect_value: false } => {
                self.phase = Phase::Collapsed { expect_value: true };
                CommaAction::Suppress
            }
            _ => {
                self.phase = Phase::Idle;
                CommaAction::Emit
            }
        }
    }

    /// Any token that is not a placeholder or a comma ends the run.
    pub(crate) fn interrupt(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use LiteralKind::{Number, Text};

    #[test]
    fn test_run_collapses_past_limit() {
        let mut t = RunTracker::new(3);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Collapse);
        assert_eq!(t.comma(), CommaAction::Suppress);
        assert_eq!(t.value(Number), ValueAction::Suppress);
        assert_eq!(t.comma(), CommaAction::Suppress);
    }

    #[test]
    fn test_limit_one_collapses_on_second_value() {
        let mut t = RunTracker::new(1);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Collapse);
    }

    #[test]
    fn test_class_switch_restarts_run() {
        let mut t = RunTracker::new(3);
        assert_eq!(t.value(Text), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Text), ValueAction::Emit);
    }

    #[test]
    fn test_interrupt_resets_a_collapsed_run() {
        let mut t = RunTracker::new(1);
        t.value(Number);
        t.comma();
        assert_eq!(t.value(Number), ValueAction::Collapse);
        t.interrupt();
        assert_eq!(t.value(Number), ValueAction::Emit);
    }

    #[test]
    fn test_value_without_comma_breaks_collapsed_run() {
        let mut t = RunTracker::new(1);
        t.value(Number);
        t.comma();
        assert_eq!(t.value(Number), ValueAction::Collapse);
        // value right after the collapsed value, no comma between
        assert_eq!(t.value(Number), ValueAction::Emit);
    }

    #[test]
    fn test_double_comma_resets() {
        let mut t = RunTracker::new(3);
        t.value(Number);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        // run restarted: counting begins again
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Emit);
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        // release builds clamp; debug builds assert first
        if cfg!(debug_assertions) {
            return;
        }
        let mut t = RunTracker::new(0);
        assert_eq!(t.value(Number), ValueAction::Emit);
        assert_eq!(t.comma(), CommaAction::Emit);
        assert_eq!(t.value(Number), ValueAction::Collapse);
    }
}
