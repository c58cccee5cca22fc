//! Debug assertion macros for consumer invariants.

// =============================================================================
// INV-C-01: Monotonic state
// =============================================================================

/// Assert that the consumer state machine never moves backward
/// (`Initializing -> Running -> Draining -> Closed`).
///
/// Used in: `StateCell::set`.
macro_rules! debug_assert_monotonic_state {
    ($previous:expr, $next:expr) => {
        debug_assert!(
            crate::invariants::rank(&$next) >= crate::invariants::rank(&$previous),
            "INV-C-01 violated: consumer state moved backward from {:?} to {:?}",
            $previous,
            $next
        )
    };
}

#[cfg(debug_assertions)]
pub(crate) fn rank(state: &crate::state::ConsumerState) -> u8 {
    use crate::state::ConsumerState::{Closed, Draining, Initializing, Running};
    match state {
        Initializing => 0,
        Running => 1,
        Draining => 2,
        Closed => 3,
    }
}

// =============================================================================
// INV-C-02: Batch never flushed empty
// =============================================================================

/// Assert a batch handed to the destination is never empty — every mode
/// loop must check `!batch.is_empty()` before calling `flush_batch`.
///
/// Used in: `Consumer::flush_batch`.
macro_rules! debug_assert_batch_non_empty {
    ($batch:expr) => {
        debug_assert!(!$batch.is_empty(), "INV-C-02 violated: flushed an empty batch")
    };
}

pub(crate) use debug_assert_batch_non_empty;
pub(crate) use debug_assert_monotonic_state;
