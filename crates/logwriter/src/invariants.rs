//! Debug assertion macros for facade-level invariants. Named distinctly
//! from `logqueue`'s and `logwriter-consumer`'s own macros, per the
//! workspace's per-crate invariant-naming convention.

// =============================================================================
// INV-W-01: exactly-once shutdown
// =============================================================================

/// Assert that the destination is never joined more than once from
/// `Writer::stop`.
///
/// Used in: `Writer::stop`, after a successful `Consumer::join`.
macro_rules! debug_assert_closed_once {
    ($already_taken:expr) => {
        debug_assert!(
            !$already_taken,
            "INV-W-01 violated: writer attempted to join its consumer a second time"
        )
    };
}

pub(crate) use debug_assert_closed_once;
