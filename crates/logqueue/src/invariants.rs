//! Debug assertion macros for queue invariants.
//!
//! Active only under `#[cfg(debug_assertions)]`, so release builds pay
//! nothing for these checks.

// =============================================================================
// INV-Q-01: Bounded length under non-BLOCK policies
// =============================================================================

/// Assert that the queue never exceeds capacity except under the BLOCK
/// policy, which intentionally appends past capacity to keep the producer
/// path non-blocking.
///
/// Used in: `Queue::put` after a non-BLOCK append.
macro_rules! debug_assert_capacity_respected {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $capacity == 0 || $len <= $capacity,
            "INV-Q-01 violated: queue length {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// INV-Q-02: Non-negative pending count
// =============================================================================

/// Assert `pending = enqueued - written - dropped` never goes negative.
///
/// Used in: test helpers and the consumer's post-flush accounting.
macro_rules! debug_assert_pending_non_negative {
    ($pending:expr) => {
        debug_assert!($pending >= 0, "INV-Q-02 violated: pending count {} < 0", $pending)
    };
}

// =============================================================================
// INV-Q-03: Stop is terminal
// =============================================================================

/// Assert that once `stopped` is observed true, it never reverts to false.
///
/// Used in: `Queue::get`/`Queue::drain` after observing the sentinel.
macro_rules! debug_assert_stop_terminal {
    ($was_stopped:expr, $is_stopped:expr) => {
        debug_assert!(
            !$was_stopped || $is_stopped,
            "INV-Q-03 violated: stopped queue transitioned back to running"
        )
    };
}

pub(crate) use debug_assert_capacity_respected;
pub(crate) use debug_assert_pending_non_negative;
pub(crate) use debug_assert_stop_terminal;
