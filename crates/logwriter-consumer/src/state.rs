use std::sync::atomic::{AtomicU8, Ordering};

/// Consumer lifecycle. Transitions are monotonic; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Initializing,
    Running,
    Draining,
    Closed,
}

impl ConsumerState {
    fn to_u8(self) -> u8 {
        match self {
            ConsumerState::Initializing => 0,
            ConsumerState::Running => 1,
            ConsumerState::Draining => 2,
            ConsumerState::Closed => 3,
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => ConsumerState::Initializing,
            1 => ConsumerState::Running,
            2 => ConsumerState::Draining,
            _ => ConsumerState::Closed,
        }
    }
}

/// Shared, atomically-readable view of the consumer's lifecycle state.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new(initial: ConsumerState) -> Self {
        Self(AtomicU8::new(initial.to_u8()))
    }

    pub fn get(&self) -> ConsumerState {
        ConsumerState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves the state forward. Debug-asserts the transition is monotonic
    /// (see `INV-C-01` in `invariants.rs`).
    pub fn set(&self, next: ConsumerState) {
        #[cfg(debug_assertions)]
        let previous = self.get();
        self.0.store(next.to_u8(), Ordering::Release);
        #[cfg(debug_assertions)]
        crate::invariants::debug_assert_monotonic_state!(previous, next);
    }
}
