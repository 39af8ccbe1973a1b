//! Runtime module boundary re-exporting the shared teardown primitives.

pub use teardown_core::contract;
pub use teardown_core::logging;
pub use teardown_core::sequencer;
