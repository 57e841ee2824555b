//! Async building blocks for the synchronization engine: task spawning,
//! generation tracking and the debounce gate.

mod class;
pub mod debounce;
mod spawn;
mod token;

pub use class::TaskClass;
pub use debounce::{DebounceGate, SettleWait};
pub use spawn::spawn;
pub use token::{Generation, GenerationTracker};
