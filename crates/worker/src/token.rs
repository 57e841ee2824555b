use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies the analysis cycle started by one user edit.
///
/// Generations are compared for equality only; ordering carries no meaning
/// to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
	/// The value before any generation has been issued.
	pub const INITIAL: Self = Self(0);

	pub const fn get(self) -> u64 {
		self.0
	}
}

impl std::fmt::Display for Generation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Monotonic generation clock used to recognise stale async results.
///
/// Rather than cancelling in-flight work, each result carries the generation
/// it was started under and is applied only if that generation is still the
/// latest one issued.
#[derive(Debug, Default, Clone)]
pub struct GenerationTracker {
	latest: Arc<AtomicU64>,
}

impl GenerationTracker {
	/// Creates a tracker whose first issued generation is 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues a fresh generation, superseding every earlier one.
	pub fn next_generation(&self) -> Generation {
		Generation(self.latest.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
	}

	/// Returns the latest issued generation.
	pub fn current(&self) -> Generation {
		Generation(self.latest.load(Ordering::Acquire))
	}

	/// Returns true if `generation` is the latest one issued.
	pub fn is_current(&self, generation: Generation) -> bool {
		self.current() == generation
	}
}
