//! Explicit state record for one editing session's analysis cycles.
//!
//! [`SyncMachine`] performs no I/O. The controller feeds it edits, debounce
//! resolutions and responses, and acts on the decisions it returns.

use selko_primitives::EditOrigin;
use selko_worker::{Generation, GenerationTracker};

/// Current phase of the analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
	/// No cycle pending.
	Idle,
	/// Waiting for typing to pause.
	Debouncing,
	/// Analysis request in flight for the current generation.
	Requesting,
	/// Applying the current generation's annotations.
	Reconciling,
	/// The current cycle was abandoned. Behaves like [`SyncPhase::Idle`].
	Aborted,
}

impl SyncPhase {
	/// Returns true if nothing is pending.
	pub const fn is_quiescent(self) -> bool {
		matches!(self, Self::Idle | Self::Aborted)
	}
}

/// Outcome counters for a session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncStats {
	/// User edits that started a cycle.
	pub edits: u64,
	/// Programmatic edits that were ignored.
	pub ignored: u64,
	/// Requests sent to the analysis service.
	pub requests: u64,
	/// Cycles whose annotations and metrics were applied.
	pub applied: u64,
	/// Responses discarded because a newer edit superseded them.
	pub stale: u64,
	/// Debounce waits that were cancelled.
	pub cancelled: u64,
	/// Cycles ended by a failed request or a rejected reconciliation.
	pub failed: u64,
}

/// What to do after a debounce wait finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleDecision {
	/// Send the current text for analysis.
	Request,
	/// Do nothing: the wait lost to a newer edit or to teardown.
	Cancelled,
}

/// What to do with a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseDecision {
	/// Reconcile the annotations and publish the metrics.
	Apply,
	/// Drop silently: a newer edit owns the cycle.
	Stale,
	/// Keep the previous state: the request failed.
	Failed,
}

/// How applying a current response ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
	Applied,
	/// The document moved on between request and apply.
	Stale,
	Failed,
}

#[derive(Debug)]
pub struct SyncMachine {
	phase: SyncPhase,
	generations: GenerationTracker,
	stats: SyncStats,
}

impl Default for SyncMachine {
	fn default() -> Self {
		Self::new()
	}
}

impl SyncMachine {
	pub fn new() -> Self {
		Self {
			phase: SyncPhase::Idle,
			generations: GenerationTracker::new(),
			stats: SyncStats::default(),
		}
	}

	pub fn phase(&self) -> SyncPhase {
		self.phase
	}

	pub fn generation(&self) -> Generation {
		self.generations.current()
	}

	pub fn stats(&self) -> SyncStats {
		self.stats
	}

	/// Records a document change.
	///
	/// User edits start a new cycle from any phase and return its generation.
	/// Programmatic edits return `None` and change nothing else.
	pub fn on_edit(&mut self, origin: EditOrigin) -> Option<Generation> {
		if !origin.is_user() {
			self.stats.ignored += 1;
			return None;
		}
		self.stats.edits += 1;
		self.phase = SyncPhase::Debouncing;
		Some(self.generations.next_generation())
	}

	/// Records the end of the debounce wait armed for `generation`.
	pub fn on_settled(&mut self, generation: Generation, resolved: bool) -> SettleDecision {
		let current = self.generations.is_current(generation);
		if resolved && current && self.phase == SyncPhase::Debouncing {
			self.phase = SyncPhase::Requesting;
			self.stats.requests += 1;
			return SettleDecision::Request;
		}

		self.stats.cancelled += 1;
		if current && self.phase == SyncPhase::Debouncing {
			self.phase = SyncPhase::Aborted;
		}
		SettleDecision::Cancelled
	}

	/// Records a completed request for `generation`.
	pub fn on_response(&mut self, generation: Generation, succeeded: bool) -> ResponseDecision {
		if !self.generations.is_current(generation) || self.phase != SyncPhase::Requesting {
			self.stats.stale += 1;
			return ResponseDecision::Stale;
		}
		if succeeded {
			self.phase = SyncPhase::Reconciling;
			ResponseDecision::Apply
		} else {
			self.stats.failed += 1;
			self.phase = SyncPhase::Idle;
			ResponseDecision::Failed
		}
	}

	/// Records the end of reconciliation for the current cycle.
	pub fn on_reconciled(&mut self, outcome: ReconcileOutcome) {
		match outcome {
			ReconcileOutcome::Applied => self.stats.applied += 1,
			ReconcileOutcome::Stale => self.stats.stale += 1,
			ReconcileOutcome::Failed => self.stats.failed += 1,
		}
		self.phase = SyncPhase::Idle;
	}

	/// Abandons the current cycle at session teardown.
	///
	/// `wait_cancelled` reports whether a live debounce wait was cancelled.
	pub fn on_teardown(&mut self, wait_cancelled: bool) {
		if wait_cancelled {
			self.stats.cancelled += 1;
		}
		if !self.phase.is_quiescent() {
			self.phase = SyncPhase::Aborted;
		}
	}
}
