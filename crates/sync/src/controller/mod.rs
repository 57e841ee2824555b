//! The synchronization actor.
//!
//! [`SyncController`] owns the [`SyncMachine`], the debounce gate and the
//! metrics sink. Edit events, debounce resolutions and analysis responses all
//! arrive on the controller task, so every transition happens in one place.
//! Debounce waits and requests run as spawned tasks that report back over an
//! internal completion channel.
//!
//! # Cycle
//!
//! - User edit: cancel the pending wait, take a new generation, arm a new wait.
//! - Wait resolved: snapshot the text and send it for analysis.
//! - Response for the current generation: reconcile, apply, publish metrics.
//! - Anything else is stale or cancelled and only counted.

use std::sync::Arc;
use std::time::Duration;

use selko_client::{AnalysisResult, AnnotationClient};
use selko_primitives::EditEvent;
use selko_worker::{DebounceGate, Generation, TaskClass};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, trace, warn};

use crate::machine::{ReconcileOutcome, ResponseDecision, SettleDecision, SyncMachine, SyncPhase, SyncStats};
use crate::reconcile::{reconcile, to_delta};
use crate::sink::MetricsSink;
use crate::surface::{AnnotatedSurface, TextSnapshot};

/// Default pause in typing before the document is analyzed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncConfig {
	/// How long the document must stay unchanged before a request is sent.
	pub debounce: Duration,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
		}
	}
}

/// Observable state of a session, published after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncStatus {
	pub phase: SyncPhase,
	pub generation: Generation,
	pub stats: SyncStats,
	/// Message of the most recent failed request, cleared by the next applied cycle.
	pub last_error: Option<String>,
}

impl Default for SyncStatus {
	fn default() -> Self {
		Self {
			phase: SyncPhase::Idle,
			generation: Generation::INITIAL,
			stats: SyncStats::default(),
			last_error: None,
		}
	}
}

/// Messages from spawned tasks back to the controller.
#[derive(Debug)]
enum Completion {
	Settled {
		generation: Generation,
		resolved: bool,
	},
	Responded {
		generation: Generation,
		snapshot: TextSnapshot,
		result: selko_client::Result<AnalysisResult>,
	},
}

pub struct SyncController<C, S> {
	client: Arc<C>,
	surface: S,
	sink: Arc<dyn MetricsSink>,
	config: SyncConfig,
	machine: SyncMachine,
	gate: DebounceGate,
	inflight: Option<JoinHandle<()>>,
	last_error: Option<String>,
	completion_tx: mpsc::UnboundedSender<Completion>,
	completion_rx: mpsc::UnboundedReceiver<Completion>,
	status_tx: watch::Sender<SyncStatus>,
}

impl<C, S> SyncController<C, S>
where
	C: AnnotationClient,
	S: AnnotatedSurface,
{
	pub fn new(client: Arc<C>, surface: S, sink: Arc<dyn MetricsSink>, config: SyncConfig) -> Self {
		let (completion_tx, completion_rx) = mpsc::unbounded_channel();
		let (status_tx, _) = watch::channel(SyncStatus::default());
		Self {
			client,
			surface,
			sink,
			config,
			machine: SyncMachine::new(),
			gate: DebounceGate::new(),
			inflight: None,
			last_error: None,
			completion_tx,
			completion_rx,
			status_tx,
		}
	}

	/// Starts the controller task, consuming edit events from `events`.
	///
	/// The session ends when [`SyncHandle::shutdown`] is called, the handle is
	/// dropped, or every sender of `events` is gone.
	pub fn spawn(self, events: mpsc::UnboundedReceiver<EditEvent>) -> SyncHandle {
		let status = self.status_tx.subscribe();
		let shutdown = CancellationToken::new();
		let task = selko_worker::spawn(TaskClass::Interactive, self.run(events, shutdown.clone()));
		SyncHandle {
			status,
			_guard: shutdown.clone().drop_guard(),
			shutdown,
			task,
		}
	}

	/// Runs the event loop until shutdown. Returns the final counters.
	pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<EditEvent>, shutdown: CancellationToken) -> SyncStats {
		loop {
			tokio::select! {
				biased;

				_ = shutdown.cancelled() => break,

				event = events.recv() => match event {
					Some(event) => self.handle_edit(&event),
					None => break,
				},

				Some(done) = self.completion_rx.recv() => self.handle_completion(done),
			}
		}

		self.teardown()
	}

	fn handle_edit(&mut self, event: &EditEvent) {
		let Some(generation) = self.machine.on_edit(event.origin) else {
			trace!(revision = event.revision, "sync.programmatic_ignored");
			return;
		};

		debug!(generation = %generation, revision = event.revision, "sync.edit");
		let wait = self.gate.settle(self.config.debounce);
		let tx = self.completion_tx.clone();
		selko_worker::spawn(TaskClass::Interactive, async move {
			let resolved = wait.await;
			let _ = tx.send(Completion::Settled { generation, resolved });
		});
		self.publish();
	}

	fn handle_completion(&mut self, done: Completion) {
		match done {
			Completion::Settled { generation, resolved } => self.handle_settled(generation, resolved),
			Completion::Responded {
				generation,
				snapshot,
				result,
			} => self.handle_response(generation, snapshot, result),
		}
		self.publish();
	}

	fn handle_settled(&mut self, generation: Generation, resolved: bool) {
		match self.machine.on_settled(generation, resolved) {
			SettleDecision::Cancelled => {
				trace!(generation = %generation, "sync.cancelled");
			}
			SettleDecision::Request => {
				let snapshot = self.surface.snapshot();
				debug!(
					generation = %generation,
					text_revision = snapshot.text_revision,
					chars = snapshot.len_chars,
					"sync.settled"
				);
				let client = Arc::clone(&self.client);
				let tx = self.completion_tx.clone();
				self.inflight = Some(selko_worker::spawn(TaskClass::Background, async move {
					let result = client.fetch_annotations(&snapshot.text).await;
					let _ = tx.send(Completion::Responded {
						generation,
						snapshot,
						result,
					});
				}));
			}
		}
	}

	fn handle_response(&mut self, generation: Generation, snapshot: TextSnapshot, result: selko_client::Result<AnalysisResult>) {
		match self.machine.on_response(generation, result.is_ok()) {
			ResponseDecision::Stale => {
				debug!(generation = %generation, current = %self.machine.generation(), "sync.stale");
			}
			ResponseDecision::Failed => {
				if let Err(err) = result {
					warn!(generation = %generation, error = %err, "sync.request_failed");
					self.last_error = Some(err.to_string());
				}
			}
			ResponseDecision::Apply => {
				if let Ok(analysis) = result {
					let outcome = self.apply(generation, &snapshot, &analysis);
					self.machine.on_reconciled(outcome);
				}
			}
		}
	}

	fn apply(&mut self, generation: Generation, snapshot: &TextSnapshot, analysis: &AnalysisResult) -> ReconcileOutcome {
		let edits = reconcile(&analysis.annotations, snapshot.len_chars);
		let delta = to_delta(&edits);

		if !delta.is_empty() {
			match self.surface.apply_format(snapshot.text_revision, &delta) {
				Ok(true) => {}
				Ok(false) => {
					debug!(generation = %generation, text_revision = snapshot.text_revision, "sync.stale");
					return ReconcileOutcome::Stale;
				}
				Err(err) => {
					warn!(generation = %generation, error = %err, "sync.reconcile_failed");
					self.last_error = Some(err.to_string());
					return ReconcileOutcome::Failed;
				}
			}
		}

		self.sink.on_counts_change(&analysis.metrics);
		self.last_error = None;
		debug!(
			generation = %generation,
			annotations = analysis.annotations.len(),
			edits = edits.len(),
			words = analysis.metrics.word_count,
			"sync.applied"
		);
		ReconcileOutcome::Applied
	}

	fn teardown(mut self) -> SyncStats {
		let cancelled = self.gate.cancel();
		if let Some(task) = self.inflight.take() {
			task.abort();
		}
		self.machine.on_teardown(cancelled);
		self.publish();
		let stats = self.machine.stats();
		debug!(
			applied = stats.applied,
			stale = stats.stale,
			cancelled = stats.cancelled,
			failed = stats.failed,
			"sync.teardown"
		);
		stats
	}

	fn publish(&self) {
		let status = SyncStatus {
			phase: self.machine.phase(),
			generation: self.machine.generation(),
			stats: self.machine.stats(),
			last_error: self.last_error.clone(),
		};
		self.status_tx.send_if_modified(|current| {
			if *current == status {
				return false;
			}
			*current = status;
			true
		});
	}
}

/// Handle to a running session.
///
/// Dropping the handle stops the session.
#[derive(Debug)]
pub struct SyncHandle {
	status: watch::Receiver<SyncStatus>,
	shutdown: CancellationToken,
	_guard: DropGuard,
	task: JoinHandle<SyncStats>,
}

impl SyncHandle {
	/// Latest published status.
	pub fn status(&self) -> SyncStatus {
		self.status.borrow().clone()
	}

	/// A receiver notified on every status change.
	pub fn subscribe_status(&self) -> watch::Receiver<SyncStatus> {
		self.status.clone()
	}

	/// Stops the session, cancelling any pending wait, and returns the final
	/// counters.
	pub async fn shutdown(mut self) -> SyncStats {
		self.shutdown.cancel();
		match (&mut self.task).await {
			Ok(stats) => stats,
			Err(err) => {
				warn!(error = %err, "sync.task_failed");
				self.status.borrow().stats
			}
		}
	}
}
