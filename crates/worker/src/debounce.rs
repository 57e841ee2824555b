//! Debounce gate with explicit, prompt cancellation.
//!
//! [`DebounceGate::settle`] arms a new wait and cancels whichever wait was
//! armed before it, so at most one wait is live. A wait resolves to `true`
//! when its delay elapses without being superseded and to `false` otherwise.
//! Cancellation drops the wait's sleep immediately, releasing the timer
//! rather than letting it run out.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Owner of the single live debounce wait.
///
/// Dropping the gate cancels the pending wait, so a torn-down session never
/// sees a late resolution.
#[derive(Debug, Default)]
pub struct DebounceGate {
	pending: Option<CancellationToken>,
}

impl DebounceGate {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cancels any pending wait and arms a new one for `delay`.
	pub fn settle(&mut self, delay: Duration) -> SettleWait {
		if self.cancel() {
			tracing::trace!("debounce.superseded");
		}
		let token = CancellationToken::new();
		self.pending = Some(token.clone());
		SettleWait { token, delay }
	}

	/// Cancels the pending wait, if any. Returns true if one was cancelled.
	pub fn cancel(&mut self) -> bool {
		match self.pending.take() {
			Some(token) if !token.is_cancelled() => {
				token.cancel();
				true
			}
			_ => false,
		}
	}

	/// Returns true while an armed wait has neither resolved nor been cancelled.
	pub fn is_armed(&self) -> bool {
		self.pending.as_ref().is_some_and(|token| !token.is_cancelled())
	}
}

impl Drop for DebounceGate {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// One armed debounce wait. Await it (directly or via [`SettleWait::wait`])
/// to learn whether it survived.
#[derive(Debug)]
#[must_use = "a settle wait does nothing unless awaited"]
pub struct SettleWait {
	token: CancellationToken,
	delay: Duration,
}

impl SettleWait {
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Resolves to true if the delay elapsed without cancellation.
	///
	/// A wait that resolves retires its token, so the gate is no longer armed
	/// and a later [`DebounceGate::cancel`] reports nothing to cancel.
	pub async fn wait(self) -> bool {
		tokio::select! {
			biased;
			_ = self.token.cancelled() => false,
			_ = tokio::time::sleep(self.delay) => {
				let survived = !self.token.is_cancelled();
				self.token.cancel();
				survived
			}
		}
	}
}

impl IntoFuture for SettleWait {
	type Output = bool;
	type IntoFuture = Pin<Box<dyn Future<Output = bool> + Send + 'static>>;

	fn into_future(self) -> Self::IntoFuture {
		Box::pin(self.wait())
	}
}
