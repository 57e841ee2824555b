use selko_primitives::MetricsSnapshot;

/// Receives a fresh metrics snapshot after every applied analysis.
///
/// Called from the controller task; implementations must not block.
pub trait MetricsSink: Send + Sync + 'static {
	fn on_counts_change(&self, metrics: &MetricsSnapshot);
}

impl<F> MetricsSink for F
where
	F: Fn(&MetricsSnapshot) + Send + Sync + 'static,
{
	fn on_counts_change(&self, metrics: &MetricsSnapshot) {
		self(metrics)
	}
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl MetricsSink for NullSink {
	fn on_counts_change(&self, _: &MetricsSnapshot) {}
}
