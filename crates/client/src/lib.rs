//! Client side of the text analysis service.
//!
//! [`AnnotationClient`] is the seam the synchronization engine talks to;
//! [`HttpAnnotationClient`] is the production implementation. Failures are
//! returned to the caller untouched: there is no retry at this layer.

mod error;
mod http;
pub mod protocol;

use std::sync::Arc;

use async_trait::async_trait;
use selko_primitives::{MetricsSnapshot, SpanAnnotation};

pub use error::{Error, Result};
pub use http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, HttpAnnotationClient, HttpClientConfig};

/// Everything one analysis produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResult {
	/// Flagged spans in the order the service reported them.
	pub annotations: Vec<SpanAnnotation>,
	pub metrics: MetricsSnapshot,
}

/// Request/response exchange with an analysis backend.
#[async_trait]
pub trait AnnotationClient: Send + Sync + 'static {
	/// Analyzes `text` in full.
	async fn fetch_annotations(&self, text: &str) -> Result<AnalysisResult>;
}

#[async_trait]
impl<T: AnnotationClient + ?Sized> AnnotationClient for Arc<T> {
	async fn fetch_annotations(&self, text: &str) -> Result<AnalysisResult> {
		(**self).fetch_annotations(text).await
	}
}
