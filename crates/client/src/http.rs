use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::protocol::{AnalyzeRequest, AnalyzeResponse};
use crate::{AnalysisResult, AnnotationClient, Error, Result};

/// Endpoint of a locally running analysis service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/annotate";

/// Upper bound on one request/response exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`HttpAnnotationClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
	pub endpoint: Url,
	pub timeout: Duration,
}

impl HttpClientConfig {
	pub fn new(endpoint: &str) -> Result<Self> {
		Ok(Self {
			endpoint: Url::parse(endpoint)?,
			timeout: DEFAULT_TIMEOUT,
		})
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

/// Posts document text to the analysis service as JSON.
#[derive(Debug, Clone)]
pub struct HttpAnnotationClient {
	http: reqwest::Client,
	endpoint: Url,
}

impl HttpAnnotationClient {
	pub fn new(config: HttpClientConfig) -> Result<Self> {
		let http = reqwest::Client::builder().timeout(config.timeout).build()?;
		Ok(Self {
			http,
			endpoint: config.endpoint,
		})
	}

	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}
}

#[async_trait]
impl AnnotationClient for HttpAnnotationClient {
	async fn fetch_annotations(&self, text: &str) -> Result<AnalysisResult> {
		let started = Instant::now();
		let chars = text.chars().count();
		debug!(endpoint = %self.endpoint, chars, "client.request");

		let response = self
			.http
			.post(self.endpoint.clone())
			.header(ACCEPT, "application/json")
			.json(&AnalyzeRequest { text })
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			debug!(status = status.as_u16(), "client.response_status");
			return Err(Error::RequestFailed { status: status.as_u16() });
		}

		let body: AnalyzeResponse = response.json().await?;
		let result = body.into_result();
		debug!(
			annotations = result.annotations.len(),
			latency_ms = started.elapsed().as_millis() as u64,
			"client.response"
		);
		Ok(result)
	}
}
