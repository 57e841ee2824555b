/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Ways an analysis request can fail.
///
/// Every variant means "no update this cycle" to the caller. None of them is
/// retried by the client.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The service answered with a non-success status.
	#[error("analysis request failed with status {status}")]
	RequestFailed { status: u16 },
	/// The request could not be sent, timed out, or the body was not valid JSON.
	#[error("analysis transport error: {0}")]
	Transport(#[from] reqwest::Error),
	/// The configured endpoint is not a usable URL.
	#[error("invalid analysis endpoint: {0}")]
	Endpoint(#[from] url::ParseError),
}

impl Error {
	/// HTTP status reported by the service, if it answered at all.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RequestFailed { status } => Some(*status),
			Self::Transport(err) => err.status().map(|s| s.as_u16()),
			Self::Endpoint(_) => None,
		}
	}
}
