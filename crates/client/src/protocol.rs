//! JSON wire format of the analysis service.

use std::str::FromStr;

use selko_primitives::{AnnotationKind, MetricsSnapshot, SpanAnnotation};
use serde::{Deserialize, Serialize};

use crate::AnalysisResult;

/// Body of `POST /api/annotate`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
	pub text: &'a str,
}

/// One flagged span as reported by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireAnnotation {
	pub start: usize,
	pub length: usize,
	pub label: String,
	/// The flagged text. Informational only.
	#[serde(default)]
	pub text: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
	#[serde(default)]
	pub annotations: Vec<WireAnnotation>,
	pub count_words: u64,
	pub count_sentences: u64,
	pub count_adverb_words: u64,
	pub count_passive_sentences: u64,
	pub readability: f64,
	pub readability_long_words: f64,
}

impl AnalyzeResponse {
	/// Converts the wire body into domain types.
	///
	/// Annotations with a label outside [`AnnotationKind`] are dropped.
	pub fn into_result(self) -> AnalysisResult {
		let annotations = self
			.annotations
			.into_iter()
			.filter_map(|a| match AnnotationKind::from_str(&a.label) {
				Ok(kind) => Some(SpanAnnotation::new(a.start, a.length, kind)),
				Err(_) => {
					tracing::debug!(label = %a.label, start = a.start, "client.unknown_label");
					None
				}
			})
			.collect();

		AnalysisResult {
			annotations,
			metrics: MetricsSnapshot {
				word_count: self.count_words,
				sentence_count: self.count_sentences,
				adverb_word_count: self.count_adverb_words,
				passive_sentence_count: self.count_passive_sentences,
				readability: self.readability,
				readability_long_words: self.readability_long_words,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const BODY: &str = r#"{
		"annotations": [
			{"start": 0, "length": 4, "label": "adverb", "text": "Aina"},
			{"start": 5, "length": 9, "label": "passive"},
			{"start": 0, "length": 30, "label": "hedge"}
		],
		"count_words": 5,
		"count_sentences": 1,
		"count_adverb_words": 1,
		"count_passive_sentences": 1,
		"readability": 7.5,
		"readability_long_words": 0.2
	}"#;

	#[test]
	fn decodes_service_response() {
		let response: AnalyzeResponse = serde_json::from_str(BODY).unwrap();
		assert_eq!(response.annotations.len(), 3);
		assert_eq!(response.annotations[0].text.as_deref(), Some("Aina"));
		assert_eq!(response.annotations[1].text, None);
	}

	#[test]
	fn unknown_labels_are_dropped() {
		let response: AnalyzeResponse = serde_json::from_str(BODY).unwrap();
		let result = response.into_result();
		assert_eq!(
			result.annotations,
			vec![
				SpanAnnotation::new(0, 4, AnnotationKind::Adverb),
				SpanAnnotation::new(5, 9, AnnotationKind::Passive),
			]
		);
		assert_eq!(result.metrics.word_count, 5);
		assert_eq!(result.metrics.readability, 7.5);
	}

	#[test]
	fn request_serializes_text_only() {
		let body = serde_json::to_value(AnalyzeRequest { text: "Hei." }).unwrap();
		assert_eq!(body, serde_json::json!({ "text": "Hei." }));
	}
}
