use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use pretty_assertions::assert_eq;
use selko_client::{AnnotationClient, Error, HttpAnnotationClient, HttpClientConfig};
use selko_primitives::{AnnotationKind, SpanAnnotation};
use serde_json::{Value, json};

async fn serve(router: Router) -> String {
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, router).await.unwrap();
	});
	format!("http://{addr}/api/annotate")
}

/// Flags the first word as an adverb and counts whitespace-separated words.
async fn annotate(Json(body): Json<Value>) -> Json<Value> {
	let text = body["text"].as_str().unwrap_or_default();
	let first = text.split_whitespace().next().unwrap_or_default();
	let annotations = if first.is_empty() {
		json!([])
	} else {
		json!([{ "start": 0, "length": first.chars().count(), "label": "adverb", "text": first }])
	};
	Json(json!({
		"annotations": annotations,
		"count_words": text.split_whitespace().count(),
		"count_sentences": 1,
		"count_adverb_words": 1,
		"count_passive_sentences": 0,
		"readability": 3.25,
		"readability_long_words": 0.5,
	}))
}

fn client(endpoint: &str) -> HttpAnnotationClient {
	let config = HttpClientConfig::new(endpoint).unwrap().with_timeout(Duration::from_secs(2));
	HttpAnnotationClient::new(config).unwrap()
}

#[tokio::test]
async fn test_fetch_annotations_decodes_response() {
	let endpoint = serve(Router::new().route("/api/annotate", post(annotate))).await;
	let result = client(&endpoint).fetch_annotations("Ehkä huomenna sataa").await.unwrap();

	assert_eq!(result.annotations, vec![SpanAnnotation::new(0, 4, AnnotationKind::Adverb)]);
	assert_eq!(result.metrics.word_count, 3);
	assert_eq!(result.metrics.readability, 3.25);
	assert_eq!(result.metrics.readability_long_words, 0.5);
}

#[tokio::test]
async fn test_empty_text_is_still_analyzed() {
	let endpoint = serve(Router::new().route("/api/annotate", post(annotate))).await;
	let result = client(&endpoint).fetch_annotations("").await.unwrap();
	assert!(result.annotations.is_empty());
	assert_eq!(result.metrics.word_count, 0);
}

#[tokio::test]
async fn test_non_success_status_is_request_failed() {
	let router = Router::new().route("/api/annotate", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
	let endpoint = serve(router).await;

	let err = client(&endpoint).fetch_annotations("text").await.unwrap_err();
	assert!(matches!(err, Error::RequestFailed { status: 500 }), "got {err:?}");
}

#[tokio::test]
async fn test_undecodable_body_is_transport_error() {
	let router = Router::new().route("/api/annotate", post(|| async { Json(json!({ "unexpected": true })) }));
	let endpoint = serve(router).await;

	let err = client(&endpoint).fetch_annotations("text").await.unwrap_err();
	assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

#[test]
fn test_invalid_endpoint_is_rejected() {
	assert!(matches!(HttpClientConfig::new("::not a url::"), Err(Error::Endpoint(_))));
}
