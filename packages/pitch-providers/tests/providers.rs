use reqwest::header::{AUTHORIZATION, COOKIE};
use serde_json::{Map, Value};

use pitch_config::RemoteConfig;
use pitch_domain::ResultKind;
use pitch_providers::{Error, users};
use pitch_testkit::{DirectoryReply, UserDirectory, user_record};

fn remote_config(api_base: Option<String>) -> RemoteConfig {
	RemoteConfig {
		api_base,
		path: pitch_testkit::SEARCH_PATH.to_string(),
		timeout_ms: 2_000,
		auth_token: Some("secret".to_string()),
		default_headers: Map::new(),
	}
}

#[test]
fn builds_bearer_auth_header() {
	let headers = pitch_providers::auth_headers(Some("secret"), &Map::new())
		.expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn attaches_default_headers_without_token() {
	let mut defaults = Map::new();

	defaults.insert("cookie".to_string(), Value::String("session=abc".to_string()));

	let headers =
		pitch_providers::auth_headers(None, &defaults).expect("Failed to build headers.");

	assert!(headers.get(AUTHORIZATION).is_none());
	assert_eq!(headers.get(COOKIE).expect("Missing cookie header."), "session=abc");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("x-retry".to_string(), serde_json::json!(1));

	let err = pitch_providers::auth_headers(None, &defaults).expect_err("Expected failure.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
}

#[tokio::test]
async fn searches_directory_with_trimmed_query() {
	let directory = UserDirectory::start(|query| {
		DirectoryReply::users(serde_json::json!([user_record(1, query, "first")]))
	})
	.await
	.expect("Failed to start user directory.");
	let cfg = remote_config(Some(directory.api_base().to_string()));
	let client = users::build_client(&cfg).expect("Failed to build client.");
	let results = users::search(&client, &cfg, "  ana maría ", 10).await.expect("Search failed.");

	assert_eq!(directory.queries(), vec!["ana maría".to_string()]);
	assert_eq!(directory.last_authorization().as_deref(), Some("Bearer secret"));
	assert_eq!(results.len(), 1);
	assert_eq!(results[0].kind, ResultKind::User);
	assert_eq!(results[0].name, "ana maría");
	assert_eq!(results[0].target, "/perfil/first");
}

#[tokio::test]
async fn empty_query_issues_no_request() {
	let directory = UserDirectory::start(|_| DirectoryReply::users(serde_json::json!([])))
		.await
		.expect("Failed to start user directory.");
	let cfg = remote_config(Some(directory.api_base().to_string()));
	let client = users::build_client(&cfg).expect("Failed to build client.");
	let results = users::search(&client, &cfg, "   ", 10).await.expect("Search failed.");

	assert!(results.is_empty());
	assert_eq!(directory.calls(), 0);
}

#[tokio::test]
async fn error_status_uses_payload_message() {
	let directory = UserDirectory::start(|_| DirectoryReply::error(401, "No autorizado"))
		.await
		.expect("Failed to start user directory.");
	let cfg = remote_config(Some(directory.api_base().to_string()));
	let client = users::build_client(&cfg).expect("Failed to build client.");
	let err = users::search(&client, &cfg, "ana", 10).await.expect_err("Expected failure.");

	assert!(matches!(err, Error::Status { status: 401, .. }), "Unexpected error: {err}");
	assert_eq!(err.user_message(), "No autorizado");
}

#[tokio::test]
async fn error_status_without_message_is_generic() {
	let directory = UserDirectory::start(|_| DirectoryReply::raw(500, serde_json::json!({})))
		.await
		.expect("Failed to start user directory.");
	let cfg = remote_config(Some(directory.api_base().to_string()));
	let client = users::build_client(&cfg).expect("Failed to build client.");
	let err = users::search(&client, &cfg, "ana", 10).await.expect_err("Expected failure.");

	assert_eq!(err.user_message(), "Error 500: could not search users.");
}

#[tokio::test]
async fn unsuccessful_envelope_is_rejected() {
	let directory = UserDirectory::start(|_| {
		DirectoryReply::raw(200, serde_json::json!({ "success": false, "data": [], "count": 0 }))
	})
	.await
	.expect("Failed to start user directory.");
	let cfg = remote_config(Some(directory.api_base().to_string()));
	let client = users::build_client(&cfg).expect("Failed to build client.");
	let err = users::search(&client, &cfg, "ana", 10).await.expect_err("Expected failure.");

	assert_eq!(err.user_message(), "Invalid response from server.");
}

#[tokio::test]
async fn missing_api_base_fails_without_request() {
	let cfg = remote_config(None);
	let client = users::build_client(&cfg).expect("Failed to build client.");
	let err = users::search(&client, &cfg, "ana", 10).await.expect_err("Expected failure.");

	assert!(matches!(err, Error::InvalidConfig { .. }));
	assert_eq!(err.user_message(), "API base URL is not configured.");
}
