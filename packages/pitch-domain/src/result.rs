use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RequestToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
	/// Remote user profile.
	User,
	/// Venue from the local catalog.
	Venue,
}
impl ResultKind {
	/// Source priority used when no exact name match decides the order.
	pub fn priority(self) -> u8 {
		match self {
			Self::User => 0,
			Self::Venue => 1,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::Venue => "venue",
		}
	}
}

impl fmt::Display for ResultKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Source-side identifier. Unique only within one [`ResultKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultId {
	Int(i64),
	Text(String),
}

impl fmt::Display for ResultId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(id) => write!(f, "{id}"),
			Self::Text(id) => f.write_str(id),
		}
	}
}

impl From<i64> for ResultId {
	fn from(id: i64) -> Self {
		Self::Int(id)
	}
}

impl From<&str> for ResultId {
	fn from(id: &str) -> Self {
		Self::Text(id.to_string())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
	pub id: ResultId,
	pub kind: ResultKind,
	pub name: String,
	pub image: Option<String>,
	pub subtitle: Option<String>,
	/// Opaque navigation locator.
	pub target: String,
}
impl SearchResult {
	pub fn identity(&self) -> (ResultKind, &ResultId) {
		(self.kind, &self.id)
	}
}

/// What one source reported for one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResult {
	pub token: RequestToken,
	pub kind: ResultKind,
	pub items: Vec<SearchResult>,
	pub failed: bool,
	pub error_message: Option<String>,
}
impl SourceResult {
	pub fn ok(token: RequestToken, kind: ResultKind, items: Vec<SearchResult>) -> Self {
		Self { token, kind, items, failed: false, error_message: None }
	}

	pub fn empty(token: RequestToken, kind: ResultKind) -> Self {
		Self::ok(token, kind, Vec::new())
	}

	pub fn failed(token: RequestToken, kind: ResultKind, message: impl Into<String>) -> Self {
		Self { token, kind, items: Vec::new(), failed: true, error_message: Some(message.into()) }
	}

	/// Items this source contributes to aggregation. Failed sources contribute nothing.
	pub fn contribution(&self) -> &[SearchResult] {
		if self.failed { &[] } else { &self.items }
	}
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
	pub query: String,
	pub results: Vec<SearchResult>,
	pub loading: bool,
	pub error: Option<String>,
}
