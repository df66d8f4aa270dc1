use std::fmt;

/// Trimmed search text. The empty query means no search is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query(String);
impl Query {
	pub fn new(raw: &str) -> Self {
		Self(raw.trim().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Lowercased form used for substring matching.
	pub fn needle(&self) -> String {
		self.0.to_lowercase()
	}

	/// Case-insensitive full equality against `name`.
	pub fn matches_name(&self, name: &str) -> bool {
		!self.0.is_empty() && name.to_lowercase() == self.needle()
	}
}

impl fmt::Display for Query {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Query {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}
