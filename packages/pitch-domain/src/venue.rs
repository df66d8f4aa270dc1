use serde::{Deserialize, Serialize};

use crate::{ResultId, ResultKind, SearchResult};

/// A court held in the local catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
	pub id: i64,
	pub name: String,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub images: Vec<String>,
}
impl Venue {
	/// Substring match over name, address and description. `needle` must already be lowercase.
	pub fn matches(&self, needle: &str) -> bool {
		if needle.is_empty() {
			return false;
		}

		[Some(self.name.as_str()), self.address.as_deref(), self.description.as_deref()]
			.into_iter()
			.flatten()
			.any(|field| field.to_lowercase().contains(needle))
	}

	pub fn to_result(&self) -> SearchResult {
		SearchResult {
			id: ResultId::Int(self.id),
			kind: ResultKind::Venue,
			name: self.name.clone(),
			image: self.images.first().cloned(),
			subtitle: self.address.clone(),
			target: format!("/canchas/{}", self.id),
		}
	}
}
