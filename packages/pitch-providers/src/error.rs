pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
	#[error("HTTP {status}: {message}")]
	Status { status: u16, message: String },
}
impl Error {
	/// Human-readable text shown to the user as a soft warning.
	pub fn user_message(&self) -> String {
		match self {
			Self::InvalidConfig { message }
			| Self::InvalidResponse { message }
			| Self::Status { message, .. } => message.clone(),
			Self::Reqwest(err) if err.is_timeout() => "Remote search timed out.".to_string(),
			Self::SerdeJson(_) => "Invalid response from server.".to_string(),
			_ => "Failed to search users.".to_string(),
		}
	}
}
