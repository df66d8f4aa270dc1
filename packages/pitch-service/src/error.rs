pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Invalid catalog: {message}")]
	Catalog { message: String },
}
impl From<pitch_providers::Error> for Error {
	fn from(err: pitch_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Catalog { message: err.to_string() }
	}
}
