use std::fmt;

/// Sequence number minted once per dispatch cycle. Only compared, never interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);
impl RequestToken {
	pub const fn new(value: u64) -> Self {
		Self(value)
	}

	pub const fn get(self) -> u64 {
		self.0
	}

	pub const fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

impl fmt::Display for RequestToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
