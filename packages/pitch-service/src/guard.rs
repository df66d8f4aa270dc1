use pitch_domain::RequestToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
	/// The result belongs to the active cycle.
	Current,
	/// The result belongs to a superseded or cancelled cycle and must be dropped unread.
	Stale,
}

/// Mints cycle tokens and decides whether an arriving source result is still relevant.
#[derive(Debug, Default)]
pub struct StaleResponseGuard {
	last_minted: RequestToken,
	active: Option<RequestToken>,
}
impl StaleResponseGuard {
	pub fn new() -> Self {
		Self::default()
	}

	/// Mints the next token and makes it the only active one.
	pub fn mint(&mut self) -> RequestToken {
		let token = self.last_minted.next();

		self.last_minted = token;
		self.active = Some(token);

		token
	}

	pub fn active(&self) -> Option<RequestToken> {
		self.active
	}

	pub fn last_minted(&self) -> RequestToken {
		self.last_minted
	}

	/// Drops interest in the active cycle without minting a replacement.
	pub fn invalidate(&mut self) {
		self.active = None;
	}

	pub fn admit(&self, token: RequestToken) -> Admission {
		debug_assert!(token <= self.last_minted, "token {token} was never minted");

		match self.active {
			Some(active) if active == token => Admission::Current,
			_ => Admission::Stale,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mints_increasing_tokens() {
		let mut guard = StaleResponseGuard::new();
		let first = guard.mint();
		let second = guard.mint();

		assert!(second > first);
		assert_eq!(guard.active(), Some(second));
		assert_eq!(guard.last_minted(), second);
	}

	#[test]
	fn only_the_latest_token_is_current() {
		let mut guard = StaleResponseGuard::new();
		let first = guard.mint();

		assert_eq!(guard.admit(first), Admission::Current);

		let second = guard.mint();

		assert_eq!(guard.admit(first), Admission::Stale);
		assert_eq!(guard.admit(second), Admission::Current);
	}

	#[test]
	fn invalidation_makes_every_token_stale() {
		let mut guard = StaleResponseGuard::new();
		let token = guard.mint();

		guard.invalidate();

		assert_eq!(guard.active(), None);
		assert_eq!(guard.admit(token), Admission::Stale);
		assert!(guard.mint() > token);
	}
}
