use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default() | Effects::BOLD)
		.usage(AnsiColor::Green.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parses a `--debounce-ms` style override. Zero is rejected.
pub fn parse_positive_millis(raw: &str) -> Result<u64, String> {
	match raw.trim().parse::<u64>() {
		Ok(0) => Err("value must be greater than zero".to_string()),
		Ok(value) => Ok(value),
		Err(err) => Err(err.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_positive_millis() {
		assert_eq!(parse_positive_millis(" 250 "), Ok(250));
		assert!(parse_positive_millis("0").is_err());
		assert!(parse_positive_millis("soon").is_err());
	}
}
