use pitch_domain::{SearchResult, SearchState};

/// Formats a state snapshot for the terminal. Returns `None` while a cycle is pending.
pub fn render(state: &SearchState) -> Option<String> {
	if state.loading {
		return None;
	}
	if state.query.trim().is_empty() {
		return Some("(cleared)".to_string());
	}

	let mut out = format!("results for {:?}: {}", state.query.trim(), state.results.len());

	for item in &state.results {
		out.push('\n');
		out.push_str(&line(item));
	}

	if let Some(error) = state.error.as_deref() {
		out.push_str("\nwarning: ");
		out.push_str(error);
	}

	Some(out)
}

fn line(item: &SearchResult) -> String {
	match item.subtitle.as_deref() {
		Some(subtitle) => format!("  [{}] {} ({}) -> {}", item.kind, item.name, subtitle, item.target),
		None => format!("  [{}] {} -> {}", item.kind, item.name, item.target),
	}
}
