use pitch_domain::{
	Query, RequestToken, ResultId, ResultKind, SearchResult, SourceResult, Venue,
};

fn venue(id: i64, name: &str, address: Option<&str>, description: Option<&str>) -> Venue {
	Venue {
		id,
		name: name.to_string(),
		address: address.map(str::to_string),
		description: description.map(str::to_string),
		images: Vec::new(),
	}
}

#[test]
fn query_is_trimmed_and_empty_is_distinguished() {
	assert!(Query::new("   ").is_empty());
	assert_eq!(Query::new("  ana ").as_str(), "ana");
	assert_eq!(Query::new("Ana").needle(), "ana");
}

#[test]
fn exact_name_match_ignores_case() {
	let query = Query::new(" ANA ");

	assert!(query.matches_name("ana"));
	assert!(query.matches_name("Ana"));
	assert!(!query.matches_name("Cancha Ana"));
	assert!(!Query::new("").matches_name(""));
}

#[test]
fn venue_matches_any_text_field() {
	let court = venue(7, "Cancha Norte", Some("Av. Libertador 100"), Some("Pasto sintético"));

	assert!(court.matches("norte"));
	assert!(court.matches("libertador"));
	assert!(court.matches("sintético"));
	assert!(!court.matches("sur"));
	assert!(!court.matches(""));
}

#[test]
fn venue_without_optional_fields_matches_on_name_only() {
	let court = venue(1, "Club Ana", None, None);

	assert!(court.matches("ana"));
	assert!(!court.matches("calle"));
}

#[test]
fn venue_converts_to_tagged_result() {
	let mut court = venue(3, "Cancha Ana", Some("Calle 9"), None);

	court.images = vec!["https://cdn.example/a.webp".to_string(), "b.webp".to_string()];

	let result = court.to_result();

	assert_eq!(result.kind, ResultKind::Venue);
	assert_eq!(result.id, ResultId::Int(3));
	assert_eq!(result.target, "/canchas/3");
	assert_eq!(result.image.as_deref(), Some("https://cdn.example/a.webp"));
	assert_eq!(result.subtitle.as_deref(), Some("Calle 9"));
}

#[test]
fn identity_pairs_kind_with_id() {
	let user = SearchResult {
		id: ResultId::Int(3),
		kind: ResultKind::User,
		name: "ana".to_string(),
		image: None,
		subtitle: None,
		target: "/perfil/ana".to_string(),
	};
	let court = venue(3, "ana", None, None).to_result();

	assert_ne!(user.identity(), court.identity());
}

#[test]
fn failed_source_contributes_nothing() {
	let token = RequestToken::new(4);
	let failed = SourceResult::failed(token, ResultKind::User, "boom");

	assert!(failed.failed);
	assert!(failed.contribution().is_empty());
	assert_eq!(failed.error_message.as_deref(), Some("boom"));
	assert!(SourceResult::empty(token, ResultKind::Venue).contribution().is_empty());
}

#[test]
fn tokens_are_ordered() {
	let first = RequestToken::default().next();

	assert!(first.next() > first);
	assert_eq!(first.get(), 1);
}

#[test]
fn result_ids_decode_from_numbers_or_strings() {
	let numeric: ResultId = serde_json::from_str("42").expect("Failed to decode numeric id.");
	let text: ResultId = serde_json::from_str("\"u-42\"").expect("Failed to decode text id.");

	assert_eq!(numeric, ResultId::Int(42));
	assert_eq!(text, ResultId::Text("u-42".to_string()));
}
