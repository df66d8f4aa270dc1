use std::{
	env, fs,
	path::PathBuf,
	time::{SystemTime, UNIX_EPOCH},
};

use clap::Parser;

use pitch_search::Args;

fn scratch_dir() -> PathBuf {
	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be after the Unix epoch.")
		.as_nanos();
	let dir = env::temp_dir().join(format!("pitch_search_cli_{nanos}"));

	fs::create_dir_all(&dir).expect("Failed to create scratch directory.");

	dir
}

#[test]
fn parses_all_flags() {
	let args = Args::try_parse_from([
		"pitch-search",
		"-c",
		"pitch.toml",
		"--catalog",
		"venues.json",
		"--debounce-ms",
		"150",
		"-q",
		"ana",
	])
	.expect("Arguments must parse.");

	assert_eq!(args.config, PathBuf::from("pitch.toml"));
	assert_eq!(args.catalog, Some(PathBuf::from("venues.json")));
	assert_eq!(args.debounce_ms, Some(150));
	assert_eq!(args.query.as_deref(), Some("ana"));
}

#[test]
fn rejects_zero_debounce() {
	let err = Args::try_parse_from(["pitch-search", "-c", "pitch.toml", "--debounce-ms", "0"])
		.expect_err("Zero debounce must be rejected.");

	assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn config_flag_is_required() {
	assert!(Args::try_parse_from(["pitch-search"]).is_err());
}

#[tokio::test]
async fn single_query_runs_against_the_catalog_without_a_remote() {
	let dir = scratch_dir();
	let config = dir.join("pitch.toml");
	let catalog = dir.join("venues.json");

	fs::write(
		&config,
		"[service]\nlog_level = \"warn\"\n\n[remote]\n\n[search]\ndebounce_ms = 10\n",
	)
	.expect("Failed to write config.");
	fs::write(
		&catalog,
		r#"[{"id": 1, "name": "Cancha Ana", "address": "Calle 1"}, {"id": 2, "name": "Sur"}]"#,
	)
	.expect("Failed to write catalog.");

	let args = Args::try_parse_from([
		"pitch-search".into(),
		"-c".into(),
		config.into_os_string(),
		"--catalog".into(),
		catalog.into_os_string(),
		"-q".into(),
		"ana".into(),
	])
	.expect("Arguments must parse.");

	pitch_search::run(args).await.expect("Single query run must succeed.");

	fs::remove_dir_all(&dir).expect("Failed to clean scratch directory.");
}
