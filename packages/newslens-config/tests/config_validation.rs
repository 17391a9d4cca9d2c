use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use newslens_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_toml_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let mut table = root.as_table_mut().expect("Sample config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Sample config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("newslens_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> newslens_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = newslens_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.storage.neo4j.database, None);
	assert_eq!(cfg.providers.embedding.api_base, "https://api.openai.com");
	assert_eq!(cfg.retrieval.evidence_cap, 20);
	assert_eq!(cfg.storage.neo4j.max_connections, 16);
}

#[test]
fn presentation_defaults_cover_known_categories() {
	let cfg = base_config();

	assert_eq!(cfg.presentation.default_short_name, "unknown");
	assert_eq!(cfg.presentation.default_category, "기타");
	assert_eq!(cfg.presentation.default_icon, "📰");
	assert_eq!(cfg.presentation.category_icons.get("경제").map(String::as_str), Some("💼"));
	assert_eq!(cfg.presentation.category_icons.len(), 6);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("newslens_config_test_missing.toml");
	let err = newslens_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::Read { .. }), "Unexpected error: {err}");
}

#[test]
fn invalid_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind = 1".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::Parse { .. }), "Unexpected error: {err}");
}

#[test]
fn top_k_must_be_positive() {
	let payload = sample_toml_with(&["retrieval"], "top_k", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected top_k validation error.");

	assert!(
		err.to_string().contains("retrieval.top_k must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn retrieval_timeout_must_be_positive() {
	let payload = sample_toml_with(&["retrieval"], "timeout_ms", Value::Integer(0));
	let err = load_payload(payload).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("retrieval.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn path_weights_must_be_non_negative() {
	let mut cfg = base_config();

	cfg.retrieval.paths.vector_weight = -0.5;

	let err = newslens_config::validate(&cfg).expect_err("Expected weight validation error.");

	assert!(
		err.to_string().contains("retrieval.paths.vector_weight must be zero or greater."),
		"Unexpected error: {err}"
	);

	cfg = base_config();
	cfg.retrieval.paths.graph_weight = f32::NAN;

	let err = newslens_config::validate(&cfg).expect_err("Expected weight validation error.");

	assert!(
		err.to_string().contains("retrieval.paths.graph_weight must be a finite number."),
		"Unexpected error: {err}"
	);
}

#[test]
fn row_score_must_be_a_unit_interval_value() {
	let payload =
		sample_toml_with(&["retrieval", "text2cypher"], "row_score", Value::Float(1.5));
	let err = load_payload(payload).expect_err("Expected row_score validation error.");

	assert!(
		err.to_string().contains("retrieval.text2cypher.row_score must be in the range 0.0-1.0."),
		"Unexpected error: {err}"
	);
}

#[test]
fn provider_api_keys_must_be_non_empty() {
	let payload =
		sample_toml_with(&["providers", "llm"], "api_key", Value::String("  ".to_string()));
	let err = load_payload(payload).expect_err("Expected api_key validation error.");

	assert!(
		err.to_string().contains("Provider llm api_key must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root.as_table_mut().expect("Sample config must be a table.");

	table.remove("synthesis");

	let retrieval = table
		.get_mut("retrieval")
		.and_then(Value::as_table_mut)
		.expect("Sample config must include [retrieval].");

	retrieval.remove("paths");
	retrieval.remove("text2cypher");

	let payload = toml::to_string(&root).expect("Failed to render sample config.");
	let cfg = load_payload(payload).expect("Config without optional sections must load.");

	assert_eq!(cfg.synthesis.max_chunk_chars, 600);
	assert_eq!(cfg.retrieval.paths.graph_priority, 2);
	assert!(cfg.retrieval.text2cypher.enabled);
}
