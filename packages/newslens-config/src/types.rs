use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	pub retrieval: Retrieval,
	#[serde(default)]
	pub synthesis: Synthesis,
	#[serde(default)]
	pub presentation: Presentation,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub neo4j: Neo4j,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Neo4j {
	pub uri: String,
	pub user: String,
	pub password: String,
	/// Optional. Falls back to the server's default database.
	pub database: Option<String>,
	pub vector_index: String,
	#[serde(default = "default_max_connections")]
	pub max_connections: usize,
	#[serde(default = "default_fetch_size")]
	pub fetch_size: usize,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub llm: LlmProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	pub top_k: u32,
	/// Per-strategy budget. A strategy that exceeds it contributes no evidence.
	pub timeout_ms: u64,
	pub evidence_cap: u32,
	#[serde(default)]
	pub paths: RetrievalPaths,
	#[serde(default)]
	pub text2cypher: Text2Cypher,
}

/// Scores are multiplied by the path weight before ranking. Equal ranks go to the higher
/// priority.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RetrievalPaths {
	pub vector_weight: f32,
	pub graph_weight: f32,
	pub generated_query_weight: f32,
	pub vector_priority: u32,
	pub graph_priority: u32,
	pub generated_query_priority: u32,
}
impl Default for RetrievalPaths {
	fn default() -> Self {
		Self {
			vector_weight: 1.0,
			graph_weight: 1.0,
			generated_query_weight: 1.0,
			vector_priority: 1,
			graph_priority: 2,
			generated_query_priority: 0,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Text2Cypher {
	pub enabled: bool,
	/// Generated-query rows carry no similarity, so every row is ranked with this score.
	pub row_score: f32,
}
impl Default for Text2Cypher {
	fn default() -> Self {
		Self { enabled: true, row_score: 0.5 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Synthesis {
	pub timeout_ms: u64,
	pub max_chunk_chars: u32,
	pub summary_chars: u32,
}
impl Default for Synthesis {
	fn default() -> Self {
		Self { timeout_ms: 30_000, max_chunk_chars: 600, summary_chars: 160 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Presentation {
	pub default_short_name: String,
	pub default_category: String,
	pub default_icon: String,
	pub category_icons: BTreeMap<String, String>,
	pub fallback_title: String,
	pub no_results_title: String,
	pub no_results_content: String,
}
impl Default for Presentation {
	fn default() -> Self {
		let category_icons = [
			("정치", "🏛️"),
			("경제", "💼"),
			("사회", "👥"),
			("생활/문화", "🎭"),
			("IT/과학", "💻"),
			("세계", "🌍"),
		]
		.into_iter()
		.map(|(category, icon)| (category.to_string(), icon.to_string()))
		.collect();

		Self {
			default_short_name: "unknown".to_string(),
			default_category: "기타".to_string(),
			default_icon: "📰".to_string(),
			category_icons,
			fallback_title: "검색 결과".to_string(),
			no_results_title: "검색 결과 없음".to_string(),
			no_results_content: "질문과 관련된 뉴스 기사를 찾지 못했습니다.".to_string(),
		}
	}
}

fn default_max_connections() -> usize {
	16
}

fn default_fetch_size() -> usize {
	200
}
