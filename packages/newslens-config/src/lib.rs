mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, LlmProviderConfig, Neo4j, Presentation, Providers, Retrieval,
	RetrievalPaths, Service, Storage, Synthesis, Text2Cypher,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw =
		fs::read_to_string(path).map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config =
		toml::from_str(&raw).map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	let neo4j = &cfg.storage.neo4j;

	if neo4j.uri.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.neo4j.uri must be non-empty.".to_string(),
		});
	}
	if neo4j.vector_index.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.neo4j.vector_index must be non-empty.".to_string(),
		});
	}
	if neo4j.max_connections == 0 {
		return Err(Error::Validation {
			message: "storage.neo4j.max_connections must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}

	for (label, timeout_ms) in [
		("providers.embedding.timeout_ms", cfg.providers.embedding.timeout_ms),
		("providers.llm.timeout_ms", cfg.providers.llm.timeout_ms),
		("retrieval.timeout_ms", cfg.retrieval.timeout_ms),
		("synthesis.timeout_ms", cfg.synthesis.timeout_ms),
	] {
		if timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	if !cfg.providers.llm.temperature.is_finite() || cfg.providers.llm.temperature < 0.0 {
		return Err(Error::Validation {
			message: "providers.llm.temperature must be a finite number, zero or greater."
				.to_string(),
		});
	}
	if cfg.retrieval.top_k == 0 {
		return Err(Error::Validation {
			message: "retrieval.top_k must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.evidence_cap == 0 {
		return Err(Error::Validation {
			message: "retrieval.evidence_cap must be greater than zero.".to_string(),
		});
	}

	let paths = &cfg.retrieval.paths;

	for (label, weight) in [
		("retrieval.paths.vector_weight", paths.vector_weight),
		("retrieval.paths.graph_weight", paths.graph_weight),
		("retrieval.paths.generated_query_weight", paths.generated_query_weight),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	let row_score = cfg.retrieval.text2cypher.row_score;

	if !row_score.is_finite() || !(0.0..=1.0).contains(&row_score) {
		return Err(Error::Validation {
			message: "retrieval.text2cypher.row_score must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.synthesis.max_chunk_chars == 0 {
		return Err(Error::Validation {
			message: "synthesis.max_chunk_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.synthesis.summary_chars == 0 {
		return Err(Error::Validation {
			message: "synthesis.summary_chars must be greater than zero.".to_string(),
		});
	}

	for (label, key) in
		[("embedding", &cfg.providers.embedding.api_key), ("llm", &cfg.providers.llm.api_key)]
	{
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.neo4j.database.as_deref().map(|db| db.trim().is_empty()).unwrap_or(false) {
		cfg.storage.neo4j.database = None;
	}

	cfg.providers.embedding.api_base = cfg.providers.embedding.api_base.trim_end_matches('/').to_string();
	cfg.providers.llm.api_base = cfg.providers.llm.api_base.trim_end_matches('/').to_string();
}
