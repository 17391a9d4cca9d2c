mod corpus;

pub use corpus::{FixtureArticle, corpus};

use std::env;

use uuid::Uuid;

/// Connection settings for a disposable Neo4j instance used by ignored tests.
pub struct Neo4jEnv {
	pub uri: String,
	pub user: String,
	pub password: String,
}

/// Reads `NEWSLENS_NEO4J_URI` plus optional `NEWSLENS_NEO4J_USER` and `NEWSLENS_NEO4J_PASSWORD`.
pub fn env_neo4j() -> Option<Neo4jEnv> {
	let uri = env::var("NEWSLENS_NEO4J_URI").ok().filter(|uri| !uri.trim().is_empty())?;
	let user = env::var("NEWSLENS_NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
	let password = env::var("NEWSLENS_NEO4J_PASSWORD").unwrap_or_else(|_| "password".to_string());

	Some(Neo4jEnv { uri, user, password })
}

/// A short prefix that keeps ids written by one test run apart from another's.
pub fn run_prefix() -> String {
	format!("t{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Deterministic embedding: character counts hashed into `dim` buckets, L2-normalized.
///
/// Texts sharing many characters land close together, which is enough to make nearest-neighbor
/// results predictable in tests.
pub fn hash_embedding(text: &str, dim: usize) -> Vec<f32> {
	let mut vec = vec![0.0_f32; dim.max(1)];

	for c in text.chars().filter(|c| !c.is_whitespace()) {
		let bucket = (u64::from(u32::from(c)).wrapping_mul(2_654_435_761) % vec.len() as u64) as usize;

		vec[bucket] += 1.0;
	}

	let norm = vec.iter().map(|v| v * v).sum::<f32>().sqrt();

	if norm > 0.0 {
		for v in &mut vec {
			*v /= norm;
		}
	}

	vec
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
	let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
	let na = a.iter().map(|v| v * v).sum::<f32>().sqrt();
	let nb = b.iter().map(|v| v * v).sum::<f32>().sqrt();

	if na == 0.0 || nb == 0.0 { 0.0 } else { dot / (na * nb) }
}
