//! The three retrieval paths behind one trait. Each turns a query into evidence records and
//! knows nothing about how the records are merged afterwards.

mod graph;
mod text2cypher;
mod vector;

pub use graph::GraphRetriever;
pub use text2cypher::Text2CypherRetriever;
pub use vector::VectorRetriever;

use newslens_config::EmbeddingProviderConfig;

use crate::{BoxFuture, EmbeddingProvider, Error, EvidenceRecord, Result, RetrievalPath};

pub trait Retriever
where
	Self: Send + Sync,
{
	fn path(&self) -> RetrievalPath;

	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<EvidenceRecord>>>;
}

pub(crate) async fn embed_query(
	provider: &dyn EmbeddingProvider,
	cfg: &EmbeddingProviderConfig,
	query: &str,
) -> Result<Vec<f32>> {
	let texts = vec![query.to_string()];
	let mut vectors = provider.embed(cfg, &texts).await?;

	if vectors.len() != 1 {
		return Err(Error::Provider {
			message: format!("Expected one query embedding, got {}.", vectors.len()),
		});
	}

	let vector = vectors.remove(0);

	if vector.len() != cfg.dimensions as usize {
		return Err(Error::Provider {
			message: format!(
				"Query embedding has {} dimensions, expected {}.",
				vector.len(),
				cfg.dimensions
			),
		});
	}

	Ok(vector)
}
