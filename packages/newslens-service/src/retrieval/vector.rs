use std::sync::Arc;

use newslens_config::EmbeddingProviderConfig;
use newslens_storage::models::VectorHit;

use crate::{
	BoxFuture, EmbeddingProvider, EvidenceRecord, GraphStore, Result, RetrievalPath,
	retrieval::{self, Retriever},
};

/// Nearest chunks by embedding similarity, carrying only what the chunk itself stores.
pub struct VectorRetriever {
	store: Arc<dyn GraphStore>,
	embedding: Arc<dyn EmbeddingProvider>,
	cfg: EmbeddingProviderConfig,
}
impl VectorRetriever {
	pub fn new(
		store: Arc<dyn GraphStore>,
		embedding: Arc<dyn EmbeddingProvider>,
		cfg: EmbeddingProviderConfig,
	) -> Self {
		Self { store, embedding, cfg }
	}

	async fn run(&self, query: &str, top_k: u32) -> Result<Vec<EvidenceRecord>> {
		let embedding = retrieval::embed_query(self.embedding.as_ref(), &self.cfg, query).await?;
		let hits = self.store.vector_search(&embedding, top_k).await?;

		Ok(hits.into_iter().take(top_k as usize).map(hit_to_record).collect())
	}
}

impl Retriever for VectorRetriever {
	fn path(&self) -> RetrievalPath {
		RetrievalPath::Vector
	}

	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<EvidenceRecord>>> {
		Box::pin(self.run(query, top_k))
	}
}

fn hit_to_record(hit: VectorHit) -> EvidenceRecord {
	let mut record = EvidenceRecord::new(RetrievalPath::Vector, hit.score);

	record.article_id = hit.article_id;
	record.url = hit.url;
	record.title = hit.title;
	record.published_date = hit.published_date;
	record.chunk_id = Some(hit.chunk_id);
	record.chunk_text = hit.text;

	record
}
