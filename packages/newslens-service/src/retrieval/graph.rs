use std::sync::Arc;

use futures::future;

use newslens_config::EmbeddingProviderConfig;
use newslens_storage::models::{ArticleBundle, VectorHit};

use crate::{
	BoxFuture, EmbeddingProvider, EvidenceRecord, GraphStore, Result, RetrievalPath,
	retrieval::{self, Retriever},
};

/// Vector search followed by a fixed traversal from each hit to its article, outlet, category
/// and same-category neighbors.
pub struct GraphRetriever {
	store: Arc<dyn GraphStore>,
	embedding: Arc<dyn EmbeddingProvider>,
	cfg: EmbeddingProviderConfig,
}
impl GraphRetriever {
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
		let hits: Vec<VectorHit> = hits.into_iter().take(top_k as usize).collect();
		let bundles =
			future::join_all(hits.iter().map(|hit| self.store.expand(&hit.chunk_id))).await;
		let mut records = Vec::with_capacity(hits.len());

		for (hit, bundle) in hits.into_iter().zip(bundles) {
			match bundle {
				Ok(Some(bundle)) => records.push(merge(hit, bundle)),
				Ok(None) => {
					tracing::debug!(chunk_id = %hit.chunk_id, "Skipping chunk without an owning article.");
				},
				Err(err) => {
					tracing::warn!(chunk_id = %hit.chunk_id, error = %err, "Graph expansion failed.");
				},
			}
		}

		Ok(records)
	}
}

impl Retriever for GraphRetriever {
	fn path(&self) -> RetrievalPath {
		RetrievalPath::Graph
	}

	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<EvidenceRecord>>> {
		Box::pin(self.run(query, top_k))
	}
}

fn merge(hit: VectorHit, bundle: ArticleBundle) -> EvidenceRecord {
	let ArticleBundle { article, outlet, category, related } = bundle;
	let mut record = EvidenceRecord::new(RetrievalPath::Graph, hit.score);

	record.article_id = Some(article.article_id);
	record.url = article.url.or(hit.url);
	record.title = article.title.or(hit.title);
	record.published_date = article.published_date.or(hit.published_date);
	record.category = category.map(|category| category.name);
	record.chunk_id = Some(hit.chunk_id);
	record.chunk_text = hit.text;
	record.related_titles = related.into_iter().filter_map(|article| article.title).collect();

	if let Some(outlet) = outlet {
		record.short_name = Some(outlet.name);
		record.outlet_icon = outlet.icon;
	}

	record
}
