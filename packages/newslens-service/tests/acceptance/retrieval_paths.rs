use std::sync::Arc;

use newslens_service::{
	BoxFuture, EvidenceRecord, GraphRetriever, GraphStore, Retriever, StoreResult, VectorRetriever,
};
use newslens_storage::{
	models::{Article, ArticleBundle, Row, VectorHit},
	schema::GraphSchema,
};

use super::{HashEmbedding, test_config};

const ORPHAN: &str = "orphan_0";
const BROKEN: &str = "broken_0";

/// Returns the same four hits for every search regardless of `k`. Expanding [`ORPHAN`] finds no
/// article and expanding [`BROKEN`] fails.
struct PatchyGraph;
impl GraphStore for PatchyGraph {
	fn vector_search<'a>(
		&'a self,
		_embedding: &'a [f32],
		_k: u32,
	) -> BoxFuture<'a, StoreResult<Vec<VectorHit>>> {
		let hits = ["eco-001_0", ORPHAN, BROKEN, "eco-002_0"]
			.into_iter()
			.enumerate()
			.map(|(rank, chunk_id)| VectorHit {
				chunk_id: chunk_id.to_string(),
				score: 0.9 - rank as f32 * 0.1,
				text: format!("text of {chunk_id}"),
				article_id: None,
				title: None,
				url: None,
				published_date: None,
			})
			.collect();

		Box::pin(async move { Ok(hits) })
	}

	fn expand<'a>(&'a self, chunk_id: &'a str) -> BoxFuture<'a, StoreResult<Option<ArticleBundle>>> {
		Box::pin(async move {
			match chunk_id {
				ORPHAN => Ok(None),
				BROKEN => Err(newslens_storage::Error::Unavailable("connection reset".to_string())),
				_ => {
					let article_id = chunk_id.trim_end_matches("_0").to_string();

					Ok(Some(ArticleBundle {
						article: Article {
							url: Some(format!("https://news.example.com/{article_id}")),
							article_id,
							title: None,
							published_date: None,
						},
						outlet: None,
						category: None,
						related: Vec::new(),
					}))
				},
			}
		})
	}

	fn run_query<'a>(
		&'a self,
		_cypher: &'a str,
		_params: &'a Row,
	) -> BoxFuture<'a, StoreResult<Vec<Row>>> {
		Box::pin(async move { Ok(Vec::new()) })
	}

	fn schema(&self) -> BoxFuture<'_, StoreResult<GraphSchema>> {
		Box::pin(async move { Ok(GraphSchema::default()) })
	}

	fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
		Box::pin(async move { Ok(()) })
	}
}

fn chunk_ids(records: &[EvidenceRecord]) -> Vec<&str> {
	records.iter().filter_map(|record| record.chunk_id.as_deref()).collect()
}

fn graph_retriever() -> GraphRetriever {
	GraphRetriever::new(
		Arc::new(PatchyGraph),
		Arc::new(HashEmbedding),
		test_config().providers.embedding,
	)
}

#[tokio::test]
async fn graph_path_skips_orphaned_and_failed_expansions() {
	let records = graph_retriever().retrieve("경제 뉴스", 10).await.expect("Retrieval failed.");

	assert_eq!(chunk_ids(&records), vec!["eco-001_0", "eco-002_0"]);
	assert_eq!(records[0].article_id.as_deref(), Some("eco-001"));
	assert_eq!(records[1].url.as_deref(), Some("https://news.example.com/eco-002"));
}

#[tokio::test]
async fn graph_path_expands_only_the_top_k_hits() {
	let records = graph_retriever().retrieve("경제 뉴스", 2).await.expect("Retrieval failed.");

	assert_eq!(chunk_ids(&records), vec!["eco-001_0"]);
}

#[tokio::test]
async fn vector_path_is_bounded_by_top_k() {
	let retriever = VectorRetriever::new(
		Arc::new(PatchyGraph),
		Arc::new(HashEmbedding),
		test_config().providers.embedding,
	);
	let records = retriever.retrieve("경제 뉴스", 2).await.expect("Retrieval failed.");

	assert_eq!(chunk_ids(&records), vec!["eco-001_0", ORPHAN]);
	assert!(records.iter().all(|record| record.category.is_none()));

	let records = retriever.retrieve("경제 뉴스", 10).await.expect("Retrieval failed.");

	assert_eq!(records.len(), 4);
}
