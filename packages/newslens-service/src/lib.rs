pub mod aggregate;
pub mod evidence;
pub mod retrieval;
pub mod search;
pub mod synthesis;

mod error;

pub use error::{Error, Result};
pub use evidence::{EvidenceRecord, RetrievalPath};
pub use retrieval::{GraphRetriever, Retriever, Text2CypherRetriever, VectorRetriever};
pub use search::{SearchRequest, SearchResponse, Section, Source};
pub use synthesis::SynthesisEngine;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use newslens_config::{Config, EmbeddingProviderConfig, LlmProviderConfig};
use newslens_providers::{embedding, llm};
use newslens_storage::{
	graph::Neo4jStore,
	guard,
	models::{ArticleBundle, Row, VectorHit},
	schema::GraphSchema,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type ProviderResult<T> = newslens_providers::Result<T>;

pub type StoreResult<T> = newslens_storage::Result<T>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, ProviderResult<Vec<Vec<f32>>>>;
}

pub trait LlmProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, ProviderResult<String>>;
}

/// Read access to the news graph.
pub trait GraphStore
where
	Self: Send + Sync,
{
	fn vector_search<'a>(
		&'a self,
		embedding: &'a [f32],
		k: u32,
	) -> BoxFuture<'a, StoreResult<Vec<VectorHit>>>;

	fn expand<'a>(&'a self, chunk_id: &'a str) -> BoxFuture<'a, StoreResult<Option<ArticleBundle>>>;

	fn run_query<'a>(
		&'a self,
		cypher: &'a str,
		params: &'a Row,
	) -> BoxFuture<'a, StoreResult<Vec<Row>>>;

	/// Runs a query that did not originate in this crate. Anything the read-only guard refuses
	/// never reaches [`GraphStore::run_query`].
	fn run_generated_query<'a>(&'a self, cypher: &'a str) -> BoxFuture<'a, StoreResult<Vec<Row>>> {
		Box::pin(async move {
			guard::ensure_read_only(cypher)?;

			let params = Row::new();

			self.run_query(cypher, &params).await
		})
	}

	fn schema(&self) -> BoxFuture<'_, StoreResult<GraphSchema>>;

	fn ping(&self) -> BoxFuture<'_, StoreResult<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub llm: Arc<dyn LlmProvider>,
}
impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, llm: Arc<dyn LlmProvider>) -> Self {
		Self { embedding, llm }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), llm: provider }
	}
}

pub struct NewsService {
	pub cfg: Config,
	pub store: Arc<dyn GraphStore>,
	pub providers: Providers,
	retrievers: Vec<Arc<dyn Retriever>>,
	synthesis: SynthesisEngine,
}
impl NewsService {
	pub fn new(cfg: Config, store: Arc<dyn GraphStore>, schema_text: String) -> Self {
		Self::with_providers(cfg, store, Providers::default(), schema_text)
	}

	/// Wires the three retrieval paths. The generated-query path is left out when
	/// `retrieval.text2cypher.enabled` is false.
	pub fn with_providers(
		cfg: Config,
		store: Arc<dyn GraphStore>,
		providers: Providers,
		schema_text: String,
	) -> Self {
		let embedding_cfg = cfg.providers.embedding.clone();
		let mut retrievers: Vec<Arc<dyn Retriever>> = vec![
			Arc::new(VectorRetriever::new(
				store.clone(),
				providers.embedding.clone(),
				embedding_cfg.clone(),
			)),
			Arc::new(GraphRetriever::new(store.clone(), providers.embedding.clone(), embedding_cfg)),
		];

		if cfg.retrieval.text2cypher.enabled {
			retrievers.push(Arc::new(Text2CypherRetriever::new(
				store.clone(),
				providers.llm.clone(),
				cfg.providers.llm.clone(),
				schema_text,
				cfg.retrieval.text2cypher.row_score,
			)));
		}

		Self::with_retrievers(cfg, store, providers, retrievers)
	}

	pub fn with_retrievers(
		cfg: Config,
		store: Arc<dyn GraphStore>,
		providers: Providers,
		retrievers: Vec<Arc<dyn Retriever>>,
	) -> Self {
		let synthesis = SynthesisEngine::new(
			providers.llm.clone(),
			cfg.providers.llm.clone(),
			cfg.synthesis.clone(),
			cfg.presentation.clone(),
		);

		Self { cfg, store, providers, retrievers, synthesis }
	}

	pub fn retrievers(&self) -> &[Arc<dyn Retriever>] {
		&self.retrievers
	}
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, ProviderResult<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl LlmProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, ProviderResult<String>> {
		Box::pin(llm::complete(cfg, messages))
	}
}

impl GraphStore for Neo4jStore {
	fn vector_search<'a>(
		&'a self,
		embedding: &'a [f32],
		k: u32,
	) -> BoxFuture<'a, StoreResult<Vec<VectorHit>>> {
		Box::pin(Neo4jStore::vector_search(self, embedding, k))
	}

	fn expand<'a>(&'a self, chunk_id: &'a str) -> BoxFuture<'a, StoreResult<Option<ArticleBundle>>> {
		Box::pin(Neo4jStore::expand(self, chunk_id))
	}

	fn run_query<'a>(
		&'a self,
		cypher: &'a str,
		params: &'a Row,
	) -> BoxFuture<'a, StoreResult<Vec<Row>>> {
		Box::pin(Neo4jStore::run_query(self, cypher, params))
	}

	fn run_generated_query<'a>(&'a self, cypher: &'a str) -> BoxFuture<'a, StoreResult<Vec<Row>>> {
		Box::pin(async move {
			let params = Row::new();

			Neo4jStore::run_generated_query(self, cypher, &params).await
		})
	}

	fn schema(&self) -> BoxFuture<'_, StoreResult<GraphSchema>> {
		Box::pin(Neo4jStore::schema(self))
	}

	fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
		Box::pin(Neo4jStore::ping(self))
	}
}
