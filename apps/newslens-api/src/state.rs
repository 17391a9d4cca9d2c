use std::sync::Arc;

use newslens_service::NewsService;
use newslens_storage::graph::Neo4jStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<NewsService>,
}
impl AppState {
	/// Connects to Neo4j and reads the graph schema once for the query generator.
	///
	/// A schema read failure is logged and leaves the generator with an empty schema.
	pub async fn new(config: newslens_config::Config) -> color_eyre::Result<Self> {
		let store = Neo4jStore::connect(&config.storage.neo4j).await?;
		let schema = match store.schema().await {
			Ok(schema) => schema.render(),
			Err(err) => {
				tracing::warn!(error = %err, "Failed to read graph schema.");

				String::new()
			},
		};

		tracing::info!(schema_chars = schema.len(), "Graph store connected.");

		Ok(Self::from_service(NewsService::new(config, Arc::new(store), schema)))
	}

	pub fn from_service(service: NewsService) -> Self {
		Self { service: Arc::new(service) }
	}
}
