use std::time::Duration;

use futures::future;
use serde::{Deserialize, Serialize};
use tokio::time;
use tracing::Instrument;
use uuid::Uuid;

use crate::{Error, EvidenceRecord, NewsService, Result, RetrievalPath, aggregate};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub sections: Vec<Section>,
	pub sources: Vec<Source>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
	pub title: String,
	pub content: String,
	pub source_ids: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
	pub id: u32,
	pub short_name: String,
	pub title: String,
	pub category: String,
	pub date: String,
	pub url: String,
	pub summary: String,
	pub icon: String,
}

impl NewsService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must be non-empty.".to_string() });
		}

		let trace_id = Uuid::new_v4();

		self.run_search(query).instrument(tracing::info_span!("search", %trace_id)).await
	}

	async fn run_search(&self, query: &str) -> Result<SearchResponse> {
		let results = self.dispatch(query).await;
		let evidence = aggregate::aggregate(
			results,
			&self.cfg.retrieval.paths,
			self.cfg.retrieval.evidence_cap as usize,
		);

		tracing::info!(evidence = evidence.len(), "Evidence ready.");

		if evidence.is_empty() {
			return Ok(self.synthesis.no_results());
		}

		self.synthesis.synthesize(query, &evidence).await
	}

	/// Runs every configured retriever concurrently. A failing or late retriever contributes
	/// nothing.
	async fn dispatch(&self, query: &str) -> Vec<(RetrievalPath, Vec<EvidenceRecord>)> {
		let budget = Duration::from_millis(self.cfg.retrieval.timeout_ms);
		let top_k = self.cfg.retrieval.top_k;
		let runs = self.retrievers().iter().map(|retriever| async move {
			let path = retriever.path();
			let records = match time::timeout(budget, retriever.retrieve(query, top_k)).await {
				Ok(Ok(records)) => records,
				Ok(Err(err)) => {
					tracing::warn!(path = path.as_str(), error = %err, "Retrieval path failed.");

					Vec::new()
				},
				Err(_) => {
					tracing::warn!(
						path = path.as_str(),
						timeout_ms = self.cfg.retrieval.timeout_ms,
						"Retrieval path timed out."
					);

					Vec::new()
				},
			};

			tracing::debug!(path = path.as_str(), records = records.len(), "Retrieval path finished.");

			(path, records)
		});

		future::join_all(runs).await
	}
}
