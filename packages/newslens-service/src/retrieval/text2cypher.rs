use std::sync::Arc;

use serde_json::Value;

use newslens_config::LlmProviderConfig;
use newslens_storage::models::Row;

use crate::{
	BoxFuture, EvidenceRecord, GraphStore, LlmProvider, Result, RetrievalPath, retrieval::Retriever,
};

const EXAMPLES: [(&str, &str); 5] = [
	(
		"경제 분야의 최신 뉴스 알려주세요",
		"MATCH (a:Article)-[:BELONGS_TO]->(c:Category {name: \"경제\"})\nRETURN a.article_id, a.title, a.url, a.published_date\nORDER BY a.published_date DESC\nLIMIT 10",
	),
	(
		"매일경제에서 나온 최신 뉴스 3개 보여주세요",
		"MATCH (m:Media {name: \"매일경제\"})-[:PUBLISHED]->(a:Article)\nRETURN a.article_id, a.title, a.url, a.published_date\nORDER BY a.published_date DESC\nLIMIT 3",
	),
	(
		"2025년 11월 1일 이후에 발행된 정치 관련 기사는 몇 개나 되나요?",
		"MATCH (a:Article)-[:BELONGS_TO]->(c:Category {name: \"정치\"})\nWHERE a.published_date >= \"2025-11-01\"\nRETURN count(a) AS article_count",
	),
	(
		"카테고리별 기사 개수를 알려주세요",
		"MATCH (a:Article)-[:BELONGS_TO]->(c:Category)\nRETURN c.name AS category, count(a) AS article_count\nORDER BY article_count DESC",
	),
	(
		"11월 2일에 발행된 기사 중 정치 분야는?",
		"MATCH (a:Article)-[:BELONGS_TO]->(c:Category {name: \"정치\"})\nWHERE a.published_date STARTS WITH \"2025-11-02\"\nRETURN a.article_id, a.title, a.url, a.published_date\nORDER BY a.published_date DESC",
	),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
	ArticleId,
	Title,
	Url,
	PublishedDate,
	Category,
	ShortName,
	ChunkText,
	ChunkId,
	Score,
}

/// Asks the model for a Cypher query, runs it through the read-only path and maps whatever
/// rows come back onto evidence records.
///
/// Failures of any kind yield an empty contribution.
pub struct Text2CypherRetriever {
	store: Arc<dyn GraphStore>,
	llm: Arc<dyn LlmProvider>,
	cfg: LlmProviderConfig,
	schema: String,
	row_score: f32,
}
impl Text2CypherRetriever {
	pub fn new(
		store: Arc<dyn GraphStore>,
		llm: Arc<dyn LlmProvider>,
		cfg: LlmProviderConfig,
		schema: String,
		row_score: f32,
	) -> Self {
		Self { store, llm, cfg, schema, row_score }
	}

	async fn run(&self, query: &str, top_k: u32) -> Result<Vec<EvidenceRecord>> {
		let messages = build_messages(&self.schema, query);
		let reply = match self.llm.complete(&self.cfg, &messages).await {
			Ok(reply) => reply,
			Err(err) => {
				tracing::warn!(error = %err, "Query translation failed.");

				return Ok(Vec::new());
			},
		};
		let cypher = strip_fences(&reply);

		tracing::debug!(%cypher, "Generated query.");

		let rows = match self.store.run_generated_query(&cypher).await {
			Ok(rows) => rows,
			Err(err) => {
				tracing::warn!(error = %err, "Generated query failed.");

				return Ok(Vec::new());
			},
		};

		Ok(rows
			.iter()
			.take(top_k as usize)
			.map(|row| row_to_record(row, self.row_score))
			.collect())
	}
}

impl Retriever for Text2CypherRetriever {
	fn path(&self) -> RetrievalPath {
		RetrievalPath::GeneratedQuery
	}

	fn retrieve<'a>(
		&'a self,
		query: &'a str,
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<EvidenceRecord>>> {
		Box::pin(self.run(query, top_k))
	}
}

fn build_messages(schema: &str, query: &str) -> Vec<Value> {
	let mut system = String::from(
		"You translate questions about a Korean news graph into a single read-only Cypher query.\n\
Use only the labels, relationship types and properties in the schema below.\n\
Never write to the graph: no CREATE, MERGE, SET, DELETE, REMOVE, DROP or CALL.\n\
Reply with the query only, without explanations or code fences.\n\n",
	);

	system.push_str(schema.trim());
	system.push_str("\n\nExamples:\n");

	for (question, cypher) in EXAMPLES {
		system.push_str(&format!("USER INPUT: {question}\nCYPHER QUERY:\n{cypher}\n\n"));
	}

	vec![
		serde_json::json!({ "role": "system", "content": system }),
		serde_json::json!({ "role": "user", "content": format!("USER INPUT: {query}\nCYPHER QUERY:") }),
	]
}

/// Removes Markdown fences and leading labels the model sometimes wraps around the query.
fn strip_fences(reply: &str) -> String {
	let mut text = reply.trim();

	if let Some(rest) = text.strip_prefix("```") {
		let rest = rest.strip_prefix("cypher").or_else(|| rest.strip_prefix("Cypher")).unwrap_or(rest);

		text = rest.strip_suffix("```").unwrap_or(rest);
	}

	let text = text.trim();
	let text = text
		.strip_prefix("CYPHER QUERY:")
		.or_else(|| text.strip_prefix("Cypher:"))
		.unwrap_or(text);

	text.trim().to_string()
}

fn field_for(key: &str) -> Option<Field> {
	let key = key.rsplit('.').next().unwrap_or(key).trim().to_ascii_lowercase();
	let field = match key.as_str() {
		"article_id" | "id" => Field::ArticleId,
		"title" | "article_title" => Field::Title,
		"url" | "article_url" => Field::Url,
		"published_date" | "date" | "article_date" => Field::PublishedDate,
		"category" | "category_name" => Field::Category,
		"media" | "media_name" | "outlet" | "source" | "short_name" => Field::ShortName,
		"chunk" | "content" | "text" => Field::ChunkText,
		"content_id" | "chunk_id" => Field::ChunkId,
		"score" | "similarity_score" => Field::Score,
		_ => return None,
	};

	Some(field)
}

fn value_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()).filter(|text| !text.trim().is_empty()),
		other => Some(other.to_string()),
	}
}

fn row_to_record(row: &Row, row_score: f32) -> EvidenceRecord {
	let mut record = EvidenceRecord::new(RetrievalPath::GeneratedQuery, row_score);
	let mut unmapped = Vec::new();

	for (key, value) in row {
		let Some(field) = field_for(key) else {
			if let Some(text) = value_text(value) {
				unmapped.push(format!("{key}: {text}"));
			}

			continue;
		};
		let text = value_text(value);

		match field {
			Field::ArticleId => record.article_id = text,
			Field::Title => record.title = text,
			Field::Url => record.url = text,
			Field::PublishedDate => record.published_date = text,
			Field::Category => record.category = text,
			Field::ShortName => record.short_name = text,
			Field::ChunkText => record.chunk_text = text.unwrap_or_default(),
			Field::ChunkId => record.chunk_id = text,
			// The configured score applies to every row.
			Field::Score => {},
		}
	}

	if record.chunk_text.is_empty() && !unmapped.is_empty() {
		record.chunk_text = unmapped.join(", ");
	}

	record
}
