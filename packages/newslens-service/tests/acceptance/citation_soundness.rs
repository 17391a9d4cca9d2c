use std::collections::HashSet;

use serde_json::json;

use newslens_service::{RetrievalPath, SearchRequest};

use super::{Behavior, Scripted, ScriptedLlm, StaticRetriever, evidence, static_service};

#[tokio::test]
async fn citations_resolve_and_sources_follow_first_reference() {
	let records = vec![
		evidence(RetrievalPath::Vector, "a-1", "0", 0.9),
		evidence(RetrievalPath::Vector, "a-2", "0", 0.8),
		evidence(RetrievalPath::Vector, "a-3", "0", 0.7),
	];
	let payload = json!({
		"sections": [
			{ "title": "first", "content": "uses three then one", "sourceIds": [3, 99, 1, 3] },
			{ "title": "second", "content": "uses one", "sourceIds": [1] }
		],
		"sources": [
			{ "id": 3, "summary": "model summary for three" },
			{ "id": 99, "summary": "invented" }
		]
	});
	let llm = ScriptedLlm::new(None, vec![Scripted::Reply(format!("```json\n{payload}\n```"))]);
	let service = static_service(
		vec![StaticRetriever::new(RetrievalPath::Vector, Behavior::Records(records))],
		llm,
	);
	let response = service
		.search(SearchRequest { query: "anything".to_string() })
		.await
		.expect("Search must succeed.");
	let ids: HashSet<u32> = response.sources.iter().map(|source| source.id).collect();

	assert_eq!(response.sections[0].source_ids, vec![1, 2]);
	assert_eq!(response.sections[1].source_ids, vec![2]);
	assert_eq!(ids.len(), response.sources.len());

	for section in &response.sections {
		for id in &section.source_ids {
			assert!(ids.contains(id), "Dangling citation {id}.");
		}
	}

	assert_eq!(response.sources.len(), 2);
	assert_eq!(response.sources[0].title, "title a-3");
	assert_eq!(response.sources[0].summary, "model summary for three");
	assert_eq!(response.sources[1].title, "title a-1");
	assert_eq!(response.sources[1].summary, "chunk 0 of a-1");
	assert_eq!(response.sources[1].short_name, "unknown");
	assert_eq!(response.sources[1].category, "기타");
	assert_eq!(response.sources[1].icon, "📰");
	assert_eq!(response.sources[1].url, "https://news.example.com/a-1");
}
