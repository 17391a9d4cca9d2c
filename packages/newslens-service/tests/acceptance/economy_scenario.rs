use serde_json::json;

use newslens_service::{EvidenceRecord, RetrievalPath, SearchRequest};

use super::{Behavior, Scripted, ScriptedLlm, StaticRetriever, evidence, reply, static_service};

fn enriched(record: &EvidenceRecord) -> EvidenceRecord {
	let mut record = record.clone();

	record.path = RetrievalPath::Graph;
	record.short_name = Some("매일경제".to_string());
	record.category = Some("경제".to_string());
	record.published_date = Some("2025-11-03".to_string());
	record.related_titles = vec!["수출 증가세 석 달째 이어져".to_string()];

	record
}

#[tokio::test]
async fn economy_query_cites_graph_versions_of_both_articles() {
	let vector = vec![
		evidence(RetrievalPath::Vector, "eco-001", "0", 0.91),
		evidence(RetrievalPath::Vector, "eco-001", "1", 0.88),
		evidence(RetrievalPath::Vector, "eco-002", "0", 0.85),
	];
	let graph: Vec<EvidenceRecord> = vector.iter().map(enriched).collect();
	let llm = ScriptedLlm::new(
		None,
		vec![Scripted::Reply(reply(json!([
			{ "title": "경제 동향", "content": "금리 동결과 증시 상승 소식입니다.", "sourceIds": [1, 2] }
		])))],
	);
	let service = static_service(
		vec![
			StaticRetriever::new(RetrievalPath::Vector, Behavior::Records(vector)),
			StaticRetriever::new(RetrievalPath::Graph, Behavior::Records(graph)),
			StaticRetriever::new(RetrievalPath::GeneratedQuery, Behavior::Stall),
		],
		llm.clone(),
	);
	let response = service
		.search(SearchRequest { query: "경제 분야 최신 뉴스".to_string() })
		.await
		.expect("Search must succeed.");

	assert!(!response.sections.is_empty());
	assert_eq!(response.sections[0].source_ids, vec![1, 2]);
	assert_eq!(response.sources.len(), 2);
	assert_eq!(response.sources[0].id, 1);
	assert_eq!(response.sources[0].title, "title eco-001");
	assert_eq!(response.sources[1].id, 2);
	assert_eq!(response.sources[1].title, "title eco-002");

	for source in &response.sources {
		assert_eq!(source.short_name, "매일경제");
		assert_eq!(source.category, "경제");
		assert_eq!(source.icon, "💼");
	}

	assert_eq!(llm.synthesis_calls(), 1);
}
