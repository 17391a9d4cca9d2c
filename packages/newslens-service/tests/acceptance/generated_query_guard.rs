use serde_json::json;

use newslens_service::SearchRequest;

use super::{Scripted, ScriptedLlm, fixture_service};

#[tokio::test]
async fn write_queries_never_reach_the_store() {
	let llm = ScriptedLlm::new(
		Some("```cypher\nMATCH (a:Article) DETACH DELETE a\n```"),
		vec![Scripted::Reply("not json".to_string()), Scripted::Reply("still not json".to_string())],
	);
	let (service, graph) = fixture_service(Vec::new(), llm);
	let response = service
		.search(SearchRequest { query: "한국은행 기준금리".to_string() })
		.await
		.expect("Search must succeed.");

	assert!(graph.executed().is_empty());
	assert!(!response.sources.is_empty());
}

#[tokio::test]
async fn read_query_rows_become_evidence() {
	let row = json!({
		"a.article_id": "extra-001",
		"a.title": "별도 기사",
		"a.url": "https://news.example.com/extra-001",
		"a.published_date": "2025-11-04",
	});
	let rows = vec![row.as_object().cloned().expect("Row must be an object.")];
	let llm = ScriptedLlm::new(
		Some(
			"MATCH (a:Article)-[:BELONGS_TO]->(c:Category {name: \"경제\"})\n\
			 RETURN a.article_id, a.title, a.url, a.published_date",
		),
		vec![Scripted::Reply("not json".to_string()), Scripted::Reply("still not json".to_string())],
	);
	let (service, graph) = fixture_service(rows, llm);
	let response = service
		.search(SearchRequest { query: "경제 분야 최신 뉴스".to_string() })
		.await
		.expect("Search must succeed.");

	assert_eq!(graph.executed().len(), 1);
	assert!(response.sources.iter().any(|source| source.title == "별도 기사"));

	let graph_sources =
		response.sources.iter().filter(|source| source.short_name != "unknown").count();

	assert!(graph_sources > 0);
}
