use newslens_service::{Error, RetrievalPath, SearchRequest};

use super::{Behavior, Scripted, ScriptedLlm, StaticRetriever, evidence, static_service};

fn request(query: &str) -> SearchRequest {
	SearchRequest { query: query.to_string() }
}

#[tokio::test]
async fn empty_evidence_yields_single_no_results_section() {
	let llm = ScriptedLlm::new(None, Vec::new());
	let service = static_service(
		vec![
			StaticRetriever::new(RetrievalPath::Vector, Behavior::Records(Vec::new())),
			StaticRetriever::new(RetrievalPath::Graph, Behavior::Fail),
			StaticRetriever::new(RetrievalPath::GeneratedQuery, Behavior::Stall),
		],
		llm.clone(),
	);
	let response = service.search(request("없는 주제")).await.expect("Search must not fail.");

	assert_eq!(response.sections.len(), 1);
	assert_eq!(response.sections[0].title, "검색 결과 없음");
	assert!(response.sections[0].source_ids.is_empty());
	assert!(response.sources.is_empty());
	assert_eq!(llm.synthesis_calls(), 0);
}

#[tokio::test]
async fn one_failing_path_still_yields_sources() {
	let llm = ScriptedLlm::new(None, vec![Scripted::Reply("garbage".to_string())]);
	let service = static_service(
		vec![
			StaticRetriever::new(RetrievalPath::Vector, Behavior::Fail),
			StaticRetriever::new(
				RetrievalPath::Graph,
				Behavior::Records(vec![evidence(RetrievalPath::Graph, "pol-001", "0", 0.7)]),
			),
			StaticRetriever::new(RetrievalPath::GeneratedQuery, Behavior::Stall),
		],
		llm,
	);
	let response = service.search(request("국회 예산안")).await.expect("Search must not fail.");

	assert!(!response.sources.is_empty());
	assert_eq!(response.sources[0].title, "title pol-001");
}

#[tokio::test]
async fn blank_query_is_rejected() {
	let llm = ScriptedLlm::new(None, Vec::new());
	let service = static_service(Vec::new(), llm);
	let err = service.search(request("   ")).await.expect_err("Expected invalid request.");

	assert!(matches!(err, Error::InvalidRequest { .. }), "Unexpected error: {err}");
}
