use serde_json::json;

use newslens_service::{Error, NewsService, RetrievalPath, SearchRequest};

use super::{Behavior, Scripted, ScriptedLlm, StaticRetriever, evidence, reply, static_service};

fn two_article_service(llm: std::sync::Arc<ScriptedLlm>) -> NewsService {
	static_service(
		vec![StaticRetriever::new(
			RetrievalPath::Vector,
			Behavior::Records(vec![
				evidence(RetrievalPath::Vector, "eco-001", "0", 0.9),
				evidence(RetrievalPath::Vector, "eco-002", "0", 0.8),
			]),
		)],
		llm,
	)
}

fn request() -> SearchRequest {
	SearchRequest { query: "금리".to_string() }
}

#[tokio::test]
async fn malformed_reply_is_retried_with_stricter_prompt() {
	let retried = reply(json!([
		{ "title": "증시", "content": "코스피 상승.", "sourceIds": [2] },
		{ "title": "금리", "content": "기준금리 동결.", "sourceIds": [1, 2] }
	]));
	let llm = ScriptedLlm::new(
		None,
		vec![Scripted::Reply("Sure! Here is the answer: {".to_string()), Scripted::Reply(retried)],
	);
	let service = two_article_service(llm.clone());
	let response = service.search(request()).await.expect("Search must succeed.");

	assert_eq!(llm.synthesis_calls(), 2);
	assert_eq!(response.sections.len(), 2);
	assert_eq!(response.sections[0].title, "증시");
	assert_eq!(response.sections[0].source_ids, vec![1]);
	assert_eq!(response.sections[1].source_ids, vec![2, 1]);
	assert_eq!(response.sources[0].title, "title eco-002");
	assert_eq!(response.sources[1].title, "title eco-001");

	let prompts = llm.prompts.lock().expect("Prompt log poisoned.");

	assert!(!prompts[0].contains("could not be used"));
	assert!(prompts[1].contains("could not be used"));
}

#[tokio::test]
async fn unreachable_endpoint_on_both_attempts_is_an_error() {
	let llm = ScriptedLlm::new(None, vec![Scripted::Unreachable, Scripted::Unreachable]);
	let service = two_article_service(llm.clone());
	let err = service.search(request()).await.expect_err("Expected synthesis failure.");

	assert!(matches!(err, Error::SynthesisUnavailable { .. }), "Unexpected error: {err}");
	assert_eq!(llm.synthesis_calls(), 2);
}

#[tokio::test]
async fn timeout_then_unreachable_falls_back() {
	let llm = ScriptedLlm::new(None, vec![Scripted::Hang, Scripted::Unreachable]);
	let service = two_article_service(llm);
	let response = service.search(request()).await.expect("Fallback must not fail.");

	assert_eq!(response.sections.len(), 1);
	assert_eq!(response.sections[0].source_ids, vec![1, 2]);
}

#[tokio::test]
async fn two_unusable_replies_fall_back_to_all_evidence() {
	let llm = ScriptedLlm::new(
		None,
		vec![
			Scripted::Reply("not json".to_string()),
			Scripted::Reply(reply(json!([{ "title": "t", "content": "c", "sourceIds": [7] }]))),
		],
	);
	let service = two_article_service(llm.clone());
	let response = service.search(request()).await.expect("Fallback must not fail.");

	assert_eq!(llm.synthesis_calls(), 2);
	assert_eq!(response.sections.len(), 1);
	assert_eq!(response.sections[0].title, "검색 결과");
	assert_eq!(response.sections[0].source_ids, vec![1, 2]);
	assert!(response.sections[0].content.contains("[1] title eco-001"));
	assert_eq!(response.sources.len(), 2);
	assert_eq!(response.sources[0].summary, "chunk 0 of eco-001");
}
