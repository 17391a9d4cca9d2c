use serde_json::Value;

use crate::{EvidenceRecord, synthesis};

const REPLY_SCHEMA: &str = r#"{
  "sections": [
    { "title": "string", "content": "string", "sourceIds": [1] }
  ],
  "sources": [
    { "id": 1, "summary": "one line" }
  ]
}"#;

pub(crate) fn build_messages(
	query: &str,
	evidence: &[EvidenceRecord],
	max_chunk_chars: usize,
	strict: bool,
) -> Vec<Value> {
	let mut system = String::from(
		"You are a news assistant. Answer the question using only the numbered evidence.\n\
Group the answer into sections. Every section cites the evidence it relies on by number in \
sourceIds. Cite only numbers that appear in the evidence list. Do not guess beyond the evidence.\n\
Write a one-line summary for every cited number in sources.\n\
Answer in the language of the question.\n\
Reply with JSON matching this schema:\n",
	);

	system.push_str(REPLY_SCHEMA);

	if strict {
		system.push_str(
			"\n\nThe previous reply could not be used. Reply with the JSON object only: no prose, \
no Markdown, no code fences. sourceIds must be integers between 1 and ",
		);
		system.push_str(&evidence.len().to_string());
		system.push('.');
	}

	let user = format!("Question: {query}\n\nEvidence:\n{}", render_evidence(evidence, max_chunk_chars));

	vec![
		serde_json::json!({ "role": "system", "content": system }),
		serde_json::json!({ "role": "user", "content": user }),
	]
}

fn render_evidence(evidence: &[EvidenceRecord], max_chunk_chars: usize) -> String {
	let mut out = String::new();

	for (idx, record) in evidence.iter().enumerate() {
		out.push_str(&format!("[{}] {}\n", idx + 1, record.title.as_deref().unwrap_or("")));

		let meta: Vec<String> = [
			("outlet", record.short_name.as_deref()),
			("category", record.category.as_deref()),
			("date", record.published_date.as_deref()),
			("url", record.url.as_deref()),
		]
		.into_iter()
		.filter_map(|(label, value)| value.map(|value| format!("{label}: {value}")))
		.collect();

		if !meta.is_empty() {
			out.push_str(&meta.join(" | "));
			out.push('\n');
		}
		if !record.chunk_text.is_empty() {
			out.push_str(&synthesis::truncate(&record.chunk_text, max_chunk_chars));
			out.push('\n');
		}
		if !record.related_titles.is_empty() {
			out.push_str("related: ");
			out.push_str(&record.related_titles.join("; "));
			out.push('\n');
		}

		out.push('\n');
	}

	out
}
