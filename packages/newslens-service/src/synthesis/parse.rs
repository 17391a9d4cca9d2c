use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawReply {
	#[serde(default)]
	sections: Vec<RawSection>,
	#[serde(default)]
	sources: Vec<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
	#[serde(default)]
	title: String,
	#[serde(default)]
	content: String,
	#[serde(default, rename = "sourceIds", alias = "source_ids")]
	source_ids: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
	#[serde(default)]
	id: Value,
	#[serde(default)]
	summary: String,
}

#[derive(Debug)]
pub(crate) struct DraftSection {
	pub(crate) title: String,
	pub(crate) content: String,
	/// Zero-based evidence indices, deduplicated, in citation order.
	pub(crate) evidence: Vec<usize>,
}

#[derive(Debug)]
pub(crate) struct DraftReply {
	pub(crate) sections: Vec<DraftSection>,
	pub(crate) summaries: HashMap<usize, String>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ReplyError {
	#[error("Reply is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
	#[error("Reply has no sections.")]
	NoSections,
	#[error("Reply cites none of the supplied evidence.")]
	NoCitations,
}

/// Parses a model reply against the section schema, keeping only citations of the
/// `evidence_len` supplied records.
pub(crate) fn parse_reply(text: &str, evidence_len: usize) -> Result<DraftReply, ReplyError> {
	let raw: RawReply = serde_json::from_str(json_body(text))?;
	let sections: Vec<DraftSection> = raw
		.sections
		.into_iter()
		.filter(|section| !section.title.trim().is_empty() || !section.content.trim().is_empty())
		.map(|section| {
			let mut evidence = Vec::new();

			for idx in section.source_ids.iter().filter_map(|id| evidence_index(id, evidence_len)) {
				if !evidence.contains(&idx) {
					evidence.push(idx);
				}
			}

			DraftSection {
				title: section.title.trim().to_string(),
				content: section.content.trim().to_string(),
				evidence,
			}
		})
		.collect();

	if sections.is_empty() {
		return Err(ReplyError::NoSections);
	}
	if sections.iter().all(|section| section.evidence.is_empty()) {
		return Err(ReplyError::NoCitations);
	}

	let summaries = raw
		.sources
		.into_iter()
		.filter_map(|source| {
			let idx = evidence_index(&source.id, evidence_len)?;
			let summary = source.summary.trim();

			(!summary.is_empty()).then(|| (idx, summary.to_string()))
		})
		.collect();

	Ok(DraftReply { sections, summaries })
}

// One-based id as written by the model, to a zero-based index.
fn evidence_index(id: &Value, evidence_len: usize) -> Option<usize> {
	let id = match id {
		Value::Number(number) => number.as_u64()?,
		Value::String(text) => text.trim().trim_start_matches('[').trim_end_matches(']').parse().ok()?,
		_ => return None,
	};
	let id = usize::try_from(id).ok()?;

	(1..=evidence_len).contains(&id).then(|| id - 1)
}

fn json_body(text: &str) -> &str {
	let mut body = text.trim();

	if let Some(rest) = body.strip_prefix("```") {
		let rest = rest.strip_prefix("json").unwrap_or(rest);

		body = rest.strip_suffix("```").unwrap_or(rest).trim();
	}

	match (body.find('{'), body.rfind('}')) {
		(Some(start), Some(end)) if start < end => &body[start..=end],
		_ => body,
	}
}
