//! Turns aggregated evidence into the sectioned, cited answer.

mod parse;
mod prompt;

use std::{sync::Arc, time::Duration};

use tokio::time;
use unicode_segmentation::UnicodeSegmentation;

use newslens_config::{LlmProviderConfig, Presentation, Synthesis};

use crate::{
	Error, EvidenceRecord, LlmProvider, Result,
	search::{SearchResponse, Section, Source},
	synthesis::parse::DraftReply,
};

const MAX_ATTEMPTS: usize = 2;

pub struct SynthesisEngine {
	llm: Arc<dyn LlmProvider>,
	llm_cfg: LlmProviderConfig,
	synthesis: Synthesis,
	presentation: Presentation,
}
impl SynthesisEngine {
	pub fn new(
		llm: Arc<dyn LlmProvider>,
		llm_cfg: LlmProviderConfig,
		synthesis: Synthesis,
		presentation: Presentation,
	) -> Self {
		Self { llm, llm_cfg, synthesis, presentation }
	}

	/// Makes up to two model calls, the second with a stricter formatting instruction.
	///
	/// An unusable or late reply leads to a generic section citing every record. Only an
	/// endpoint that could not be reached on both attempts is an error.
	pub async fn synthesize(
		&self,
		query: &str,
		evidence: &[EvidenceRecord],
	) -> Result<SearchResponse> {
		let budget = Duration::from_millis(self.synthesis.timeout_ms);
		let mut unreachable = 0;
		let mut last_error = String::new();

		for attempt in 0..MAX_ATTEMPTS {
			let messages = prompt::build_messages(
				query,
				evidence,
				self.synthesis.max_chunk_chars as usize,
				attempt > 0,
			);

			match time::timeout(budget, self.llm.complete(&self.llm_cfg, &messages)).await {
				Err(_) => {
					tracing::warn!(
						attempt,
						timeout_ms = self.synthesis.timeout_ms,
						"Synthesis attempt timed out."
					);
				},
				Ok(Err(err)) => {
					if err.is_unavailable() {
						unreachable += 1;
					}

					tracing::warn!(
						attempt,
						provider = %self.llm_cfg.provider_id,
						timeout = err.is_timeout(),
						error = %err,
						"Synthesis attempt failed."
					);

					last_error = err.to_string();
				},
				Ok(Ok(text)) => match parse::parse_reply(&text, evidence.len()) {
					Ok(reply) => return Ok(self.assemble(reply, evidence)),
					Err(err) => {
						tracing::warn!(attempt, error = %err, "Synthesis reply rejected.");
					},
				},
			}
		}

		if unreachable == MAX_ATTEMPTS {
			return Err(Error::SynthesisUnavailable { message: last_error });
		}

		tracing::warn!(evidence = evidence.len(), "Falling back to a generic section.");

		Ok(self.fallback(evidence))
	}

	/// The answer for a query that produced no evidence at all.
	pub fn no_results(&self) -> SearchResponse {
		SearchResponse {
			sections: vec![Section {
				title: self.presentation.no_results_title.clone(),
				content: self.presentation.no_results_content.clone(),
				source_ids: Vec::new(),
			}],
			sources: Vec::new(),
		}
	}

	fn assemble(&self, reply: DraftReply, evidence: &[EvidenceRecord]) -> SearchResponse {
		// Evidence index to final source id, in order of first citation.
		let mut order: Vec<usize> = Vec::new();
		let mut sections = Vec::with_capacity(reply.sections.len());

		for draft in reply.sections {
			let mut source_ids = Vec::with_capacity(draft.evidence.len());

			for idx in draft.evidence {
				let position = match order.iter().position(|seen| *seen == idx) {
					Some(position) => position,
					None => {
						order.push(idx);

						order.len() - 1
					},
				};

				source_ids.push(position as u32 + 1);
			}

			sections.push(Section { title: draft.title, content: draft.content, source_ids });
		}

		let sources = order
			.iter()
			.enumerate()
			.map(|(position, idx)| {
				self.source(position as u32 + 1, &evidence[*idx], reply.summaries.get(idx).cloned())
			})
			.collect();

		SearchResponse { sections, sources }
	}

	fn fallback(&self, evidence: &[EvidenceRecord]) -> SearchResponse {
		let sources: Vec<Source> = evidence
			.iter()
			.enumerate()
			.map(|(position, record)| self.source(position as u32 + 1, record, None))
			.collect();
		let content = sources
			.iter()
			.map(|source| {
				if source.summary.is_empty() {
					format!("[{}] {}", source.id, source.title)
				} else {
					format!("[{}] {}: {}", source.id, source.title, source.summary)
				}
			})
			.collect::<Vec<_>>()
			.join("\n");

		SearchResponse {
			sections: vec![Section {
				title: self.presentation.fallback_title.clone(),
				content,
				source_ids: sources.iter().map(|source| source.id).collect(),
			}],
			sources,
		}
	}

	fn source(&self, id: u32, record: &EvidenceRecord, summary: Option<String>) -> Source {
		let presentation = &self.presentation;
		let category = record
			.category
			.clone()
			.filter(|category| !category.trim().is_empty())
			.unwrap_or_else(|| presentation.default_category.clone());
		let icon = record
			.outlet_icon
			.clone()
			.filter(|icon| !icon.trim().is_empty())
			.or_else(|| presentation.category_icons.get(&category).cloned())
			.unwrap_or_else(|| presentation.default_icon.clone());
		let summary = summary
			.unwrap_or_else(|| truncate(&record.chunk_text, self.synthesis.summary_chars as usize));

		Source {
			id,
			short_name: record
				.short_name
				.clone()
				.filter(|name| !name.trim().is_empty())
				.unwrap_or_else(|| presentation.default_short_name.clone()),
			title: record.title.clone().unwrap_or_default(),
			category,
			date: record.published_date.clone().unwrap_or_default(),
			url: record.url.clone().unwrap_or_default(),
			summary,
			icon,
		}
	}
}

/// Cuts `text` to at most `max` grapheme clusters, marking the cut with `...`.
pub(crate) fn truncate(text: &str, max: usize) -> String {
	let text = text.trim();

	match text.grapheme_indices(true).nth(max) {
		Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
		None => text.to_string(),
	}
}
