use std::{cmp::Ordering, collections::HashMap};

use newslens_config::RetrievalPaths;

use crate::{EvidenceRecord, RetrievalPath};

struct Ranked {
	record: EvidenceRecord,
	rank: f32,
	priority: u32,
	seq: usize,
}
impl Ranked {
	// Higher rank first, then higher path priority, then earlier arrival.
	fn cmp_desc(&self, other: &Self) -> Ordering {
		other
			.rank
			.total_cmp(&self.rank)
			.then_with(|| other.priority.cmp(&self.priority))
			.then_with(|| self.seq.cmp(&other.seq))
	}
}

pub fn weight(paths: &RetrievalPaths, path: RetrievalPath) -> f32 {
	match path {
		RetrievalPath::Vector => paths.vector_weight,
		RetrievalPath::Graph => paths.graph_weight,
		RetrievalPath::GeneratedQuery => paths.generated_query_weight,
	}
}

pub fn priority(paths: &RetrievalPaths, path: RetrievalPath) -> u32 {
	match path {
		RetrievalPath::Vector => paths.vector_priority,
		RetrievalPath::Graph => paths.graph_priority,
		RetrievalPath::GeneratedQuery => paths.generated_query_priority,
	}
}

/// Merges per-path results into at most `cap` records, one per article.
///
/// Records are ranked by `score * path weight`; equal ranks fall back to path priority and then
/// to the order records arrived in. Two records belong to the same article when their article ids
/// match, or when one of them has no article id and their URLs match. Records with neither an
/// article id nor a URL are never merged with anything.
pub fn aggregate(
	results: Vec<(RetrievalPath, Vec<EvidenceRecord>)>,
	paths: &RetrievalPaths,
	cap: usize,
) -> Vec<EvidenceRecord> {
	let mut kept: Vec<Ranked> = Vec::new();
	// Article id each kept slot is bound to, if any record in the group carried one.
	let mut group_ids: Vec<Option<String>> = Vec::new();
	let mut by_id: HashMap<String, usize> = HashMap::new();
	let mut by_url: HashMap<String, usize> = HashMap::new();
	let mut seq = 0;

	for (path, records) in results {
		for mut record in records {
			record.path = path;

			let score = if record.score.is_finite() { record.score } else { 0.0 };
			let article_id = record.article_key().map(str::to_string);
			let url = record.url_key().map(str::to_string);
			let candidate = Ranked {
				rank: score * weight(paths, path),
				priority: priority(paths, path),
				seq,
				record,
			};

			seq += 1;

			if article_id.is_none() && url.is_none() {
				kept.push(candidate);
				group_ids.push(None);

				continue;
			}

			let by_url_slot = url.as_ref().and_then(|url| by_url.get(url).copied());
			let slot = match &article_id {
				Some(id) => by_id
					.get(id)
					.copied()
					.or_else(|| by_url_slot.filter(|&idx| group_ids[idx].is_none())),
				None => by_url_slot,
			};
			let idx = match slot {
				Some(idx) => {
					if candidate.cmp_desc(&kept[idx]) == Ordering::Less {
						kept[idx] = candidate;
					}

					idx
				},
				None => {
					kept.push(candidate);
					group_ids.push(None);

					kept.len() - 1
				},
			};

			if let Some(id) = article_id {
				group_ids[idx].get_or_insert_with(|| id.clone());
				by_id.entry(id).or_insert(idx);
			}
			if let Some(url) = url {
				by_url.entry(url).or_insert(idx);
			}
		}
	}

	kept.sort_by(Ranked::cmp_desc);
	kept.truncate(cap);

	tracing::debug!(kept = kept.len(), seen = seq, "Aggregated evidence.");

	kept.into_iter().map(|ranked| ranked.record).collect()
}
