use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalPath {
	Vector,
	Graph,
	GeneratedQuery,
}
impl RetrievalPath {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Vector => "vector",
			Self::Graph => "graph",
			Self::GeneratedQuery => "generated_query",
		}
	}
}

/// A retrieved piece of evidence, normalized across retrieval paths.
///
/// Built fresh for every query. Fields a path cannot supply stay `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
	pub article_id: Option<String>,
	pub url: Option<String>,
	pub title: Option<String>,
	pub short_name: Option<String>,
	pub outlet_icon: Option<String>,
	pub category: Option<String>,
	pub published_date: Option<String>,
	pub chunk_id: Option<String>,
	pub chunk_text: String,
	pub score: f32,
	pub path: RetrievalPath,
	/// Titles of other articles in the same category. Graph path only.
	pub related_titles: Vec<String>,
}
impl EvidenceRecord {
	pub fn new(path: RetrievalPath, score: f32) -> Self {
		Self {
			article_id: None,
			url: None,
			title: None,
			short_name: None,
			outlet_icon: None,
			category: None,
			published_date: None,
			chunk_id: None,
			chunk_text: String::new(),
			score,
			path,
			related_titles: Vec::new(),
		}
	}

	/// The article id, else the URL. `None` when the record cannot be tied to an article.
	pub fn identity(&self) -> Option<&str> {
		self.article_key().or_else(|| self.url_key())
	}

	pub fn article_key(&self) -> Option<&str> {
		non_blank(self.article_id.as_deref())
	}

	pub fn url_key(&self) -> Option<&str> {
		non_blank(self.url.as_deref())
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|value| !value.is_empty())
}
