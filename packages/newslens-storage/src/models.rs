use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row of a generated query, keyed by the columns the query returned.
pub type Row = Map<String, Value>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorHit {
	pub chunk_id: String,
	pub score: f32,
	pub text: String,
	pub article_id: Option<String>,
	pub title: Option<String>,
	pub url: Option<String>,
	pub published_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
	pub article_id: String,
	pub title: Option<String>,
	pub url: Option<String>,
	pub published_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
	pub name: String,
	pub icon: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
	pub name: String,
}

/// An article together with its graph neighborhood.
///
/// `related` holds other articles in the same category, newest first, never including the
/// article itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticleBundle {
	pub article: Article,
	pub outlet: Option<Outlet>,
	pub category: Option<Category>,
	pub related: Vec<Article>,
}
