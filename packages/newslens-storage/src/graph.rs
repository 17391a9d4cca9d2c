use neo4rs::{BoltList, BoltNull, BoltType, ConfigBuilder, Graph, Query, query};
use serde_json::Value;

use crate::{
	Error, Result, guard,
	models::{Article, ArticleBundle, Category, Outlet, Row, VectorHit},
	schema::{GraphSchema, RelationshipPattern},
};

/// Upper bound on same-category articles returned with an expansion.
pub const RELATED_LIMIT: i64 = 5;

pub struct Neo4jStore {
	graph: Graph,
	vector_index: String,
}
impl Neo4jStore {
	pub async fn connect(cfg: &newslens_config::Neo4j) -> Result<Self> {
		let mut builder = ConfigBuilder::default()
			.uri(cfg.uri.as_str())
			.user(cfg.user.as_str())
			.password(cfg.password.as_str())
			.fetch_size(cfg.fetch_size)
			.max_connections(cfg.max_connections);

		if let Some(database) = cfg.database.as_deref() {
			builder = builder.db(database);
		}

		let config = builder.build().map_err(Error::from_neo4j)?;
		let graph = Graph::connect(config).await.map_err(Error::from_neo4j)?;

		Ok(Self { graph, vector_index: cfg.vector_index.clone() })
	}

	pub async fn ping(&self) -> Result<()> {
		self.fetch(query("RETURN 1 AS ok")).await?;

		Ok(())
	}

	/// Nearest chunks to `embedding` by the store's vector index, best first.
	pub async fn vector_search(&self, embedding: &[f32], k: u32) -> Result<Vec<VectorHit>> {
		if k == 0 {
			return Ok(Vec::new());
		}

		let embedding: Vec<f64> = embedding.iter().map(|value| f64::from(*value)).collect();
		let q = query(
			"\
CALL db.index.vector.queryNodes($index, $k, $embedding)
YIELD node, score
RETURN node.content_id AS chunk_id,
	node.chunk AS chunk,
	node.article_id AS article_id,
	node.title AS title,
	node.url AS url,
	toString(node.published_date) AS published_date,
	score
ORDER BY score DESC",
		)
		.param("index", self.vector_index.as_str())
		.param("k", i64::from(k))
		.param("embedding", embedding);
		let rows = self.fetch(q).await?;
		let mut hits = Vec::with_capacity(rows.len());

		for row in rows {
			let Some(chunk_id) = row.get::<Option<String>>("chunk_id")? else {
				tracing::warn!("Skipping vector hit without content_id.");

				continue;
			};
			let score: f64 = row.get("score")?;

			hits.push(VectorHit {
				chunk_id,
				score: score as f32,
				text: row.get::<Option<String>>("chunk")?.unwrap_or_default(),
				article_id: row.get("article_id")?,
				title: row.get("title")?,
				url: row.get("url")?,
				published_date: row.get("published_date")?,
			});
		}

		Ok(hits)
	}

	/// The article owning `chunk_id`, with its outlet, category and up to [`RELATED_LIMIT`]
	/// same-category articles.
	///
	/// Returns `None` when the chunk is unknown or has no owning article.
	pub async fn expand(&self, chunk_id: &str) -> Result<Option<ArticleBundle>> {
		let q = query(
			"\
MATCH (a:Article)-[:HAS_CHUNK]->(:Content {content_id: $chunk_id})
OPTIONAL MATCH (a)-[:BELONGS_TO]->(c:Category)
OPTIONAL MATCH (m:Media)-[:PUBLISHED]->(a)
OPTIONAL MATCH (c)<-[:BELONGS_TO]-(r:Article)
WHERE r.article_id <> a.article_id
WITH a, c, m, r
ORDER BY r.published_date DESC
WITH a, c, m, collect(r)[0..$related_limit] AS related
RETURN a.article_id AS article_id,
	a.title AS title,
	a.url AS url,
	toString(a.published_date) AS published_date,
	c.name AS category,
	m.name AS media,
	m.icon AS media_icon,
	[x IN related | {
		article_id: x.article_id,
		title: x.title,
		url: x.url,
		published_date: toString(x.published_date)
	}] AS related
LIMIT 1",
		)
		.param("chunk_id", chunk_id)
		.param("related_limit", RELATED_LIMIT);
		let rows = self.fetch(q).await?;
		let Some(row) = rows.into_iter().next() else {
			return Ok(None);
		};
		let article = Article {
			article_id: row.get("article_id")?,
			title: row.get("title")?,
			url: row.get("url")?,
			published_date: row.get("published_date")?,
		};
		let icon: Option<String> = row.get("media_icon")?;
		let outlet = row.get::<Option<String>>("media")?.map(|name| Outlet { name, icon });
		let category = row.get::<Option<String>>("category")?.map(|name| Category { name });
		let related: Vec<Article> = row.get("related")?;

		Ok(Some(ArticleBundle { article, outlet, category, related }))
	}

	/// Runs `cypher` with `params` and returns every row as a column map.
	///
	/// No admission check happens here. Queries that did not come from this crate go through
	/// [`Neo4jStore::run_generated_query`].
	pub async fn run_query(&self, cypher: &str, params: &Row) -> Result<Vec<Row>> {
		let mut q = query(cypher);

		for (key, value) in params {
			q = q.param(key.as_str(), bolt_param(key, value)?);
		}

		let rows = self.fetch(q).await?;

		rows.iter().map(|row| row.to::<Row>().map_err(Error::from)).collect()
	}

	/// Admits `cypher` through [`guard::ensure_read_only`] before running it.
	pub async fn run_generated_query(&self, cypher: &str, params: &Row) -> Result<Vec<Row>> {
		guard::ensure_read_only(cypher)?;

		self.run_query(cypher, params).await
	}

	pub async fn schema(&self) -> Result<GraphSchema> {
		let mut schema = GraphSchema::default();
		let rows = self
			.fetch(query(
				"\
CALL db.schema.nodeTypeProperties()
YIELD nodeType, propertyName
RETURN nodeType, propertyName",
			))
			.await?;

		for row in rows {
			let label: String = row.get("nodeType")?;

			schema.push_property(&label, row.get("propertyName")?);
		}

		let rows = self
			.fetch(query(
				"\
MATCH (n)-[r]->(m)
RETURN DISTINCT labels(n)[0] AS source, type(r) AS relationship, labels(m)[0] AS target
LIMIT 20",
			))
			.await?;

		for row in rows {
			let (Some(source), Some(target)) =
				(row.get::<Option<String>>("source")?, row.get::<Option<String>>("target")?)
			else {
				continue;
			};

			schema.relationships.push(RelationshipPattern {
				source,
				relationship: row.get("relationship")?,
				target,
			});
		}

		Ok(schema)
	}

	async fn fetch(&self, q: Query) -> Result<Vec<neo4rs::Row>> {
		let mut stream = self.graph.execute(q).await.map_err(Error::from_neo4j)?;
		let mut rows = Vec::new();

		while let Some(row) = stream.next().await.map_err(Error::from_neo4j)? {
			rows.push(row);
		}

		Ok(rows)
	}
}

fn bolt_param(key: &str, value: &Value) -> Result<BoltType> {
	let bolt = match value {
		Value::Null => BoltType::Null(BoltNull),
		Value::Bool(flag) => BoltType::from(*flag),
		Value::Number(number) => match number.as_i64() {
			Some(int) => BoltType::from(int),
			None => BoltType::from(number.as_f64().unwrap_or_default()),
		},
		Value::String(text) => BoltType::from(text.as_str()),
		Value::Array(items) => BoltType::List(BoltList {
			value: items.iter().map(|item| bolt_param(key, item)).collect::<Result<_>>()?,
		}),
		Value::Object(_) => {
			return Err(Error::InvalidArgument(format!(
				"Query parameter {key} must be a scalar or a list."
			)));
		},
	};

	Ok(bolt)
}
