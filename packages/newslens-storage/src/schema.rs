use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
	pub label: String,
	pub properties: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipPattern {
	pub source: String,
	pub relationship: String,
	pub target: String,
}

/// Labels, properties and relationship patterns present in the graph, as reported by the store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSchema {
	pub nodes: Vec<NodeType>,
	pub relationships: Vec<RelationshipPattern>,
}
impl GraphSchema {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.relationships.is_empty()
	}

	/// Renders the schema as the plain-text block handed to the query generator.
	pub fn render(&self) -> String {
		let mut out = String::from("=== Neo4j Schema ===\n노드 타입:\n");

		for node in &self.nodes {
			out.push_str(&format!("- {}: {}\n", node.label, node.properties.join(", ")));
		}

		out.push_str("\n관계 패턴:\n");

		for rel in &self.relationships {
			out.push_str(&format!(
				"- ({})-[:{}]->({})\n",
				rel.source, rel.relationship, rel.target
			));
		}

		out
	}

	pub(crate) fn push_property(&mut self, label: &str, property: Option<String>) {
		let label = label.trim_start_matches(':').trim_matches('`').to_string();
		let node = match self.nodes.iter().position(|node| node.label == label) {
			Some(idx) => &mut self.nodes[idx],
			None => {
				self.nodes.push(NodeType { label, properties: Vec::new() });

				let last = self.nodes.len() - 1;

				&mut self.nodes[last]
			},
		};

		if let Some(property) = property
			&& !node.properties.contains(&property)
		{
			node.properties.push(property);
		}
	}
}
