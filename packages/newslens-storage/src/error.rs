#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Graph store unavailable: {0}")]
	Unavailable(String),
	#[error("Query failed: {0}")]
	QuerySyntax(String),
	#[error("Query rejected: {0}")]
	WriteRejected(String),
	#[error("Failed to decode row: {0}")]
	Decode(String),
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
impl Error {
	pub(crate) fn from_neo4j(err: neo4rs::Error) -> Self {
		match &err {
			neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError =>
				Self::Unavailable(err.to_string()),
			_ => Self::QuerySyntax(err.to_string()),
		}
	}
}
impl From<neo4rs::DeError> for Error {
	fn from(err: neo4rs::DeError) -> Self {
		Self::Decode(err.to_string())
	}
}
