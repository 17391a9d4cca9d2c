pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
	#[error("{message}")]
	Unavailable { message: String },
}
impl Error {
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Reqwest(err) if err.is_timeout())
	}

	/// True when the endpoint could not be reached or refused the call (connection failure,
	/// error status, rate limit). Decoding problems and timeouts are not counted.
	pub fn is_unavailable(&self) -> bool {
		match self {
			Self::Reqwest(err) => !err.is_timeout() && !err.is_decode(),
			Self::Unavailable { .. } => true,
			_ => false,
		}
	}
}
