pub mod embedding;
pub mod llm;

mod error;

pub use error::{Error, Result};

use reqwest::{
	Response, StatusCode,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: format!("Default header {key} must be a string."),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Passes a successful response through. Any error status, rate limiting included, means the
/// endpoint refused the call.
pub(crate) fn ensure_success(provider_id: &str, res: Response) -> Result<Response> {
	let status = res.status();

	if status.is_success() {
		return Ok(res);
	}

	Err(status_error(provider_id, status))
}

fn status_error(provider_id: &str, status: StatusCode) -> Error {
	let message = if status == StatusCode::TOO_MANY_REQUESTS {
		format!("Provider {provider_id} is rate limited.")
	} else {
		format!("Provider {provider_id} returned HTTP {status}.")
	};

	Error::Unavailable { message }
}
