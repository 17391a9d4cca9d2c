use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use newslens_service::{Error, SearchRequest, SearchResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/search", post(search))
		.layer(CorsLayer::permissive())
		.with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthBody {
	status: &'static str,
	database: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}

async fn health(State(state): State<AppState>) -> Response {
	match state.service.store.ping().await {
		Ok(()) => (
			StatusCode::OK,
			Json(HealthBody { status: "healthy", database: "connected", error: None }),
		)
			.into_response(),
		Err(err) => {
			tracing::warn!(error = %err, "Health check failed.");

			(
				StatusCode::SERVICE_UNAVAILABLE,
				Json(HealthBody {
					status: "unhealthy",
					database: "disconnected",
					error: Some(err.to_string()),
				}),
			)
				.into_response()
		},
	}
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	if payload.query.trim().is_empty() {
		return Err(ApiError::new(
			StatusCode::BAD_REQUEST,
			"invalid_request",
			"query must be non-empty.",
		));
	}

	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::InvalidRequest { message } =>
				ApiError::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			other => {
				tracing::error!(error = %other, "Search failed.");

				ApiError::new(
					StatusCode::SERVICE_UNAVAILABLE,
					"search_failed",
					"Search failed, try again.",
				)
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
