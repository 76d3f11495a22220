use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use cardrank_service::{Error, RankingsRequest, RankingsResponse};

/// Raw query flags. Accepts `1`, `true` and `yes` (any case) as true.
#[derive(Debug, Default, Deserialize)]
pub struct RankingsQuery {
	pub force: Option<String>,
	pub allow_secondaries: Option<String>,
}
impl RankingsQuery {
	pub fn to_request(&self) -> RankingsRequest {
		RankingsRequest {
			force: parse_flag(self.force.as_deref()),
			allow_secondaries: parse_flag(self.allow_secondaries.as_deref()),
		}
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/rankings", get(rankings))
		.with_state(state)
}

pub fn parse_flag(raw: Option<&str>) -> bool {
	raw.map(|value| value.trim().to_ascii_lowercase())
		.is_some_and(|value| matches!(value.as_str(), "1" | "true" | "yes"))
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn rankings(
	State(state): State<AppState>,
	Query(query): Query<RankingsQuery>,
) -> Result<Json<RankingsResponse>, ApiError> {
	let response = state.service.rankings(query.to_request()).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match err {
			Error::Upstream { message } => {
				tracing::warn!(error = %message, "Upstream catalog failure.");

				Self::new(StatusCode::BAD_GATEWAY, message)
			},
			Error::Model { message } | Error::Internal { message } => {
				tracing::error!(error = %message, "Rankings request failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(ErrorBody { error: self.message })).into_response()
	}
}
