// src/api/handlers.rs

use crate::api::{types::*, ApiState};
use crate::core::{PipelineResult, Question};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// POST /api/ask — Run one question through the pipeline.
pub async fn ask(
    State(state): State<ApiState>,
    Json(body): Json<AskRequest>,
) -> Result<Json<PipelineResult>, ApiError> {
    let question = Question::parse(body.question)
        .map_err(|_| error(StatusCode::BAD_REQUEST, "Question cannot be empty"))?;

    match state.pipeline.submit(&question).await {
        Ok(result) => Ok(Json(result)),
        Err(e) if e.is_completion_failure() => {
            tracing::error!("Pipeline aborted: {e}");
            Err(error(StatusCode::BAD_GATEWAY, "Failed to process question"))
        }
        Err(e) => {
            tracing::error!("Pipeline error: {e}");
            Err(error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process question",
            ))
        }
    }
}

/// GET /api/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET / — Question form.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}
