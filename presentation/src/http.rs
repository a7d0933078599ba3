use crate::error::ApiError;
use application::rag_service::RagService;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use domain::providers::{ChatModel, EmbeddingProvider};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

/// `POST /ask` with permissive CORS and request tracing.
///
/// Request bodies are not size-limited; oversized prompts fail at the model.
pub fn router<E, M>(service: Arc<RagService<E, M>>) -> Router
where
    E: EmbeddingProvider + Send + Sync + 'static,
    M: ChatModel + Send + Sync + 'static,
{
    Router::new()
        .route("/ask", post(ask::<E, M>))
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn ask<E, M>(
    State(service): State<Arc<RagService<E, M>>>,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError>
where
    E: EmbeddingProvider + Send + Sync + 'static,
    M: ChatModel + Send + Sync + 'static,
{
    let question = parse_question(&body)?;
    let answer = service.answer(&question).await?;
    Ok(Json(AskResponse {
        answer: answer.text,
    }))
}

/// Pulls `question` out of a raw request body.
///
/// Anything that is not a JSON object with a non-null `question` counts as a
/// missing question.
pub fn parse_question(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::MissingQuestion)?;
    match value.get("question") {
        None | Some(Value::Null) => Err(ApiError::MissingQuestion),
        Some(Value::String(question)) => Ok(question.clone()),
        Some(_) => Err(ApiError::InvalidQuestion),
    }
}
