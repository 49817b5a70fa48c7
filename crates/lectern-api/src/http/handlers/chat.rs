//! Key-phrase chat handler.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use lectern_types::chat::KeyPhrases;

use crate::http::error::AppError;
use crate::http::extractors::body::prompt_body;
use crate::http::extractors::query::{DemoQuery, demo_variant};
use crate::state::ChatState;

/// POST /chat?demo={1|2} - Extract three key phrases from a JSON string prompt.
pub async fn extract_key_phrases(
    State(state): State<ChatState>,
    query: Result<Query<DemoQuery>, QueryRejection>,
    body: Result<Json<String>, JsonRejection>,
) -> Result<Json<KeyPhrases>, AppError> {
    let prompt = prompt_body(body)?;
    let variant = demo_variant(query);
    tracing::info!(demo = %variant, prompt_chars = prompt.chars().count(), "chat request");

    let phrases = state.service.extract(&prompt, variant).await?;
    Ok(Json(phrases))
}
