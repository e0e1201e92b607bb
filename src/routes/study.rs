//! Study action endpoints
//!
//! - `POST /summarize`, `POST /notes` (alias `/create_notes`), `POST /evaluate`
//!   run a mode on a fresh upload or on a stored file named in the form
//! - `GET /summarize/{filename}`, `GET /notes/{filename}`,
//!   `GET /evaluate/{filename}` re-run a mode on a stored file

use std::path::PathBuf;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use tracing::{info, warn};

use super::form::ActionForm;
use super::ui::render_result;
use crate::agents::StudyMode;
use crate::documents::{DocumentProcessor, ExtractionOutcome};
use crate::models::AppState;
use crate::types::AppResult;

pub const NO_TEXT_UPLOAD_MESSAGE: &str = "No text could be extracted from the file. Please upload a plain .txt, .pdf, or .docx file (or convert .doc to .docx).";
pub const NO_TEXT_MESSAGE: &str = "No text could be extracted from the file.";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize_post))
        .route("/notes", post(notes_post))
        .route("/create_notes", post(notes_post))
        .route("/evaluate", post(evaluate_post))
        .route("/summarize/{filename}", get(summarize_get))
        .route("/notes/{filename}", get(notes_get))
        .route("/evaluate/{filename}", get(evaluate_get))
        .with_state(state)
}

async fn summarize_post(State(state): State<AppState>, form: ActionForm) -> AppResult<Response> {
    run_post(&state, StudyMode::Summary, form).await
}

async fn notes_post(State(state): State<AppState>, form: ActionForm) -> AppResult<Response> {
    run_post(&state, StudyMode::Notes, form).await
}

async fn evaluate_post(State(state): State<AppState>, form: ActionForm) -> AppResult<Response> {
    run_post(&state, StudyMode::Evaluate, form).await
}

async fn summarize_get(State(state): State<AppState>, Path(filename): Path<String>) -> Html<String> {
    run_get(&state, StudyMode::Summary, &filename).await
}

async fn notes_get(State(state): State<AppState>, Path(filename): Path<String>) -> Html<String> {
    run_get(&state, StudyMode::Notes, &filename).await
}

async fn evaluate_get(State(state): State<AppState>, Path(filename): Path<String>) -> Html<String> {
    run_get(&state, StudyMode::Evaluate, &filename).await
}

async fn run_post(state: &AppState, mode: StudyMode, form: ActionForm) -> AppResult<Response> {
    let requested = match &form.upload {
        Some(upload) => state
            .uploads
            .save(&upload.filename, &upload.data)
            .await?
            .map(|saved| saved.stored_name),
        None => form.stored_name().map(str::to_string),
    };

    let Some((stored_name, path)) = requested
        .as_deref()
        .and_then(|name| state.uploads.resolve(name))
    else {
        info!(%mode, "No file given, redirecting to upload form");
        return Ok(Redirect::to("/upload").into_response());
    };

    info!(%mode, file = %stored_name, "Processing study request");
    let result = study_text(state, mode, path, NO_TEXT_UPLOAD_MESSAGE).await;
    Ok(Html(render_result(mode, &result, &stored_name)).into_response())
}

async fn run_get(state: &AppState, mode: StudyMode, filename: &str) -> Html<String> {
    let (stored_name, result) = match state.uploads.resolve(filename) {
        Some((stored_name, path)) => {
            info!(%mode, file = %stored_name, "Re-running study request on stored file");
            let result = study_text(state, mode, path, NO_TEXT_MESSAGE).await;
            (stored_name, result)
        }
        None => {
            warn!(%mode, requested = %filename, "Requested filename sanitized to nothing");
            (String::new(), NO_TEXT_MESSAGE.to_string())
        }
    };

    Html(render_result(mode, &result, &stored_name))
}

/// Extract the stored file and run `mode` on its text, or return
/// `no_text_message` when there is nothing to send.
async fn study_text(state: &AppState, mode: StudyMode, path: PathBuf, no_text_message: &str) -> String {
    match DocumentProcessor::process_document(path).await {
        ExtractionOutcome::Text(text) => state.agent.run(mode, &text).await.display_text(),
        ExtractionOutcome::Empty => {
            info!(%mode, "Document has no text, skipping LLM call");
            no_text_message.to_string()
        }
        ExtractionOutcome::Unsupported { extension } => {
            info!(%mode, %extension, "Unsupported document type, skipping LLM call");
            no_text_message.to_string()
        }
        ExtractionOutcome::Failed(e) => {
            warn!(%mode, error = %e, "Extraction failed, skipping LLM call");
            no_text_message.to_string()
        }
    }
}
