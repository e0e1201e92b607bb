// Study Assistant - AI summaries, notes and evaluations for uploaded study documents

pub mod config;
pub mod models;
pub mod types;
pub mod agents;
pub mod llm;
pub mod documents; // Text extraction for .txt / .pdf / .docx
pub mod storage;   // Local upload directory
pub mod routes;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
