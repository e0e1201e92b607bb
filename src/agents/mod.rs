//! Study Agents
//!
//! - **Prompts**: fixed templates and input truncation per mode
//! - **Study Agent**: sends a mode's prompt to the LLM and tags the outcome
//!
//! ```text
//! Extracted text
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Prompts   │  → truncate + two-message template
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │    Study    │  → chat completion → Completion
//! │    Agent    │
//! └─────────────┘
//! ```

pub mod prompts;
pub mod study;

pub use prompts::{build_messages, truncate_text, GenerationParams, MAX_INPUT_CHARS, TRUNCATION_MARKER};
pub use study::{Completion, StudyAgent, StudyMode, MISSING_API_KEY_MESSAGE};
