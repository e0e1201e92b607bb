//! Prompt templates
//!
//! Each study mode maps to a fixed system/user message pair and fixed
//! generation parameters. Input text is truncated before it is embedded.

use super::StudyMode;
use crate::types::LLMMessage;

/// Character cap on the document text embedded in a prompt
pub const MAX_INPUT_CHARS: usize = 15_000;

/// Appended after the cut so the model knows the document continues
pub const TRUNCATION_MARKER: &str = "\n\n[...truncated]";

/// Cut `text` to its first [`MAX_INPUT_CHARS`] characters and append the
/// truncation marker. Shorter text is returned unchanged.
pub fn truncate_text(text: &str) -> String {
    match text.char_indices().nth(MAX_INPUT_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

/// Sampling parameters for a mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl StudyMode {
    pub fn generation_params(&self) -> GenerationParams {
        match self {
            StudyMode::Summary => GenerationParams { max_tokens: 500, temperature: 0.2 },
            StudyMode::Notes => GenerationParams { max_tokens: 700, temperature: 0.25 },
            StudyMode::Evaluate => GenerationParams { max_tokens: 500, temperature: 0.3 },
        }
    }

    fn system_prompt(&self) -> &'static str {
        match self {
            StudyMode::Summary => {
                "You are a helpful assistant that summarizes study notes clearly and concisely."
            }
            StudyMode::Notes => {
                "You are an assistant that converts raw text into structured study notes with headings and bullet points."
            }
            StudyMode::Evaluate => {
                "You are an assistant that evaluates study material and gives a numeric score and actionable feedback."
            }
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            StudyMode::Summary => {
                "Please summarize the following text for study purposes. Keep it concise (3-6 sentences), highlight main ideas and important terms:"
            }
            StudyMode::Notes => {
                "Convert the following text into well-structured study notes. Use short headings, then 3-6 concise bullet points under each heading. Keep it suitable for quick review:"
            }
            StudyMode::Evaluate => {
                "Evaluate the following text on clarity, completeness, accuracy, and usefulness for a student. Provide:\n\
                 1) A numeric score out of 10 (one number).\n\
                 2) A short justification (2-4 sentences).\n\
                 3) Two concrete suggestions to improve the material."
            }
        }
    }
}

/// Build the two-message prompt for `mode`, truncating `text` first.
pub fn build_messages(mode: StudyMode, text: &str) -> Vec<LLMMessage> {
    let text = truncate_text(text);
    vec![
        LLMMessage::system(mode.system_prompt()),
        LLMMessage::user(format!("{}\n\n{}", mode.instruction(), text)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let text = "Photosynthesis converts light into energy.";
        assert_eq!(truncate_text(text), text);
        assert_eq!(truncate_text(""), "");

        let exact = "a".repeat(MAX_INPUT_CHARS);
        assert_eq!(truncate_text(&exact), exact);
    }

    #[test]
    fn test_long_text_truncated() {
        let text = "b".repeat(MAX_INPUT_CHARS + 1);
        let truncated = truncate_text(&text);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            truncated.chars().count(),
            MAX_INPUT_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert_eq!(&truncated[..MAX_INPUT_CHARS], &text[..MAX_INPUT_CHARS]);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        // 'é' is two bytes in UTF-8
        let text = "é".repeat(MAX_INPUT_CHARS + 10);
        let truncated = truncate_text(&text);
        let kept = truncated.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(kept.chars().count(), MAX_INPUT_CHARS);
        assert!(kept.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_truncation_idempotent_for_short_input() {
        let text = "short study text";
        assert_eq!(truncate_text(&truncate_text(text)), truncate_text(text));
    }

    #[test]
    fn test_generation_params() {
        assert_eq!(
            StudyMode::Summary.generation_params(),
            GenerationParams { max_tokens: 500, temperature: 0.2 }
        );
        assert_eq!(
            StudyMode::Notes.generation_params(),
            GenerationParams { max_tokens: 700, temperature: 0.25 }
        );
        assert_eq!(
            StudyMode::Evaluate.generation_params(),
            GenerationParams { max_tokens: 500, temperature: 0.3 }
        );
    }

    #[test]
    fn test_build_messages_shape() {
        let messages = build_messages(StudyMode::Evaluate, "Cells divide by mitosis.");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("numeric score"));
        assert_eq!(messages[1].role, "user");
        assert!(messages[1].content.contains("score out of 10"));
        assert!(messages[1].content.ends_with("\n\nCells divide by mitosis."));
    }

    #[test]
    fn test_build_messages_truncates_input() {
        let text = "x".repeat(MAX_INPUT_CHARS * 2);
        let messages = build_messages(StudyMode::Summary, &text);
        assert!(messages[1].content.ends_with(TRUNCATION_MARKER));
        assert!(messages[1].content.len() < text.len());
    }
}
