use thiserror::Error;

/// Longest slice of offending text carried in a diagnostic.
pub const EXCERPT_LEN: usize = 500;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid JSON in LLM response: {message}")]
    Parse { message: String, excerpt: String },

    #[error("Invalid game schema: {0}")]
    Schema(String),

    #[error("Invalid {game_type} content: {message}")]
    ContentShape {
        game_type: String,
        field: String,
        message: String,
    },

    #[error("Gemini generation failed: {message}")]
    ModelCall { status: Option<u16>, message: String },
}

impl GameError {
    pub fn excerpt(text: &str) -> String {
        text.chars().take(EXCERPT_LEN).collect()
    }

    pub(crate) fn content(game_type: &str, field: &str, message: impl Into<String>) -> Self {
        GameError::ContentShape {
            game_type: game_type.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GameError {
    fn from(e: reqwest::Error) -> Self {
        GameError::ModelCall {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
