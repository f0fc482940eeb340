use crate::ai::client::ModelCaller;
use crate::ai::prompts;
use crate::core::document::GameDocument;
use crate::core::processor::process_response;
use crate::error::GameError;
use serde::Serialize;
use uuid::Uuid;

const PREVIEW_LEN: usize = 500;

pub struct Orchestrator<C> {
    client: C,
}

#[derive(Debug, Serialize)]
pub struct TraceRequest {
    pub prompt: String,
}

/// Intermediate artefacts of one generation, for debugging prompts.
#[derive(Debug, Serialize)]
pub struct DebugTrace {
    pub request: TraceRequest,
    pub full_prompt: String,
    pub raw_response: String,
    pub final_game: GameDocument,
}

impl<C: ModelCaller> Orchestrator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn generate_game(&self, user_prompt: &str) -> Result<GameDocument, GameError> {
        self.run(user_prompt).await.map(|trace| trace.final_game)
    }

    pub async fn generate_game_debug(&self, user_prompt: &str) -> Result<DebugTrace, GameError> {
        let trace = self.run(user_prompt).await?;
        Ok(DebugTrace {
            request: trace.request,
            full_prompt: preview(&trace.full_prompt),
            raw_response: preview(&trace.raw_response),
            final_game: trace.final_game,
        })
    }

    async fn run(&self, user_prompt: &str) -> Result<DebugTrace, GameError> {
        let request_id = Uuid::new_v4();
        log::info!("[{request_id}] 🎮 Game request: {}...", truncate(user_prompt, 100));

        log::info!("[{request_id}] Building therapeutic prompt");
        let full_prompt = prompts::build_full_prompt(user_prompt);

        log::info!("[{request_id}] Calling model");
        let raw_response = self.client.generate(&full_prompt).await?;

        log::info!("[{request_id}] Processing model reply");
        let final_game = process_response(&raw_response).inspect_err(|e| {
            log::error!("[{request_id}] Failed to process response: {e}");
            if let GameError::Parse { excerpt, .. } = e {
                log::debug!("[{request_id}] Reply head: {excerpt}");
            }
        })?;

        log::info!("[{request_id}] Generated game: {}", final_game.id);
        Ok(DebugTrace {
            request: TraceRequest {
                prompt: user_prompt.to_string(),
            },
            full_prompt,
            raw_response,
            final_game,
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn preview(text: &str) -> String {
    let head = truncate(text, PREVIEW_LEN);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        text.to_string()
    }
}
