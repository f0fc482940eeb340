use super::assembler::assemble;
use super::document::GameDocument;
use super::normalize::clean_reply;
use super::repair::parse_object;
use super::validator::validate_content;
use crate::error::GameError;

/// Turns a raw model reply into a validated document, or fails as a whole.
pub fn process_response(raw_response: &str) -> Result<GameDocument, GameError> {
    log::debug!("Cleaning model reply ({} chars)", raw_response.len());
    let cleaned = clean_reply(raw_response);

    let parsed = parse_object(&cleaned)?;
    let doc = assemble(parsed)?;
    validate_content(&doc)?;

    log::info!("✅ Processed reply into game '{}' ({})", doc.id, doc.game_type);
    Ok(doc)
}
