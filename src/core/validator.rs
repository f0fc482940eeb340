use super::document::{GameDocument, GameType};
use crate::error::GameError;
use serde_json::{Map, Value};

const QUESTION_FIELDS: [&str; 6] = ["id", "question", "type", "options", "correctAnswer", "explanation"];

/// Checks that `content` carries what the declared game type needs.
/// Unknown types pass with a warning.
pub fn validate_content(doc: &GameDocument) -> Result<(), GameError> {
    let content = &doc.content;
    let tag = doc.game_type.as_str();
    log::debug!("Validating content structure for game type: {tag}");

    match &doc.game_type {
        GameType::Quiz => validate_quiz(tag, content),
        GameType::DragDrop => require(tag, content, &["items", "dropZones", "instructions"]),
        GameType::MemoryMatch => {
            require(tag, content, &["pairs"])?;
            non_empty_list(tag, content, "pairs").map(|_| ())
        }
        GameType::Sorting => require(tag, content, &["items", "categories", "instructions"]),
        GameType::Matching => require(tag, content, &["leftItems", "rightItems", "instructions"]),
        GameType::StorySequence => require(tag, content, &["events", "title", "theme"]),
        GameType::FillBlank => require(tag, content, &["passages"]),
        GameType::CardFlip => require(tag, content, &["cards", "instructions"]),
        GameType::WordPuzzle => require(tag, content, &["words", "gridSize", "theme"]),
        GameType::PuzzleAssembly => require(tag, content, &["pieces", "targetImage", "gridSize"]),
        GameType::AnxietyAdventure => require(tag, content, &["startId", "scenarios"]),
        GameType::Other(_) => {
            log::warn!("No validation rule for game type: {tag}");
            Ok(())
        }
    }
}

fn validate_quiz(tag: &str, content: &Map<String, Value>) -> Result<(), GameError> {
    require(tag, content, &["questions"])?;
    let questions = non_empty_list(tag, content, "questions")?;

    for (index, question) in questions.iter().enumerate() {
        let Some(question) = question.as_object() else {
            return Err(GameError::content(
                tag,
                "questions",
                format!("question {index} is not an object"),
            ));
        };
        if let Some(missing) = QUESTION_FIELDS.iter().find(|f| !question.contains_key(**f)) {
            return Err(GameError::content(
                tag,
                missing,
                format!("question {index} missing field: {missing}"),
            ));
        }
    }
    Ok(())
}

fn require(tag: &str, content: &Map<String, Value>, fields: &[&str]) -> Result<(), GameError> {
    match fields.iter().find(|f| !content.contains_key(**f)) {
        Some(missing) => Err(GameError::content(
            tag,
            missing,
            format!("missing field: {missing}"),
        )),
        None => Ok(()),
    }
}

fn non_empty_list<'a>(
    tag: &str,
    content: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, GameError> {
    match content.get(field).and_then(Value::as_array) {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(GameError::content(
            tag,
            field,
            format!("needs a non-empty '{field}' list"),
        )),
    }
}
