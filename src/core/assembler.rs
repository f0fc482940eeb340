use super::document::{DEFAULT_VERSION, GameDocument, MAX_TITLE_CHARS};
use crate::error::GameError;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

pub const REQUIRED_FIELDS: [&str; 12] = [
    "id",
    "title",
    "description",
    "type",
    "difficulty",
    "category",
    "estimatedTime",
    "config",
    "content",
    "scoring",
    "ui",
    "theme",
];

/// Builds a typed document from a parsed reply: presence check, then
/// defaults, then typed construction.
pub fn assemble(mut raw: Map<String, Value>) -> Result<GameDocument, GameError> {
    check_required(&raw)?;
    fill_defaults(&mut raw);

    let doc: GameDocument = serde_json::from_value(Value::Object(raw))
        .map_err(|e| GameError::Schema(e.to_string()))?;

    let title_len = doc.title.chars().count();
    if title_len > MAX_TITLE_CHARS {
        return Err(GameError::Schema(format!(
            "title is {title_len} characters, at most {MAX_TITLE_CHARS} allowed"
        )));
    }

    Ok(doc)
}

pub fn check_required(raw: &Map<String, Value>) -> Result<(), GameError> {
    match REQUIRED_FIELDS.iter().find(|field| !raw.contains_key(**field)) {
        Some(missing) => Err(GameError::Schema(format!("Missing required field: {missing}"))),
        None => Ok(()),
    }
}

pub fn fill_defaults(raw: &mut Map<String, Value>) {
    raw.entry("generatedAt")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));
    raw.entry("version")
        .or_insert_with(|| Value::String(DEFAULT_VERSION.to_string()));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::document::{Difficulty, GameType};
    use chrono::DateTime;
    use serde_json::json;

    pub(crate) fn quiz_reply() -> Value {
        json!({
            "id": "game-20250101-0042",
            "title": "Spot the Thinking Trap",
            "description": "Learn to recognise common cognitive distortions.",
            "type": "quiz",
            "difficulty": "easy",
            "category": "cognitive-behavioral",
            "estimatedTime": 10,
            "config": {
                "maxAttempts": 3,
                "timeLimit": null,
                "showProgress": true,
                "allowRetry": true,
                "shuffleOptions": false,
                "showHints": true,
                "autoNext": false
            },
            "content": {
                "questions": [{
                    "id": "q1",
                    "question": "\"I always fail\" is an example of...",
                    "type": "multiple-choice",
                    "options": ["Overgeneralisation", "Mindfulness", "Validation", "Grounding"],
                    "correctAnswer": "Overgeneralisation",
                    "explanation": "One setback is stretched into a rule about everything."
                }]
            },
            "scoring": {
                "maxScore": 100,
                "pointsPerCorrect": 10,
                "pointsPerIncorrect": 0,
                "bonusForSpeed": 5,
                "bonusForStreak": 10
            },
            "ui": {
                "theme": "colorful",
                "layout": "list",
                "animations": true,
                "sounds": false,
                "particles": true
            },
            "generatedAt": "2025-01-01T09:30:00.000Z",
            "version": "1.0",
            "theme": "cognitive distortions"
        })
    }

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn assembles_complete_reply() {
        let doc = assemble(as_map(quiz_reply())).unwrap();
        assert_eq!(doc.game_type, GameType::Quiz);
        assert_eq!(doc.difficulty, Difficulty::Easy);
        assert_eq!(doc.estimated_time, 10);
        assert_eq!(doc.config.max_attempts, Some(3));
        assert_eq!(doc.config.time_limit, None);
        assert_eq!(doc.scoring.max_score, 100);
        assert_eq!(doc.generated_at, "2025-01-01T09:30:00.000Z");
    }

    #[test]
    fn missing_scoring_is_named() {
        let mut raw = as_map(quiz_reply());
        raw.remove("scoring");
        match assemble(raw) {
            Err(GameError::Schema(msg)) => assert!(msg.contains("scoring"), "{msg}"),
            other => panic!("expected schema failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_wins_over_broken_content() {
        let mut raw = as_map(quiz_reply());
        raw.insert("content".into(), json!({}));
        raw.remove("theme");
        let err = assemble(raw).unwrap_err();
        assert!(err.to_string().contains("Missing required field: theme"));
    }

    #[test]
    fn defaults_version_and_timestamp() {
        let mut raw = as_map(quiz_reply());
        raw.remove("generatedAt");
        raw.remove("version");
        let doc = assemble(raw).unwrap();
        assert_eq!(doc.version, "1.0");
        let stamp = DateTime::parse_from_rfc3339(&doc.generated_at).unwrap();
        let age = Utc::now().signed_duration_since(stamp);
        assert!(age.num_seconds().abs() < 60);
    }

    #[test]
    fn wrong_sub_object_shape_is_schema_failure() {
        let mut raw = as_map(quiz_reply());
        raw.insert("config".into(), json!("fast"));
        assert!(matches!(assemble(raw), Err(GameError::Schema(_))));

        let mut raw = as_map(quiz_reply());
        raw.insert("difficulty".into(), json!("impossible"));
        assert!(matches!(assemble(raw), Err(GameError::Schema(_))));
    }

    #[test]
    fn null_flags_in_sub_objects_do_not_fail_assembly() {
        let mut raw = as_map(quiz_reply());
        raw.insert(
            "ui".into(),
            json!({ "theme": "calm", "animations": true, "sounds": null, "particles": null }),
        );
        raw["config"]["showHints"] = Value::Null;
        let doc = assemble(raw).unwrap();
        assert!(doc.ui.animations);
        assert!(!doc.ui.particles);
        assert!(!doc.config.show_hints);
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut raw = as_map(quiz_reply());
        raw.insert("title".into(), json!("a".repeat(61)));
        let err = assemble(raw).unwrap_err();
        assert!(err.to_string().contains("title"));
    }
}
