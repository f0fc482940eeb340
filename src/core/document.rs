use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_VERSION: &str = "1.0";
pub const MAX_TITLE_CHARS: usize = 60;

/// The game variant tag. Unrecognised tags are carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameType {
    Quiz,
    DragDrop,
    MemoryMatch,
    Sorting,
    Matching,
    StorySequence,
    FillBlank,
    CardFlip,
    WordPuzzle,
    PuzzleAssembly,
    AnxietyAdventure,
    Other(String),
}

impl GameType {
    pub const KNOWN: [GameType; 11] = [
        GameType::Quiz,
        GameType::DragDrop,
        GameType::MemoryMatch,
        GameType::Sorting,
        GameType::Matching,
        GameType::StorySequence,
        GameType::FillBlank,
        GameType::CardFlip,
        GameType::WordPuzzle,
        GameType::PuzzleAssembly,
        GameType::AnxietyAdventure,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            GameType::Quiz => "quiz",
            GameType::DragDrop => "drag-drop",
            GameType::MemoryMatch => "memory-match",
            GameType::Sorting => "sorting",
            GameType::Matching => "matching",
            GameType::StorySequence => "story-sequence",
            GameType::FillBlank => "fill-blank",
            GameType::CardFlip => "card-flip",
            GameType::WordPuzzle => "word-puzzle",
            GameType::PuzzleAssembly => "puzzle-assembly",
            GameType::AnxietyAdventure => "anxiety-adventure",
            GameType::Other(tag) => tag,
        }
    }
}

impl From<String> for GameType {
    fn from(tag: String) -> Self {
        GameType::KNOWN
            .into_iter()
            .find(|known| known.as_str() == tag)
            .unwrap_or(GameType::Other(tag))
    }
}

impl From<GameType> for String {
    fn from(game_type: GameType) -> Self {
        match game_type {
            GameType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Models often write `null` for "off" or "none"; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    #[schemars(description = "Seconds, or null for untimed play.")]
    pub time_limit: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_progress: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allow_retry: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shuffle_options: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_hints: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_next: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_score: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_per_correct: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_per_incorrect: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bonus_for_speed: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bonus_for_streak: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub animations: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sounds: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub particles: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A validated game description, ready for the front-end renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    pub id: String,
    #[schemars(length(max = 60))]
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub game_type: GameType,
    pub difficulty: Difficulty,
    #[schemars(description = "e.g. mental-wellness, coping-skills, mindfulness.")]
    pub category: String,
    #[schemars(description = "Minutes.")]
    pub estimated_time: u32,
    pub config: GameConfig,
    #[schemars(description = "Shape is selected by the `type` tag.")]
    pub content: Map<String, Value>,
    pub scoring: ScoringRules,
    pub ui: UiSettings,
    pub generated_at: String,
    pub version: String,
    pub theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_tags_map_to_variants() {
        for known in GameType::KNOWN {
            let tag = known.as_str().to_string();
            assert_eq!(GameType::from(tag), known);
        }
    }

    #[test]
    fn unknown_tag_is_kept_verbatim() {
        let t: GameType = serde_json::from_value(json!("breathing-garden")).unwrap();
        assert_eq!(t, GameType::Other("breathing-garden".into()));
        assert_eq!(serde_json::to_value(&t).unwrap(), json!("breathing-garden"));
    }

    #[test]
    fn sub_objects_keep_unrecognised_keys() {
        let ui: UiSettings = serde_json::from_value(json!({
            "theme": "calm",
            "animations": true,
            "colorScheme": "ocean"
        }))
        .unwrap();
        assert_eq!(ui.theme.as_deref(), Some("calm"));
        assert!(!ui.sounds);
        assert_eq!(ui.extra.get("colorScheme"), Some(&json!("ocean")));

        let back = serde_json::to_value(&ui).unwrap();
        assert_eq!(back["colorScheme"], "ocean");
    }

    #[test]
    fn explicit_null_flags_read_as_defaults() {
        let ui: UiSettings = serde_json::from_value(json!({
            "theme": "dark",
            "animations": true,
            "sounds": null,
            "particles": null
        }))
        .unwrap();
        assert!(ui.animations);
        assert!(!ui.sounds);
        assert!(!ui.particles);
        assert!(ui.extra.is_empty());

        let config: GameConfig = serde_json::from_value(json!({
            "maxAttempts": null,
            "showHints": null,
            "autoNext": true
        }))
        .unwrap();
        assert_eq!(config.max_attempts, None);
        assert!(!config.show_hints);
        assert!(config.auto_next);

        let scoring: ScoringRules =
            serde_json::from_value(json!({ "maxScore": 100, "bonusForSpeed": null })).unwrap();
        assert_eq!(scoring.max_score, 100);
        assert_eq!(scoring.bonus_for_speed, 0);
    }

    #[test]
    fn difficulty_rejects_unknown_level() {
        assert!(serde_json::from_value::<Difficulty>(json!("extreme")).is_err());
        assert_eq!(
            serde_json::from_value::<Difficulty>(json!("hard")).unwrap(),
            Difficulty::Hard
        );
    }
}
