use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::time::parse_timestamp;

/// Hash field names used for a stored game record.
pub mod field {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const SCENE_JSON: &str = "scene_json";
    pub const CODE: &str = "code";
    pub const CREATED_AT: &str = "created_at";
}

/// The full field set of one stored game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFields {
    pub name: String,
    pub description: String,
    pub scene_json: String,
    pub code: String,
    pub created_at: String,
}

impl GameFields {
    /// Flatten into hash field/value pairs, in a fixed order.
    pub fn to_pairs(&self) -> [(&'static str, &str); 5] {
        [
            (field::NAME, self.name.as_str()),
            (field::DESCRIPTION, self.description.as_str()),
            (field::SCENE_JSON, self.scene_json.as_str()),
            (field::CODE, self.code.as_str()),
            (field::CREATED_AT, self.created_at.as_str()),
        ]
    }

    /// Rebuild a record from a raw hash. A missing or empty `name` means the
    /// record does not exist and yields `None`; other missing fields read as
    /// empty strings.
    pub fn from_hash(mut hash: HashMap<String, String>) -> Option<Self> {
        let name = hash.remove(field::NAME).filter(|n| !n.is_empty())?;
        let mut take = |key: &str| hash.remove(key).unwrap_or_default();
        Some(Self {
            name,
            description: take(field::DESCRIPTION),
            scene_json: take(field::SCENE_JSON),
            code: take(field::CODE),
            created_at: take(field::CREATED_AT),
        })
    }
}

/// Body of a create request. Every field is optional on the wire so that
/// `null` and absent are treated alike; `validate` applies the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewGame {
    pub name: Option<String>,
    pub description: Option<String>,
    pub scene_json: Option<String>,
    pub code: Option<String>,
}

/// A create request that passed validation but has no id or timestamp yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    pub name: String,
    pub description: String,
    pub scene_json: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
}

impl NewGame {
    pub fn validate(self) -> Result<GameDraft, ValidationError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::MissingName)?;
        Ok(GameDraft {
            name,
            description: self.description.unwrap_or_default(),
            scene_json: self.scene_json.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
        })
    }
}

impl GameDraft {
    /// Stamp the creation time, producing the record to persist.
    pub fn into_fields(self, created_at: String) -> GameFields {
        GameFields {
            name: self.name,
            description: self.description,
            scene_json: self.scene_json,
            code: self.code,
            created_at,
        }
    }
}

/// List view of a game. The scene and code blobs are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
}

impl GameSummary {
    pub fn from_record(id: String, fields: GameFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            created_at: fields.created_at,
        }
    }
}

/// Detail view of a game: only the large payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneDetail {
    pub scene_json: String,
    pub code: String,
}

impl From<GameFields> for SceneDetail {
    fn from(fields: GameFields) -> Self {
        Self {
            scene_json: fields.scene_json,
            code: fields.code,
        }
    }
}

/// Sort summaries newest first by parsed `created_at`. Records whose
/// timestamp does not parse go last. Equal timestamps fall back to the
/// numeric id, higher first.
pub fn sort_newest_first(games: &mut [GameSummary]) {
    games.sort_by(|a, b| {
        let ta = parse_timestamp(&a.created_at);
        let tb = parse_timestamp(&b.created_at);
        tb.cmp(&ta).then_with(|| compare_ids(&b.id, &a.id))
    });
}

fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
