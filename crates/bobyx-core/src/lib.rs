pub mod game;
pub mod memory;
pub mod store;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game::GameFields;

    /// Build a stored record with empty blobs and the given creation time.
    pub fn make_fields(name: &str, created_at: &str) -> GameFields {
        GameFields {
            name: name.to_string(),
            description: format!("{name} description"),
            scene_json: String::new(),
            code: String::new(),
            created_at: created_at.to_string(),
        }
    }

    /// Build a stored record carrying scene and code payloads.
    pub fn make_fields_with_payload(name: &str, scene_json: &str, code: &str) -> GameFields {
        GameFields {
            name: name.to_string(),
            description: String::new(),
            scene_json: scene_json.to_string(),
            code: code.to_string(),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }
}
