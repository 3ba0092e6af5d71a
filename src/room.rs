//! Room graph loading
//!
//! Rooms come from a static data file: a JSON array of records, or a TOML
//! file with a `[[room]]` array. They are indexed by identifier in file
//! order, so the first record is the default starting room. Exit targets
//! are not required to exist; a dangling exit only shows up when someone
//! walks through it.

use crate::error::GameError;
use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A named location with descriptive text and directional links
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Room {
    #[serde(alias = "name")]
    pub id: String,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exits: IndexMap<String, String>,
}

impl Room {
    /// Destination room id for a direction, if this room has that exit
    pub fn exit(&self, direction: &str) -> Option<&str> {
        self.exits.get(direction).map(String::as_str)
    }

    /// Display lines for this room: intro (when asked for), description, exits
    pub fn describe(&self, show_intro: bool) -> Vec<String> {
        let mut lines = Vec::new();
        if show_intro {
            if let Some(intro) = self.intro.as_deref().filter(|i| !i.is_empty()) {
                lines.push(intro.to_string());
            }
        }
        if !self.description.is_empty() {
            lines.push(self.description.clone());
        }
        if self.exits.is_empty() {
            lines.push("There are no visible exits.".to_string());
        } else {
            let names: Vec<&str> = self.exits.keys().map(String::as_str).collect();
            lines.push(format!("Exits: {}", names.join(", ")));
        }
        lines
    }
}

#[derive(Deserialize)]
struct TomlRooms {
    #[serde(default)]
    room: Vec<Room>,
}

/// Every loaded room, keyed by id in file order
#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    rooms: IndexMap<String, Room>,
}

impl RoomGraph {
    /// Build the graph from records; a repeated id replaces the earlier record
    pub fn from_rooms(records: Vec<Room>) -> Result<Self, GameError> {
        if records.is_empty() {
            return Err(GameError::NoRooms);
        }

        let mut rooms: IndexMap<String, Room> = IndexMap::with_capacity(records.len());
        for room in records {
            if rooms.contains_key(&room.id) {
                warn!("Duplicate room id '{}', keeping the later record", room.id);
            }
            rooms.insert(room.id.clone(), room);
        }

        let graph = RoomGraph { rooms };
        for (from, direction, to) in graph.dangling_exits() {
            warn!(
                "Room '{}' exit '{}' leads to unknown room '{}'",
                from, direction, to
            );
        }
        Ok(graph)
    }

    /// Parse a JSON array of room records
    pub fn from_json_str(source: &str, origin: &str) -> Result<Self, GameError> {
        let records: Vec<Room> = serde_json::from_str(source).map_err(|e| GameError::Json {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::from_rooms(records)
    }

    /// Parse a TOML document holding a `[[room]]` array
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, GameError> {
        let doc: TomlRooms = toml::from_str(source).map_err(|e| GameError::Toml {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::from_rooms(doc.room)
    }

    /// Read and parse a room file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let origin = path.display().to_string();
        debug!("Loading rooms from {}", origin);

        let source = fs::read_to_string(path).map_err(|e| GameError::Io {
            path: origin.clone(),
            message: e.to_string(),
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let graph = if is_toml {
            Self::from_toml_str(&source, &origin)?
        } else {
            Self::from_json_str(&source, &origin)?
        };

        info!("Loaded {} rooms from {}", graph.room_count(), origin);
        Ok(graph)
    }

    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    /// The first room in file order
    pub fn start_room(&self) -> Option<&Room> {
        self.rooms.values().next()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Every (room, direction, target) whose target is not a loaded room
    pub fn dangling_exits(&self) -> Vec<(&str, &str, &str)> {
        let rooms = &self.rooms;
        rooms
            .values()
            .flat_map(move |room| {
                room.exits
                    .iter()
                    .filter(move |(_, to)| !rooms.contains_key(to.as_str()))
                    .map(move |(dir, to)| (room.id.as_str(), dir.as_str(), to.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const ROOMS_JSON: &str = r#"[
        {"id": "white room", "intro": "You wake up.", "description": "A white room.",
         "exits": {"east": "blue corridor", "north": "nowhere"}},
        {"name": "blue corridor", "description": "A blue corridor.", "exits": {}}
    ]"#;

    #[test]
    fn json_rooms_keep_file_order_and_accept_name_alias() {
        let graph = RoomGraph::from_json_str(ROOMS_JSON, "test").unwrap();
        assert_eq!(graph.room_count(), 2);
        assert_eq!(graph.start_room().unwrap().id, "white room");
        assert!(graph.contains("blue corridor"));
    }

    #[test]
    fn describe_lists_exactly_the_configured_exits() {
        let graph = RoomGraph::from_json_str(ROOMS_JSON, "test").unwrap();
        for room in graph.rooms() {
            let last = room.describe(false).pop().unwrap();
            if room.exits.is_empty() {
                assert_eq!(last, "There are no visible exits.");
            } else {
                let listed: Vec<&str> = last
                    .trim_start_matches("Exits: ")
                    .split(", ")
                    .collect();
                let configured: Vec<&str> = room.exits.keys().map(String::as_str).collect();
                assert_eq!(listed, configured);
            }
        }
    }

    #[test]
    fn intro_only_when_requested() {
        let graph = RoomGraph::from_json_str(ROOMS_JSON, "test").unwrap();
        let room = graph.get("white room").unwrap();
        assert_eq!(room.describe(true)[0], "You wake up.");
        assert_eq!(room.describe(false)[0], "A white room.");
    }

    #[test]
    fn dangling_exits_are_reported_not_rejected() {
        let graph = RoomGraph::from_json_str(ROOMS_JSON, "test").unwrap();
        assert_eq!(
            graph.dangling_exits(),
            vec![("white room", "north", "nowhere")]
        );
    }

    #[test]
    fn toml_rooms_parse() {
        let source = r#"
            [[room]]
            id = "cafe"
            description = "Tables and chairs."
            exits = { west = "blue corridor" }

            [[room]]
            id = "blue corridor"
            description = "Long and blue."
        "#;
        let graph = RoomGraph::from_toml_str(source, "test.toml").unwrap();
        assert_eq!(graph.start_room().unwrap().id, "cafe");
        assert_eq!(graph.get("cafe").unwrap().exit("west"), Some("blue corridor"));
    }

    #[test]
    fn duplicate_ids_keep_first_position_with_later_record() {
        let source = r#"[
            {"id": "a", "description": "first"},
            {"id": "b", "description": "other"},
            {"id": "a", "description": "second"}
        ]"#;
        let graph = RoomGraph::from_json_str(source, "test").unwrap();
        assert_eq!(graph.room_count(), 2);
        let start = graph.start_room().unwrap();
        assert_eq!(start.id, "a");
        assert_eq!(start.description, "second");
    }

    #[test]
    fn malformed_and_empty_inputs_are_errors() {
        assert!(matches!(
            RoomGraph::from_json_str("{not json", "bad.json"),
            Err(GameError::Json { .. })
        ));
        assert!(matches!(
            RoomGraph::from_json_str("[]", "empty.json"),
            Err(GameError::NoRooms)
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RoomGraph::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, GameError::Io { .. }));
        assert_eq!(err.path(), Some("does/not/exist.json"));
    }
}
