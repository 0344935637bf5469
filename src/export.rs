//! Persisted shape of a generated dungeon.

use crate::topology::{Entity, RoomGraph};
use serde::{Deserialize, Serialize};

/// One room as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: String,
    pub x: usize,
    pub y: usize,
    /// "Entrance", "Exit" or "Normal"
    pub kind: String,
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Whole-dungeon export document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonExport {
    pub width: usize,
    pub height: usize,
    pub min_path_length: usize,
    pub entrance: String,
    pub exit: String,
    pub fingerprint: String,
    pub rooms: Vec<RoomRecord>,
}

impl DungeonExport {
    pub fn from_graph(graph: &RoomGraph) -> Self {
        let rooms = graph
            .rooms()
            .map(|room| {
                let notes = graph.annotations(room.id()).cloned().unwrap_or_default();
                RoomRecord {
                    id: room.id().to_string(),
                    x: room.cell().x,
                    y: room.cell().y,
                    kind: room.kind().as_str().to_string(),
                    north: room.north(),
                    east: room.east(),
                    south: room.south(),
                    west: room.west(),
                    entities: notes.entities,
                    description: notes.description,
                }
            })
            .collect();

        Self {
            width: graph.width(),
            height: graph.height(),
            min_path_length: graph.min_path_length(),
            entrance: graph.entrance_id().to_string(),
            exit: graph.exit_id().to_string(),
            fingerprint: graph.fingerprint().to_string(),
            rooms,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Total entities placed across all rooms
    pub fn entity_count(&self) -> usize {
        self.rooms.iter().map(|room| room.entities.len()).sum()
    }
}
