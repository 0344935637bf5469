//! Dungeon topology: rooms on a grid joined by symmetric passages.

mod graph;
pub(crate) mod layout;
mod types;

pub use graph::RoomGraph;
pub use types::{Cell, Direction, Entity, Room, RoomAnnotations, RoomId, RoomKind};
