//! The finished, validated dungeon topology.

use super::layout::Layout;
use super::types::{Cell, Direction, Room, RoomAnnotations, RoomId, RoomKind};
use crate::constants::FINGERPRINT_MAGIC;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Read-only dungeon topology handed to rendering, export and entity placement.
///
/// Rooms and passages are fixed once the graph exists. Collaborators may only
/// attach [`RoomAnnotations`] through [`RoomGraph::annotate`].
#[derive(Debug, Clone)]
pub struct RoomGraph {
    layout: Layout,
    annotations: Vec<RoomAnnotations>,
    by_id: HashMap<RoomId, usize>,
    entrance: usize,
    exit: usize,
    main_path: Vec<usize>,
    min_path_length: usize,
    attempt_seed: u64,
    attempts: u32,
    fingerprint: String,
}

/// Topology fields covered by the fingerprint
#[derive(Serialize)]
struct TopologyDigest<'a> {
    width: usize,
    height: usize,
    rooms: &'a [Room],
    entrance: RoomId,
    exit: RoomId,
}

impl RoomGraph {
    pub(crate) fn new(
        layout: Layout,
        main_path: Vec<usize>,
        min_path_length: usize,
        attempt_seed: u64,
        attempts: u32,
    ) -> Result<Self, bincode::Error> {
        let by_id = layout
            .rooms()
            .iter()
            .enumerate()
            .map(|(index, room)| (room.id, index))
            .collect();
        let entrance = main_path.first().copied().unwrap_or(0);
        let exit = main_path.last().copied().unwrap_or(0);
        let annotations = vec![RoomAnnotations::default(); layout.rooms().len()];
        let fingerprint = topology_fingerprint(&layout, entrance, exit)?;

        Ok(Self {
            layout,
            annotations,
            by_id,
            entrance,
            exit,
            main_path,
            min_path_length,
            attempt_seed,
            attempts,
            fingerprint,
        })
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    /// Minimum Entrance-to-Exit hop count this graph was generated for
    pub fn min_path_length(&self) -> usize {
        self.min_path_length
    }

    /// Seed of the pipeline run that produced this graph
    pub fn attempt_seed(&self) -> u64 {
        self.attempt_seed
    }

    /// Pipeline runs it took, including the accepted one
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn room_count(&self) -> usize {
        self.layout.rooms().len()
    }

    pub fn edge_count(&self) -> usize {
        self.layout.edge_count()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.layout.rooms().iter()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.by_id.get(&id).map(|&index| self.layout.room(index))
    }

    pub fn room_at(&self, cell: Cell) -> Option<&Room> {
        self.layout.index_at(cell).map(|index| self.layout.room(index))
    }

    pub fn entrance(&self) -> &Room {
        self.layout.room(self.entrance)
    }

    pub fn exit(&self) -> &Room {
        self.layout.room(self.exit)
    }

    pub fn entrance_id(&self) -> RoomId {
        self.entrance().id
    }

    pub fn exit_id(&self) -> RoomId {
        self.exit().id
    }

    /// Rooms of the carved route, Entrance first and Exit last
    pub fn main_path(&self) -> impl Iterator<Item = &Room> {
        self.main_path.iter().map(|&index| self.layout.room(index))
    }

    /// Hops along the carved route
    pub fn main_path_len(&self) -> usize {
        self.main_path.len().saturating_sub(1)
    }

    /// Rooms behind the open passages of `id`, with the direction taken
    pub fn neighbors(&self, id: RoomId) -> Vec<(Direction, &Room)> {
        let Some(room) = self.room(id) else {
            return Vec::new();
        };
        room.open_directions()
            .filter_map(|dir| {
                room.cell
                    .step(dir, self.width(), self.height())
                    .and_then(|cell| self.room_at(cell))
                    .map(|neighbor| (dir, neighbor))
            })
            .collect()
    }

    /// Hop distance from `from` to every reachable room
    pub fn distances_from(&self, from: RoomId) -> HashMap<RoomId, usize> {
        let Some(&start) = self.by_id.get(&from) else {
            return HashMap::new();
        };
        self.layout
            .distances_from(start)
            .into_iter()
            .enumerate()
            .filter_map(|(index, distance)| distance.map(|d| (self.layout.room(index).id, d)))
            .collect()
    }

    pub fn shortest_path_len(&self, from: RoomId, to: RoomId) -> Option<usize> {
        let (&start, &goal) = (self.by_id.get(&from)?, self.by_id.get(&to)?);
        self.layout.distances_from(start)[goal]
    }

    /// Shortest Entrance-to-Exit hop count
    pub fn exit_distance(&self) -> usize {
        self.layout.distances_from(self.entrance)[self.exit].unwrap_or(0)
    }

    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = &Room> {
        self.rooms().filter(move |room| room.kind == kind)
    }

    pub fn dead_ends(&self) -> impl Iterator<Item = &Room> {
        self.rooms().filter(|room| room.is_dead_end())
    }

    pub fn annotations(&self, id: RoomId) -> Option<&RoomAnnotations> {
        self.by_id.get(&id).map(|&index| &self.annotations[index])
    }

    /// Mutable access to a room's description and entities
    pub fn annotate(&mut self, id: RoomId) -> Option<&mut RoomAnnotations> {
        let index = *self.by_id.get(&id)?;
        Some(&mut self.annotations[index])
    }

    /// SHA-256 hex digest of the topology (ids, cells, kinds, passages).
    /// Annotations do not contribute.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn topology_fingerprint(
    layout: &Layout,
    entrance: usize,
    exit: usize,
) -> Result<String, bincode::Error> {
    let digest = TopologyDigest {
        width: layout.width(),
        height: layout.height(),
        rooms: layout.rooms(),
        entrance: layout.room(entrance).id,
        exit: layout.room(exit).id,
    };
    let data = bincode::serialize(&digest)?;

    let mut hasher = Sha256::new();
    hasher.update(FINGERPRINT_MAGIC.to_le_bytes());
    hasher.update(&data);
    Ok(hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect())
}
