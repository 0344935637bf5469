//! Mutable room grid used while a dungeon is being generated.

use super::types::{Cell, Direction, Room, RoomId, RoomKind};
use std::collections::VecDeque;

/// Rooms placed on a `width` x `height` grid with a cell index for O(1) lookup.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    width: usize,
    height: usize,
    rooms: Vec<Room>,
    /// Row-major cell -> index into `rooms`
    cells: Vec<Option<usize>>,
}

impl Layout {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rooms: Vec::new(),
            cells: vec![None; width * height],
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub(crate) fn room(&self, index: usize) -> &Room {
        &self.rooms[index]
    }

    pub(crate) fn set_kind(&mut self, index: usize, kind: RoomKind) {
        self.rooms[index].kind = kind;
    }

    fn slot(&self, cell: Cell) -> Option<usize> {
        (cell.x < self.width && cell.y < self.height).then(|| cell.y * self.width + cell.x)
    }

    /// Index of the room on `cell`, if any
    pub(crate) fn index_at(&self, cell: Cell) -> Option<usize> {
        self.slot(cell).and_then(|slot| self.cells[slot])
    }

    pub(crate) fn is_occupied(&self, cell: Cell) -> bool {
        self.index_at(cell).is_some()
    }

    /// Adjacent cells with no room on them
    pub(crate) fn free_neighbors(&self, cell: Cell) -> Vec<(Direction, Cell)> {
        cell.neighbors(self.width, self.height)
            .filter(|&(_, next)| !self.is_occupied(next))
            .collect()
    }

    /// Places a closed room on an empty cell and returns its index.
    pub(crate) fn place(&mut self, id: RoomId, cell: Cell, kind: RoomKind, depth: u32) -> usize {
        let slot = self.slot(cell);
        debug_assert!(
            slot.is_some_and(|s| self.cells[s].is_none()),
            "cell {cell} is outside the grid or occupied"
        );
        let index = self.rooms.len();
        self.rooms.push(Room::new(id, cell, kind, depth));
        if let Some(slot) = slot {
            self.cells[slot] = Some(index);
        }
        index
    }

    /// Removes the most recently placed room and closes every passage into it.
    pub(crate) fn remove_last(&mut self) -> Option<Room> {
        let room = self.rooms.pop()?;
        if let Some(slot) = self.slot(room.cell) {
            self.cells[slot] = None;
        }
        for dir in room.open_directions() {
            if let Some(neighbor) = room
                .cell
                .step(dir, self.width, self.height)
                .and_then(|cell| self.index_at(cell))
            {
                self.rooms[neighbor].connections[dir.opposite().index()] = false;
            }
        }
        Some(room)
    }

    /// Opens a passage from room `index` toward `dir`, on both sides.
    /// Returns the neighbour's index, or None if no room lies there.
    pub(crate) fn connect(&mut self, index: usize, dir: Direction) -> Option<usize> {
        let cell = self.rooms[index].cell;
        let neighbor = cell
            .step(dir, self.width, self.height)
            .and_then(|next| self.index_at(next))?;
        self.rooms[index].connections[dir.index()] = true;
        self.rooms[neighbor].connections[dir.opposite().index()] = true;
        Some(neighbor)
    }

    /// Rooms reachable in one step through an open passage
    pub(crate) fn connected_neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let room = &self.rooms[index];
        room.open_directions().filter_map(move |dir| {
            room.cell
                .step(dir, self.width, self.height)
                .and_then(|cell| self.index_at(cell))
        })
    }

    /// Breadth-first hop distances from `start` along open passages.
    /// Unreachable rooms stay `None`.
    pub(crate) fn distances_from(&self, start: usize) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.rooms.len()];
        let mut queue = VecDeque::new();
        distances[start] = Some(0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let next_distance = distances[current].map(|d| d + 1);
            for neighbor in self.connected_neighbors(current) {
                if distances[neighbor].is_none() {
                    distances[neighbor] = next_distance;
                    queue.push_back(neighbor);
                }
            }
        }

        distances
    }

    /// Each symmetric passage counted once
    pub(crate) fn edge_count(&self) -> usize {
        let open_flags: usize = self.rooms.iter().map(Room::connection_count).sum();
        open_flags / 2
    }

    /// Number of cells holding a room, counted from the cell index
    pub(crate) fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
