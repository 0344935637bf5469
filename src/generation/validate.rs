//! Acceptance checks run on every candidate layout before it is released.

use crate::error::AttemptFailure;
use crate::topology::layout::Layout;
use crate::topology::RoomKind;

/// Facts established while accepting a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub rooms: usize,
    pub edges: usize,
    pub exit_distance: usize,
}

/// Why a candidate layout was turned down
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Unlucky draw; the pipeline may run again with a new seed
    Attempt(AttemptFailure),
    /// Broken structure; indicates a generator defect
    Invariant(String),
}

impl From<AttemptFailure> for Rejection {
    fn from(failure: AttemptFailure) -> Self {
        Rejection::Attempt(failure)
    }
}

/// Checks structure first, then reachability and the Entrance-to-Exit
/// distance by breadth-first search from the Entrance.
pub fn validate_layout(
    layout: &Layout,
    entrance: usize,
    exit: usize,
    min_path_length: usize,
) -> Result<ValidationReport, Rejection> {
    check_structure(layout, entrance, exit).map_err(Rejection::Invariant)?;

    let distances = layout.distances_from(entrance);
    let visited = distances.iter().filter(|d| d.is_some()).count();
    let total = layout.rooms().len();
    if visited != total {
        return Err(AttemptFailure::Unreachable { visited, total }.into());
    }

    let exit_distance = distances[exit].unwrap_or(0);
    if exit_distance < min_path_length {
        return Err(AttemptFailure::ExitTooClose {
            distance: exit_distance,
            required: min_path_length,
        }
        .into());
    }

    Ok(ValidationReport {
        rooms: total,
        edges: layout.edge_count(),
        exit_distance,
    })
}

/// Kinds, cell occupancy and passage symmetry
fn check_structure(layout: &Layout, entrance: usize, exit: usize) -> Result<(), String> {
    let rooms = layout.rooms();
    if entrance >= rooms.len() || exit >= rooms.len() {
        return Err(format!(
            "entrance {entrance} or exit {exit} outside {} rooms",
            rooms.len()
        ));
    }

    for (kind, index) in [(RoomKind::Entrance, entrance), (RoomKind::Exit, exit)] {
        let count = rooms.iter().filter(|r| r.kind() == kind).count();
        if count != 1 {
            return Err(format!("expected exactly one {kind} room, found {count}"));
        }
        if rooms[index].kind() != kind {
            return Err(format!("room at {} is not the {kind}", rooms[index].cell()));
        }
    }

    if layout.occupied_cells() != rooms.len() {
        return Err(format!(
            "{} rooms occupy {} cells",
            rooms.len(),
            layout.occupied_cells()
        ));
    }

    let (width, height) = (layout.width(), layout.height());
    for (index, room) in rooms.iter().enumerate() {
        let cell = room.cell();
        if layout.index_at(cell) != Some(index) {
            return Err(format!("room {index} is not indexed at {cell}"));
        }
        for dir in room.open_directions() {
            let Some(next) = cell.step(dir, width, height) else {
                return Err(format!("{cell} opens {dir:?} out of the grid"));
            };
            let Some(neighbor) = layout.index_at(next) else {
                return Err(format!("{cell} opens {dir:?} onto empty {next}"));
            };
            if !layout.room(neighbor).is_open(dir.opposite()) {
                return Err(format!("passage {cell} -> {next} is one-sided"));
            }
        }
    }

    Ok(())
}
