//! Main route carving: randomized depth-first walk from a border cell.

use super::bounds::GridBounds;
use super::roll_room_id;
use crate::error::AttemptFailure;
use crate::topology::layout::Layout;
use crate::topology::{Cell, RoomKind};
use rand::seq::SliceRandom;
use rand::Rng;

/// Carves the Entrance-to-Exit route into an empty layout.
///
/// The Entrance is a random border cell far enough from some other cell for
/// the minimum length to be reachable at all. The walk keeps stepping into
/// unexplored neighbours for as long as it can. Once stuck, the current cell
/// becomes the Exit if the route is long enough;
/// otherwise the dead-end room is retracted and the walk resumes from the
/// previous cell. Retracted cells stay explored, so the walk terminates after
/// at most one visit per cell.
///
/// Returns the room indices of the route, Entrance first. Rooms in the layout
/// are exactly the route rooms, in order.
pub fn carve_main_path(
    layout: &mut Layout,
    bounds: &GridBounds,
    rng: &mut impl Rng,
) -> Result<Vec<usize>, AttemptFailure> {
    let (width, height) = (bounds.width(), bounds.height());
    let required = bounds.min_path_length();

    let border: Vec<Cell> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
        .filter(|cell| cell.is_border(width, height))
        .filter(|cell| eccentricity(*cell, width, height) >= required)
        .collect();
    let &start = border.choose(rng).ok_or(AttemptFailure::PathTooShort {
        reached: 0,
        required,
    })?;

    let mut explored = vec![false; width * height];
    explored[start.y * width + start.x] = true;
    layout.place(roll_room_id(rng), start, RoomKind::Entrance, 0);

    let mut stack: Vec<(Cell, usize)> = vec![(start, 0)];
    let mut longest = 0;

    while let Some(&(current, index)) = stack.last() {
        let forward: Vec<_> = current
            .neighbors(width, height)
            .filter(|(_, next)| !explored[next.y * width + next.x])
            .collect();

        if let Some(&(dir, next)) = forward.choose(rng) {
            explored[next.y * width + next.x] = true;
            let next_index = layout.place(roll_room_id(rng), next, RoomKind::Normal, 0);
            layout.connect(index, dir);
            stack.push((next, next_index));
            longest = longest.max(stack.len() - 1);
            continue;
        }

        let hops = stack.len() - 1;
        if hops >= required {
            layout.set_kind(index, RoomKind::Exit);
            tracing::debug!(hops, exit = %current, "main path carved");
            return Ok(stack.iter().map(|&(_, index)| index).collect());
        }

        if stack.len() == 1 {
            break;
        }
        stack.pop();
        layout.remove_last();
    }

    Err(AttemptFailure::PathTooShort {
        reached: longest,
        required,
    })
}

/// Manhattan distance from `cell` to the farthest cell of the grid.
/// Depth-first carving visits every cell, each at a depth no smaller than its
/// distance from the start, so a start with eccentricity >= the minimum
/// always yields a long enough route.
fn eccentricity(cell: Cell, width: usize, height: usize) -> usize {
    cell.x.max(width - 1 - cell.x) + cell.y.max(height - 1 - cell.y)
}
