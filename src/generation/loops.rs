//! Extra passages between rooms that are already placed.

use crate::topology::layout::Layout;
use crate::topology::{Cell, Direction};
use rand::Rng;

/// Opens passages between adjacent, unconnected rooms. Returns the number of
/// passages added.
///
/// Every adjacent pair is considered once (east and south of each room, in
/// row-major order) and joined with probability `chance`. A passage that would
/// bring the Exit closer than `min_path_length` hops to the Entrance is skipped.
pub fn connect_loops(
    layout: &mut Layout,
    entrance: usize,
    exit: usize,
    min_path_length: usize,
    chance: f64,
    rng: &mut impl Rng,
) -> usize {
    if chance <= 0.0 {
        return 0;
    }

    let (width, height) = (layout.width(), layout.height());
    let mut from_entrance = layout.distances_from(entrance);
    let mut to_exit = layout.distances_from(exit);
    let mut added = 0;
    let mut skipped = 0;

    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x, y);
            let Some(a) = layout.index_at(cell) else {
                continue;
            };

            for dir in [Direction::East, Direction::South] {
                let Some(b) = cell
                    .step(dir, width, height)
                    .and_then(|next| layout.index_at(next))
                else {
                    continue;
                };
                if layout.room(a).is_open(dir) || !rng.gen_bool(chance) {
                    continue;
                }

                // Route through the new passage in either direction
                let via = |p: usize, q: usize| match (from_entrance[p], to_exit[q]) {
                    (Some(head), Some(tail)) => head + 1 + tail,
                    _ => usize::MAX,
                };
                if via(a, b).min(via(b, a)) < min_path_length {
                    skipped += 1;
                    continue;
                }

                layout.connect(a, dir);
                added += 1;
                from_entrance = layout.distances_from(entrance);
                to_exit = layout.distances_from(exit);
            }
        }
    }

    tracing::debug!(added, skipped, "loops connected");
    added
}
