//! Side corridors hanging off the main route.

use super::roll_room_id;
use crate::topology::layout::Layout;
use crate::topology::RoomKind;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Grows dead-end corridors from the main path and, recursively, from the
/// corridors themselves. Returns the number of rooms added.
///
/// Rooms are handled in queue order starting with the main path. A room below
/// `max_depth` rolls `chance`; on success it opens into a random empty
/// neighbour and is queued again together with the new room, so a room keeps
/// sprouting until a roll fails or it runs out of space. Occupied neighbours
/// are never joined here.
pub fn grow_branches(
    layout: &mut Layout,
    main_path: &[usize],
    chance: f64,
    max_depth: u32,
    rng: &mut impl Rng,
) -> usize {
    if chance <= 0.0 || max_depth == 0 {
        return 0;
    }

    let mut queue: VecDeque<usize> = main_path.iter().copied().collect();
    let mut added = 0;

    while let Some(index) = queue.pop_front() {
        let room = layout.room(index);
        let depth = room.branch_depth();
        if depth >= max_depth || !rng.gen_bool(chance) {
            continue;
        }

        // Saturated neighbourhood: nothing to do for this room
        let free = layout.free_neighbors(room.cell());
        let Some(&(dir, cell)) = free.choose(rng) else {
            continue;
        };

        let child = layout.place(roll_room_id(rng), cell, RoomKind::Normal, depth + 1);
        layout.connect(index, dir);
        added += 1;

        queue.push_back(child);
        queue.push_back(index);
    }

    tracing::debug!(added, "branches grown");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::bounds::GridBounds;
    use crate::generation::path::carve_main_path;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn carved(seed: u64) -> (Layout, Vec<usize>, ChaCha8Rng) {
        let bounds = GridBounds::new(10, 10, 8).unwrap();
        let mut layout = Layout::new(10, 10);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let path = carve_main_path(&mut layout, &bounds, &mut rng).unwrap();
        (layout, path, rng)
    }

    #[test]
    fn test_zero_chance_adds_nothing() {
        let (mut layout, path, mut rng) = carved(1);
        let before = layout.rooms().to_vec();
        assert_eq!(grow_branches(&mut layout, &path, 0.0, 3, &mut rng), 0);
        assert_eq!(layout.rooms(), &before[..]);
    }

    #[test]
    fn test_zero_depth_adds_nothing() {
        let (mut layout, path, mut rng) = carved(2);
        assert_eq!(grow_branches(&mut layout, &path, 1.0, 0, &mut rng), 0);
        assert_eq!(layout.rooms().len(), path.len());
    }

    #[test]
    fn test_branches_keep_the_tree_shape() {
        for seed in 0..20 {
            let (mut layout, path, mut rng) = carved(seed);
            let added = grow_branches(&mut layout, &path, 0.5, 3, &mut rng);
            assert_eq!(layout.rooms().len(), path.len() + added);
            // Each new room brings exactly one passage
            assert_eq!(layout.edge_count(), layout.rooms().len() - 1);
        }
    }

    #[test]
    fn test_branch_depth_respected() {
        for seed in 0..20 {
            let (mut layout, path, mut rng) = carved(seed);
            grow_branches(&mut layout, &path, 1.0, 2, &mut rng);
            assert!(layout.rooms().iter().all(|r| r.branch_depth() <= 2));
        }
    }

    #[test]
    fn test_branches_never_add_special_rooms() {
        let (mut layout, path, mut rng) = carved(5);
        grow_branches(&mut layout, &path, 1.0, 4, &mut rng);
        let count = |kind| layout.rooms().iter().filter(|r| r.kind() == kind).count();
        assert_eq!(count(RoomKind::Entrance), 1);
        assert_eq!(count(RoomKind::Exit), 1);
    }

    #[test]
    fn test_full_chance_saturates_main_path_neighbourhood() {
        let (mut layout, path, mut rng) = carved(9);
        grow_branches(&mut layout, &path, 1.0, 1, &mut rng);
        for &index in &path {
            let cell = layout.room(index).cell();
            assert!(
                layout.free_neighbors(cell).is_empty(),
                "main path room at {cell} still has free neighbours"
            );
        }
    }

    #[test]
    fn test_branch_rooms_hang_off_shallower_rooms() {
        let (mut layout, path, mut rng) = carved(13);
        grow_branches(&mut layout, &path, 0.8, 3, &mut rng);
        for (index, room) in layout.rooms().iter().enumerate().skip(path.len()) {
            let parents: Vec<u32> = layout
                .connected_neighbors(index)
                .map(|n| layout.room(n).branch_depth())
                .collect();
            assert!(parents.contains(&(room.branch_depth() - 1)));
        }
    }
}
