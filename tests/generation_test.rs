//! Integration test: dungeon generation end to end
//!
//! Fixed-seed scenarios checked against the topology invariants through the
//! public API only.

use labyrinth::{
    generate, generate_with_rng, ConfigError, Direction, DungeonExport, Entity, GenerationError,
    GeneratorConfig, GridBounds, RoomGraph, RoomKind,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashSet, VecDeque};

/// Asserts every topology invariant on an accepted graph
fn assert_invariants(graph: &RoomGraph, max_width: usize, max_height: usize) {
    // Exactly one Entrance and one Exit
    assert_eq!(graph.rooms_of_kind(RoomKind::Entrance).count(), 1);
    assert_eq!(graph.rooms_of_kind(RoomKind::Exit).count(), 1);
    assert_eq!(graph.entrance().kind(), RoomKind::Entrance);
    assert_eq!(graph.exit().kind(), RoomKind::Exit);

    // Grid size within limits
    assert!(graph.width() <= max_width && graph.height() <= max_height);

    // One room per cell, all inside the grid
    let mut cells = HashSet::new();
    for room in graph.rooms() {
        let cell = room.cell();
        assert!(cell.x < graph.width() && cell.y < graph.height());
        assert!(cells.insert(cell), "two rooms on {cell}");
        assert_eq!(graph.room_at(cell).map(|r| r.id()), Some(room.id()));
        assert_eq!(graph.room(room.id()).map(|r| r.cell()), Some(cell));
    }

    // Flags agree with adjacency on both sides
    for room in graph.rooms() {
        for (dir, cell) in room.cell().neighbors(graph.width(), graph.height()) {
            match graph.room_at(cell) {
                Some(other) => assert_eq!(
                    room.is_open(dir),
                    other.is_open(dir.opposite()),
                    "one-sided passage between {} and {cell}",
                    room.cell()
                ),
                None => assert!(!room.is_open(dir), "{} opens onto empty {cell}", room.cell()),
            }
        }
        for dir in Direction::ALL {
            if room.cell().step(dir, graph.width(), graph.height()).is_none() {
                assert!(!room.is_open(dir), "{} opens out of the grid", room.cell());
            }
        }
    }

    // Everything reachable from the Entrance, Exit far enough away
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let mut exit_distance = None;
    seen.insert(graph.entrance_id());
    queue.push_back((graph.entrance_id(), 0));
    while let Some((id, distance)) = queue.pop_front() {
        if id == graph.exit_id() {
            exit_distance = Some(distance);
        }
        for (_, neighbor) in graph.neighbors(id) {
            if seen.insert(neighbor.id()) {
                queue.push_back((neighbor.id(), distance + 1));
            }
        }
    }
    assert_eq!(seen.len(), graph.room_count(), "unreachable rooms");
    let exit_distance = exit_distance.expect("exit reachable");
    assert!(exit_distance >= graph.min_path_length());
    assert_eq!(exit_distance, graph.exit_distance());
}

fn bounds(width: usize, height: usize, min: usize) -> GridBounds {
    GridBounds::new(width, height, min).unwrap()
}

#[test]
fn test_seed_42_scenario() {
    let config = GeneratorConfig::default();
    let graph = generate(&bounds(10, 10, 8), 42, &config).unwrap();
    assert_invariants(&graph, config.max_width, config.max_height);

    let again = generate(&bounds(10, 10, 8), 42, &config).unwrap();
    assert_eq!(again.fingerprint(), graph.fingerprint());
    let cells: Vec<_> = graph.rooms().map(|r| (r.cell(), r.kind())).collect();
    let cells_again: Vec<_> = again.rooms().map(|r| (r.cell(), r.kind())).collect();
    assert_eq!(cells, cells_again);

    let other = generate(&bounds(10, 10, 8), 43, &config).unwrap();
    assert_invariants(&other, config.max_width, config.max_height);
    assert_ne!(other.fingerprint(), graph.fingerprint());
}

#[test]
fn test_many_seeds_hold_invariants() {
    let config = GeneratorConfig::default();
    for seed in 0..40 {
        let graph = generate(&bounds(12, 8, 10), seed, &config).unwrap();
        assert_invariants(&graph, config.max_width, config.max_height);
    }
}

#[test]
fn test_grid_diameter_minimum_succeeds() {
    let config = GeneratorConfig::default();
    for (width, height) in [(2, 2), (5, 5), (10, 10), (7, 3), (1, 6)] {
        let max = (width - 1) + (height - 1);
        let graph = generate(&bounds(width, height, max), 9, &config).unwrap();
        assert_invariants(&graph, config.max_width, config.max_height);
        assert!(graph.exit_distance() >= max);
    }
}

#[test]
fn test_one_past_grid_diameter_is_configuration_error() {
    assert_eq!(
        GridBounds::new(10, 10, 19),
        Err(ConfigError::PathLengthUnsatisfiable {
            min_path_length: 19,
            width: 10,
            height: 10,
            max: 18
        })
    );
}

#[test]
fn test_oversized_grid_is_configuration_error() {
    let config = GeneratorConfig::default();
    let err = generate(&bounds(config.max_width + 1, 4, 3), 1, &config).unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Configuration(ConfigError::WidthTooLarge { .. })
    ));
}

#[test]
fn test_zero_chances_give_bare_main_path() {
    let config = GeneratorConfig::bare();
    for seed in 0..20 {
        let graph = generate(&bounds(10, 10, 8), seed, &config).unwrap();
        assert_invariants(&graph, config.max_width, config.max_height);
        assert_eq!(graph.room_count(), graph.main_path_len() + 1);
        assert_eq!(graph.edge_count(), graph.room_count() - 1);
        assert_eq!(graph.exit_distance(), graph.main_path_len());
        assert!(graph.rooms().all(|r| r.branch_depth() == 0));
    }
}

#[test]
fn test_enrichment_keeps_the_main_path() {
    // Branches and loops run after carving on the same RNG stream, so the
    // carved route is shared with the bare configuration
    let bare = generate(&bounds(10, 10, 8), 17, &GeneratorConfig::bare()).unwrap();
    let rich = generate(&bounds(10, 10, 8), 17, &GeneratorConfig::maximal()).unwrap();
    let bare_path: Vec<_> = bare.main_path().map(|r| (r.id(), r.cell())).collect();
    let rich_path: Vec<_> = rich.main_path().map(|r| (r.id(), r.cell())).collect();
    assert_eq!(bare_path, rich_path);
    assert!(rich.room_count() >= bare.room_count());
}

#[test]
fn test_full_chances_hold_invariants() {
    let config = GeneratorConfig::maximal();
    for seed in 0..20 {
        let graph = generate(&bounds(9, 9, 12), seed, &config).unwrap();
        assert_invariants(&graph, config.max_width, config.max_height);
        assert!(graph.edge_count() >= graph.room_count() - 1);
        assert!(graph.rooms().all(|r| r.branch_depth() <= config.max_branch_depth));
    }
}

#[test]
fn test_packed_grid_is_not_a_failure() {
    let config = GeneratorConfig {
        max_branch_depth: 50,
        ..GeneratorConfig::maximal()
    };
    let graph = generate(&bounds(4, 4, 3), 8, &config).unwrap();
    assert_invariants(&graph, config.max_width, config.max_height);
    assert_eq!(graph.room_count(), 16);
}

#[test]
fn test_injected_rng_is_reproducible() {
    let config = GeneratorConfig::default();
    let a = generate_with_rng(&bounds(8, 8, 6), &config, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    let b = generate_with_rng(&bounds(8, 8, 6), &config, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_annotated_graph_exports() {
    let mut graph = generate(&bounds(6, 6, 5), 21, &GeneratorConfig::default()).unwrap();
    let ids: Vec<_> = graph.dead_ends().map(|r| r.id()).collect();
    for id in &ids {
        graph
            .annotate(*id)
            .unwrap()
            .entities
            .push(Entity::TreasureChest { gold: 25 });
    }

    let export = DungeonExport::from_graph(&graph);
    assert_eq!(export.entity_count(), ids.len());
    assert_eq!(export.fingerprint, graph.fingerprint());
    assert!(export.rooms.iter().any(|r| r.kind == "Entrance"));
    assert!(export.rooms.iter().any(|r| r.kind == "Exit"));
}
