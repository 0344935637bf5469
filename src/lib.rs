//! Labyrinth - procedural dungeon topology generator
//!
//! Builds a bounded grid of connected rooms with a guaranteed Entrance-to-Exit
//! route of a minimum length, optional side branches and loop-back passages.
//!
//! ```no_run
//! use labyrinth::{generate, GeneratorConfig, GridBounds};
//!
//! let bounds = GridBounds::new(10, 10, 8)?;
//! let graph = generate(&bounds, 42, &GeneratorConfig::default())?;
//! assert!(graph.exit_distance() >= 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod build_info;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod generation;
pub mod topology;

pub use config::GeneratorConfig;
pub use error::{AttemptFailure, ConfigError, ConfigLoadError, GenerationError};
pub use export::{DungeonExport, RoomRecord};
pub use generation::bounds::GridBounds;
pub use generation::{generate, generate_with_rng, replay};
pub use topology::{Cell, Direction, Entity, Room, RoomAnnotations, RoomGraph, RoomId, RoomKind};
