//! Dungeon topology generation.
//!
//! A generation run validates the bounds, then runs the pipeline
//! carve → branch → loop → validate on a fresh seeded RNG. A rejected attempt
//! is thrown away whole and the pipeline restarts with the next seed, up to
//! `GeneratorConfig::max_attempts` times.

pub mod bounds;
mod branches;
mod loops;
mod path;
mod validate;

use crate::config::GeneratorConfig;
use crate::error::{AttemptFailure, ConfigError, GenerationError};
use crate::topology::layout::Layout;
use crate::topology::{RoomGraph, RoomId};
use bounds::GridBounds;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Builder;
use validate::{validate_layout, Rejection, ValidationReport};

/// Generates a dungeon for `bounds`. The same bounds, seed and config always
/// produce the same graph.
pub fn generate(
    bounds: &GridBounds,
    seed: u64,
    config: &GeneratorConfig,
) -> Result<RoomGraph, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with_rng(bounds, config, &mut rng)
}

/// Generates a dungeon drawing one attempt seed per pipeline run from `rng`.
pub fn generate_with_rng(
    bounds: &GridBounds,
    config: &GeneratorConfig,
    rng: &mut impl Rng,
) -> Result<RoomGraph, GenerationError> {
    config.validate()?;
    bounds.fit(config)?;

    let _span = tracing::info_span!(
        "generate",
        width = bounds.width(),
        height = bounds.height(),
        min_path = bounds.min_path_length()
    )
    .entered();

    retry_attempts(config.max_attempts, rng, |attempt_seed, attempt| {
        run_attempt(bounds, config, attempt_seed, attempt)
    })
}

/// Bounded retry loop. Each attempt gets a fresh seed drawn from `rng`; an
/// attempt failure moves on to the next seed, an invariant violation stops at
/// once.
fn retry_attempts<F>(
    max_attempts: u32,
    rng: &mut impl Rng,
    mut run: F,
) -> Result<RoomGraph, GenerationError>
where
    F: FnMut(u64, u32) -> Result<(RoomGraph, ValidationReport), Rejection>,
{
    let mut last_failure = None;
    for attempt in 1..=max_attempts {
        let attempt_seed: u64 = rng.gen();
        match run(attempt_seed, attempt) {
            Ok((graph, report)) => {
                tracing::info!(
                    attempt,
                    rooms = report.rooms,
                    edges = report.edges,
                    exit_distance = report.exit_distance,
                    "dungeon generated"
                );
                return Ok(graph);
            }
            Err(Rejection::Attempt(failure)) => {
                tracing::warn!(attempt, attempt_seed, %failure, "attempt rejected");
                last_failure = Some(failure);
            }
            Err(Rejection::Invariant(message)) => {
                tracing::error!(attempt, attempt_seed, %message, "topology invariant violated");
                return Err(GenerationError::InvariantViolation(message));
            }
        }
    }

    match last_failure {
        Some(last) => {
            tracing::error!(attempts = max_attempts, %last, "generation exhausted");
            Err(GenerationError::Exhausted {
                attempts: max_attempts,
                last,
            })
        }
        None => Err(ConfigError::ZeroAttempts.into()),
    }
}

/// Re-runs the single pipeline attempt that produced a graph, from
/// `RoomGraph::attempt_seed`.
pub fn replay(
    bounds: &GridBounds,
    attempt_seed: u64,
    config: &GeneratorConfig,
) -> Result<RoomGraph, GenerationError> {
    config.validate()?;
    bounds.fit(config)?;
    match run_attempt(bounds, config, attempt_seed, 1) {
        Ok((graph, _)) => Ok(graph),
        Err(Rejection::Attempt(last)) => Err(GenerationError::Exhausted { attempts: 1, last }),
        Err(Rejection::Invariant(message)) => Err(GenerationError::InvariantViolation(message)),
    }
}

/// One full pipeline run on its own RNG
fn run_attempt(
    bounds: &GridBounds,
    config: &GeneratorConfig,
    attempt_seed: u64,
    attempt: u32,
) -> Result<(RoomGraph, ValidationReport), Rejection> {
    let mut rng = ChaCha8Rng::seed_from_u64(attempt_seed);
    let mut layout = Layout::new(bounds.width(), bounds.height());

    let main_path = path::carve_main_path(&mut layout, bounds, &mut rng)?;
    let (entrance, exit) = match (main_path.first(), main_path.last()) {
        (Some(&entrance), Some(&exit)) if entrance != exit => (entrance, exit),
        _ => {
            return Err(AttemptFailure::PathTooShort {
                reached: main_path.len().saturating_sub(1),
                required: bounds.min_path_length(),
            }
            .into())
        }
    };

    branches::grow_branches(
        &mut layout,
        &main_path,
        config.branch_chance,
        config.max_branch_depth,
        &mut rng,
    );
    loops::connect_loops(
        &mut layout,
        entrance,
        exit,
        bounds.min_path_length(),
        config.loop_chance,
        &mut rng,
    );

    let report = validate_layout(&layout, entrance, exit, bounds.min_path_length())?;
    let graph = RoomGraph::new(
        layout,
        main_path,
        bounds.min_path_length(),
        attempt_seed,
        attempt,
    )
    .map_err(|e| Rejection::Invariant(format!("topology could not be encoded: {e}")))?;
    Ok((graph, report))
}

/// Room ids come from the attempt RNG so a replay reproduces them
pub(crate) fn roll_room_id(rng: &mut impl Rng) -> RoomId {
    RoomId(Builder::from_random_bytes(rng.gen()).into_uuid())
}
