#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along the fixed path.
//!
//! Consecutive path points are orthogonal neighbours, so every segment is
//! one cell long and segment progress doubles as travelled distance.

use std::time::Duration;

use zombie_defence_core::{Command, EnemyView, Event, GridPosition, PathMotion};

/// Pure system that reacts to elapsed time and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits one `Command::MoveEnemy` per live enemy whose path state changed.
    ///
    /// Elapsed time is taken from the `Event::TimeAdvanced` entries of
    /// `events`; without them the system stays silent.
    pub fn handle(
        &self,
        events: &[Event],
        enemies: &EnemyView,
        path: &[GridPosition],
        out: &mut Vec<Command>,
    ) {
        let elapsed = elapsed(events);
        if elapsed.is_zero() || path.len() < 2 {
            return;
        }

        let seconds = elapsed.as_secs_f64();
        for enemy in enemies.iter().filter(|enemy| enemy.is_live()) {
            let motion = advance(enemy.motion, enemy.speed * seconds, path);
            if motion != enemy.motion {
                out.push(Command::MoveEnemy {
                    enemy: enemy.id,
                    motion,
                });
            }
        }
    }
}

fn elapsed(events: &[Event]) -> Duration {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TimeAdvanced { dt } => Some(*dt),
            _ => None,
        })
        .fold(Duration::ZERO, Duration::saturating_add)
}

/// Moves `motion` forward by `distance` cells along `path`.
///
/// Progress carries over segment boundaries until the final segment; an
/// enemy that completes the final segment is parked on the last path point
/// with `reached_end` set.
#[must_use]
pub fn advance(motion: PathMotion, distance: f64, path: &[GridPosition]) -> PathMotion {
    if motion.reached_end || path.len() < 2 {
        return motion;
    }

    let last_segment = path.len() - 2;
    let mut path_index = motion.path_index.min(last_segment);
    let mut progress = motion.progress + distance.max(0.0);

    while progress >= 1.0 && path_index < last_segment {
        progress -= 1.0;
        path_index += 1;
    }

    if progress >= 1.0 {
        return PathMotion {
            path_index,
            progress: 1.0,
            position: path[path.len() - 1].to_point(),
            reached_end: true,
        };
    }

    let from = path[path_index].to_point();
    let to = path[path_index + 1].to_point();
    PathMotion {
        path_index,
        progress,
        position: from.lerp(to, progress),
        reached_end: false,
    }
}
