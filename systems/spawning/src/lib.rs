#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for releasing wave enemies.

use std::time::Duration;

use zombie_defence_core::{interval_for_rate, Command, GameStatus, WaveSnapshot};

/// Pure system that releases at most one enemy per tick from the active wave.
#[derive(Debug, Default)]
pub struct Spawning;

impl Spawning {
    /// Creates a new spawning system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the spawn command due at `now`, if any. The world draws the kind from the roster.
    ///
    /// Once the roster is exhausted the system reports the wave as emitted
    /// instead of spawning; the world ignores the report after the first time.
    pub fn handle(
        &self,
        status: GameStatus,
        wave: &WaveSnapshot,
        now: Duration,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Running || wave.completed {
            return;
        }

        if wave.emitted >= wave.count() {
            out.push(Command::MarkWaveEmitted);
            return;
        }

        let Some(interval) = interval_for_rate(wave.spawn_rate) else {
            return;
        };
        if now.saturating_sub(wave.last_spawn) < interval {
            return;
        }

        out.push(Command::SpawnEnemy);
    }
}
