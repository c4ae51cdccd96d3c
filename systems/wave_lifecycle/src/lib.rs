#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects cleared waves and prices their reward.

use zombie_defence_core::{
    config::{round_amount, WaveRewardConfig},
    Command, EconomySnapshot, GameStatus, WaveSnapshot,
};

/// Wave lifecycle system.
#[derive(Debug, Default)]
pub struct WaveLifecycle;

impl WaveLifecycle {
    /// Creates a new wave lifecycle system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::ClearWave` once the active wave is emitted and the board is empty.
    pub fn handle(
        &self,
        status: GameStatus,
        wave: &WaveSnapshot,
        enemy_count: usize,
        tower_count: usize,
        economy: &EconomySnapshot,
        config: &WaveRewardConfig,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Running || !wave.completed || enemy_count > 0 {
            return;
        }

        out.push(Command::ClearWave {
            reward: reward(config, economy, tower_count),
        });
    }
}

/// Gold granted for clearing a wave with the current lives and towers.
#[must_use]
pub fn reward(config: &WaveRewardConfig, economy: &EconomySnapshot, tower_count: usize) -> u32 {
    let towers = u32::try_from(tower_count).unwrap_or(u32::MAX);
    let base = f64::from(config.base_gold)
        + f64::from(economy.lives) * f64::from(config.per_life_bonus)
        + f64::from(towers) * f64::from(config.per_tower_bonus);
    round_amount(base * economy.gold_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use zombie_defence_core::EnemyKind;

    fn economy(lives: u32, gold_multiplier: f64) -> EconomySnapshot {
        EconomySnapshot {
            gold: 0,
            lives,
            gold_multiplier,
        }
    }

    fn wave(completed: bool) -> WaveSnapshot {
        WaveSnapshot {
            number: 1,
            total_waves: 10,
            enemies: vec![EnemyKind::BasicZombie; 2],
            spawn_rate: 0.6,
            emitted: 2,
            last_spawn: Duration::ZERO,
            completed,
        }
    }

    #[test]
    fn reward_counts_lives_and_towers() {
        let config = WaveRewardConfig::default();
        assert_eq!(reward(&config, &economy(100, 1.0), 2), 260);
        assert_eq!(reward(&config, &economy(100, 0.75), 2), 195);
        assert_eq!(reward(&config, &economy(0, 1.0), 0), 50);
    }

    #[test]
    fn clears_only_completed_empty_waves() {
        let system = WaveLifecycle::new();
        let config = WaveRewardConfig::default();
        let mut out = Vec::new();

        system.handle(
            GameStatus::Running,
            &wave(false),
            0,
            0,
            &economy(100, 1.0),
            &config,
            &mut out,
        );
        assert!(out.is_empty(), "wave still emitting");

        system.handle(
            GameStatus::Running,
            &wave(true),
            1,
            0,
            &economy(100, 1.0),
            &config,
            &mut out,
        );
        assert!(out.is_empty(), "enemies remain on the board");

        system.handle(
            GameStatus::Running,
            &wave(true),
            0,
            2,
            &economy(100, 1.0),
            &config,
            &mut out,
        );
        assert_eq!(out, vec![Command::ClearWave { reward: 260 }]);
    }
}
