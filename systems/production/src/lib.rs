#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that pays out resource towers, boosted by nearby aura towers.

use std::time::Duration;

use zombie_defence_core::{
    config::{round_amount, ProductionConfig},
    Command, EconomySnapshot, GameStatus, TowerSnapshot, TowerView,
};

/// Gold production system.
#[derive(Debug, Default)]
pub struct Production;

impl Production {
    /// Creates a new production system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::ProduceGold` for every producer whose interval elapsed.
    pub fn handle(
        &self,
        status: GameStatus,
        now: Duration,
        towers: &TowerView,
        economy: &EconomySnapshot,
        config: &ProductionConfig,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Running {
            return;
        }

        let interval = config.interval();
        for producer in towers.iter().filter(|tower| tower.is_producer()) {
            if now.saturating_sub(producer.last_production) < interval {
                continue;
            }

            let aura = aura_multiplier(producer, towers, config.aura_bonus_per_level);
            let amount = round_amount(
                f64::from(producer.gold_production_rate) * aura * economy.gold_multiplier,
            );
            out.push(Command::ProduceGold {
                tower: producer.id,
                amount,
            });
        }
    }
}

/// Production multiplier granted to `producer` by the nearest aura tower.
///
/// Only one aura applies; equidistant buffers resolve to the lower identifier.
#[must_use]
pub fn aura_multiplier(producer: &TowerSnapshot, towers: &TowerView, bonus_per_level: f64) -> f64 {
    towers
        .iter()
        .filter(|buffer| buffer.id != producer.id && buffer.is_aura())
        .map(|buffer| (buffer, buffer.position.distance(producer.position)))
        .filter(|(buffer, distance)| *distance <= buffer.buff_radius)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map_or(1.0, |(buffer, _)| {
            1.0 + bonus_per_level * f64::from(buffer.level)
        })
}
