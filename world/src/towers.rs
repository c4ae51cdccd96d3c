//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use zombie_defence_core::{
    config::{round_amount, EconomyConfig, TowerStats, UpgradeMultipliers},
    GridPosition, TowerId, TowerKind, TowerSnapshot,
};

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) position: GridPosition,
    pub(crate) level: u32,
    pub(crate) damage: u32,
    pub(crate) range: f64,
    pub(crate) attack_speed: f64,
    pub(crate) last_attack: Duration,
    pub(crate) cost: u32,
    pub(crate) sell_value: u32,
    pub(crate) upgrade_cost: u32,
    pub(crate) area_effect: bool,
    pub(crate) buff_radius: f64,
    pub(crate) gold_production_rate: u32,
    pub(crate) last_production: Duration,
}

impl TowerState {
    /// Builds a level one tower whose timers start at `now`.
    pub(crate) fn build(
        id: TowerId,
        kind: TowerKind,
        position: GridPosition,
        stats: &TowerStats,
        economy: &EconomyConfig,
        now: Duration,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            level: 1,
            damage: stats.damage,
            range: stats.range,
            attack_speed: stats.attack_speed,
            last_attack: now,
            cost: stats.cost,
            sell_value: economy.sell_value(stats.cost),
            upgrade_cost: stats.upgrade_cost,
            area_effect: stats.area_effect,
            buff_radius: stats.buff_radius,
            gold_production_rate: stats.gold_production_rate,
            last_production: now,
        }
    }

    /// Raises the tower by one level and returns the gold the upgrade consumed.
    ///
    /// Stats never decrease, whatever the configured multipliers.
    pub(crate) fn upgrade(
        &mut self,
        multipliers: &UpgradeMultipliers,
        economy: &EconomyConfig,
    ) -> u32 {
        let consumed = self.upgrade_cost;

        self.level = self.level.saturating_add(1);
        self.damage = round_amount(f64::from(self.damage) * multipliers.damage).max(self.damage);
        self.range = round_tenth(self.range * multipliers.range).max(self.range);
        self.attack_speed =
            round_tenth(self.attack_speed * multipliers.attack_speed).max(self.attack_speed);
        self.upgrade_cost = round_amount(f64::from(self.upgrade_cost) * multipliers.upgrade_cost);
        if self.gold_production_rate > 0 {
            self.gold_production_rate = round_amount(
                f64::from(self.gold_production_rate) * multipliers.gold_production_rate,
            )
            .max(self.gold_production_rate);
        }
        self.sell_value = economy.sell_value(self.cost.saturating_add(consumed));

        consumed
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            level: self.level,
            damage: self.damage,
            range: self.range,
            attack_speed: self.attack_speed,
            last_attack: self.last_attack,
            cost: self.cost,
            sell_value: self.sell_value,
            upgrade_cost: self.upgrade_cost,
            area_effect: self.area_effect,
            buff_radius: self.buff_radius,
            gold_production_rate: self.gold_production_rate,
            last_production: self.last_production,
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    pub(crate) fn allocate_id(&mut self) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        id
    }

    pub(crate) fn insert(&mut self, tower: TowerState) {
        let _ = self.entries.insert(tower.id, tower);
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<TowerState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }
}
