#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns targeting data into attack commands.

use std::collections::BTreeMap;

use zombie_defence_core::{
    config::{round_amount, SplashConfig},
    Command, EnemyId, EnemyView, GameStatus, Hit, TowerSnapshot, TowerTarget, TowerView,
    WorldPoint,
};

/// Tower combat system that queues attack commands for ready towers.
///
/// Towers fire in identifier order against a local health ledger, so a tower
/// never spends its attack on an enemy that an earlier tower already killed
/// in the same tick.
#[derive(Debug, Default)]
pub struct TowerCombat {
    ledger: BTreeMap<EnemyId, LedgerEntry>,
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::ResolveAttack` entries for towers with a live target.
    pub fn handle(
        &mut self,
        status: GameStatus,
        towers: &TowerView,
        enemies: &EnemyView,
        tower_targets: &[TowerTarget],
        splash: &SplashConfig,
        out: &mut Vec<Command>,
    ) {
        if status != GameStatus::Running || tower_targets.is_empty() {
            return;
        }

        self.prepare_ledger(enemies);
        if self.ledger.is_empty() {
            return;
        }

        let towers: Vec<&TowerSnapshot> = towers.iter().collect();
        self.scratch.clear();

        for target in tower_targets {
            let Some(tower) = find_tower(&towers, target) else {
                continue;
            };
            if let Some(hits) = self.strike(tower, target, splash) {
                self.scratch.push(Command::ResolveAttack {
                    tower: tower.id,
                    hits,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn prepare_ledger(&mut self, enemies: &EnemyView) {
        self.ledger.clear();
        for enemy in enemies.iter().filter(|enemy| enemy.is_live()) {
            let _ = self.ledger.insert(
                enemy.id,
                LedgerEntry {
                    health: enemy.health,
                    position: enemy.motion.position,
                },
            );
        }
    }

    fn strike(
        &mut self,
        tower: &TowerSnapshot,
        target: &TowerTarget,
        splash: &SplashConfig,
    ) -> Option<Vec<Hit>> {
        let primary = target
            .candidates
            .iter()
            .copied()
            .find(|enemy| self.is_alive(*enemy))?;

        let mut hits = vec![Hit {
            enemy: primary,
            damage: tower.damage,
        }];
        let impact = self.damage(primary, tower.damage)?;

        if tower.area_effect && splash.enabled {
            let splash_damage = round_amount(f64::from(tower.damage) * splash.damage_ratio);
            if splash_damage > 0 {
                for (id, entry) in self.ledger.iter_mut() {
                    if *id == primary || entry.health == 0 {
                        continue;
                    }
                    if entry.position.distance(impact) > splash.radius {
                        continue;
                    }
                    entry.health = entry.health.saturating_sub(splash_damage);
                    hits.push(Hit {
                        enemy: *id,
                        damage: splash_damage,
                    });
                }
            }
        }

        Some(hits)
    }

    fn is_alive(&self, enemy: EnemyId) -> bool {
        self.ledger.get(&enemy).is_some_and(|entry| entry.health > 0)
    }

    /// Deducts `damage` from the ledger and returns the position of the enemy hit.
    fn damage(&mut self, enemy: EnemyId, damage: u32) -> Option<WorldPoint> {
        let entry = self.ledger.get_mut(&enemy)?;
        entry.health = entry.health.saturating_sub(damage);
        Some(entry.position)
    }
}

#[derive(Clone, Copy, Debug)]
struct LedgerEntry {
    health: u32,
    position: WorldPoint,
}

fn find_tower<'a>(
    towers: &[&'a TowerSnapshot],
    target: &TowerTarget,
) -> Option<&'a TowerSnapshot> {
    towers
        .binary_search_by_key(&target.tower, |snapshot| snapshot.id)
        .ok()
        .map(|index| towers[index])
}
