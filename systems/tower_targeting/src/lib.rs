#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use std::{cmp::Ordering, time::Duration};

use zombie_defence_core::{EnemyId, EnemyView, GameStatus, TowerTarget, TowerView, WorldPoint};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the candidates of every tower ready to attack at `now`.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments. Towers with no live enemy in range are omitted.
    pub fn handle(
        &mut self,
        status: GameStatus,
        now: Duration,
        towers: &TowerView,
        enemies: &EnemyView,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        if status != GameStatus::Running {
            return;
        }

        if towers.is_empty() || enemies.is_empty() {
            return;
        }

        self.prepare_enemy_workspace(enemies);
        if self.enemy_workspace.is_empty() {
            return;
        }

        for tower in towers.iter().filter(|tower| tower.ready_to_attack(now)) {
            let origin = tower.position.to_point();
            let candidates: Vec<EnemyId> = self
                .enemy_workspace
                .iter()
                .filter(|candidate| origin.distance(candidate.position) <= tower.range)
                .map(|candidate| candidate.id)
                .collect();

            if !candidates.is_empty() {
                out.push(TowerTarget {
                    tower: tower.id,
                    candidates,
                });
            }
        }
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace.reserve(enemies.len());

        for snapshot in enemies.iter().filter(|enemy| enemy.is_live()) {
            self.enemy_workspace.push(EnemyCandidate {
                id: snapshot.id,
                path_index: snapshot.motion.path_index,
                progress: snapshot.motion.progress,
                position: snapshot.motion.position,
            });
        }

        self.enemy_workspace.sort_by(EnemyCandidate::priority);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    path_index: usize,
    progress: f64,
    position: WorldPoint,
}

impl EnemyCandidate {
    /// Orders the enemy closest to the goal first; ties prefer the older enemy.
    fn priority(a: &Self, b: &Self) -> Ordering {
        b.path_index
            .cmp(&a.path_index)
            .then_with(|| b.progress.total_cmp(&a.progress))
            .then_with(|| a.id.cmp(&b.id))
    }
}
