#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Zombie Defence.
//!
//! The world owns the grid, the towers, the enemies, the economy and the wave
//! progress. It changes only through [`apply`], which validates player
//! commands, commits the output of the simulation systems, and reports every
//! change as an [`Event`].

mod grid;
mod hints;
mod towers;
mod waves;

use std::time::Duration;

use tracing::{debug, info, trace};
use zombie_defence_core::{
    config::round_amount, Command, ConfigError, EnemyId, EnemyKind, EnemySnapshot, Event,
    GameConfig, GameStatus, GridPosition, Hit, PathMotion, PlayerCommand, Rejection, TowerId,
    TowerKind, WELCOME_BANNER,
};

use crate::{grid::Grid, hints::Hints, towers::TowerRegistry, towers::TowerState, waves::WaveProgress};

/// Represents the authoritative Zombie Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    grid: Grid,
    towers: TowerRegistry,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    economy: Economy,
    waves: WaveProgress,
    status: GameStatus,
    selected_tower_type: Option<TowerKind>,
    selected_tower: Option<TowerId>,
    hints: Hints,
    now: Duration,
    tick_index: u64,
}

impl World {
    /// Creates a world from a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GameConfig) -> Self {
        let grid = Grid::new(config.grid_size, &config.path);
        let economy = Economy {
            gold: config.economy.starting_gold,
            lives: config.economy.starting_lives,
            gold_multiplier: 1.0,
        };
        let waves = WaveProgress::new(config.waves.clone());
        Self {
            banner: WELCOME_BANNER,
            grid,
            towers: TowerRegistry::new(),
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            economy,
            waves,
            status: GameStatus::NotStarted,
            selected_tower_type: None,
            selected_tower: None,
            hints: Hints::default(),
            now: Duration::ZERO,
            tick_index: 0,
            config,
        }
    }

    fn set_status(&mut self, status: GameStatus, out_events: &mut Vec<Event>) {
        let from = self.status;
        if from == status {
            return;
        }
        self.status = status;
        info!(?from, to = ?status, wave = self.waves.number(), "game status changed");
        out_events.push(Event::StatusChanged { from, to: status });
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|candidate| candidate.id == enemy)
    }

    fn reject(&self, reason: Rejection, out_events: &mut Vec<Event>) {
        debug!(%reason, status = ?self.status, "command rejected");
        out_events.push(Event::CommandRejected { reason });
    }

    fn ensure_not_over(&self, out_events: &mut Vec<Event>) -> bool {
        if self.status.is_terminal() {
            self.reject(
                Rejection::InvalidStatus {
                    status: self.status,
                },
                out_events,
            );
            return false;
        }
        true
    }

    fn ensure_affordable(&self, required: u32, out_events: &mut Vec<Event>) -> bool {
        if self.economy.gold < required {
            self.reject(
                Rejection::InsufficientGold {
                    required,
                    available: self.economy.gold,
                },
                out_events,
            );
            return false;
        }
        true
    }

    fn apply_player(&mut self, command: PlayerCommand, out_events: &mut Vec<Event>) {
        match command {
            PlayerCommand::StartGame | PlayerCommand::ResumeGame | PlayerCommand::StartWave => {
                if self.status.is_terminal() || self.status == GameStatus::Running {
                    self.reject(
                        Rejection::InvalidStatus {
                            status: self.status,
                        },
                        out_events,
                    );
                    return;
                }
                self.waves.restart_spawn_clock(self.now);
                self.set_status(GameStatus::Running, out_events);
            }
            PlayerCommand::PauseGame => {
                if self.status != GameStatus::Running {
                    self.reject(
                        Rejection::InvalidStatus {
                            status: self.status,
                        },
                        out_events,
                    );
                    return;
                }
                self.set_status(GameStatus::Paused, out_events);
            }
            PlayerCommand::SelectTowerType(kind) => {
                self.selected_tower_type = kind;
                self.selected_tower = None;
                out_events.push(Event::TowerTypeSelected { kind });
            }
            PlayerCommand::SelectTower(tower) => {
                if let Some(id) = tower {
                    if self.towers.get(id).is_none() {
                        self.reject(Rejection::MissingTower, out_events);
                        return;
                    }
                }
                self.selected_tower = tower;
                self.selected_tower_type = None;
                out_events.push(Event::TowerSelected { tower });
            }
            PlayerCommand::PlaceTower { position } => self.place_tower(position, out_events),
            PlayerCommand::UpgradeTower { tower } => self.upgrade_tower(tower, out_events),
            PlayerCommand::SellTower { tower } => self.sell_tower(tower, out_events),
            PlayerCommand::BuyLife => self.buy_life(out_events),
            PlayerCommand::ContinueAfterVictory => self.continue_after_victory(out_events),
        }
    }

    fn place_tower(&mut self, position: GridPosition, out_events: &mut Vec<Event>) {
        if !self.ensure_not_over(out_events) {
            return;
        }
        if !self.grid.contains(position) {
            self.reject(Rejection::OutOfBounds, out_events);
            return;
        }
        if self.grid.is_path(position) {
            self.reject(Rejection::PathCell, out_events);
            return;
        }
        if self.grid.tower_at(position).is_some() {
            self.reject(Rejection::Occupied, out_events);
            return;
        }
        let Some(kind) = self.selected_tower_type else {
            self.reject(Rejection::NoTowerTypeSelected, out_events);
            return;
        };
        let stats = self.config.towers.get(kind);
        if !self.ensure_affordable(stats.cost, out_events) {
            return;
        }

        let id = self.towers.allocate_id();
        let tower = TowerState::build(id, kind, position, stats, &self.config.economy, self.now);
        let cost = tower.cost;
        if !self.grid.occupy(position, id) {
            self.reject(Rejection::Occupied, out_events);
            return;
        }
        self.towers.insert(tower);
        self.economy.gold -= cost;
        self.selected_tower_type = None;

        debug!(tower = id.get(), ?kind, x = position.x(), y = position.y(), cost, "tower placed");
        out_events.push(Event::TowerPlaced {
            tower: id,
            kind,
            position,
            cost,
        });
    }

    fn upgrade_tower(&mut self, id: TowerId, out_events: &mut Vec<Event>) {
        if !self.ensure_not_over(out_events) {
            return;
        }
        let Some(required) = self.towers.get(id).map(|tower| tower.upgrade_cost) else {
            self.reject(Rejection::MissingTower, out_events);
            return;
        };
        if !self.ensure_affordable(required, out_events) {
            return;
        }
        let Some(tower) = self.towers.get_mut(id) else {
            return;
        };

        let cost = tower.upgrade(&self.config.upgrade, &self.config.economy);
        let level = tower.level;
        self.economy.gold -= cost;
        self.selected_tower = Some(id);
        self.selected_tower_type = None;

        debug!(tower = id.get(), level, cost, "tower upgraded");
        out_events.push(Event::TowerUpgraded {
            tower: id,
            level,
            cost,
        });
    }

    fn sell_tower(&mut self, id: TowerId, out_events: &mut Vec<Event>) {
        if !self.ensure_not_over(out_events) {
            return;
        }
        let Some(tower) = self.towers.remove(id) else {
            self.reject(Rejection::MissingTower, out_events);
            return;
        };

        self.grid.vacate(tower.position);
        self.hints.forget_tower(id);
        self.economy.gold = self.economy.gold.saturating_add(tower.sell_value);
        self.selected_tower = None;

        debug!(tower = id.get(), refund = tower.sell_value, "tower sold");
        out_events.push(Event::TowerSold {
            tower: id,
            position: tower.position,
            refund: tower.sell_value,
        });
    }

    fn buy_life(&mut self, out_events: &mut Vec<Event>) {
        if !self.ensure_not_over(out_events) {
            return;
        }
        let cost = query::life_price(self);
        if !self.ensure_affordable(cost, out_events) {
            return;
        }

        self.economy.gold -= cost;
        self.economy.lives = self.economy.lives.saturating_add(1);

        debug!(cost, lives = self.economy.lives, "life purchased");
        out_events.push(Event::LifePurchased {
            cost,
            lives: self.economy.lives,
        });
    }

    fn continue_after_victory(&mut self, out_events: &mut Vec<Event>) {
        if self.status != GameStatus::Victory {
            self.reject(
                Rejection::InvalidStatus {
                    status: self.status,
                },
                out_events,
            );
            return;
        }

        self.waves.extend(self.config.continuation.extra_waves);
        if !self.waves.has_next() {
            self.reject(
                Rejection::InvalidStatus {
                    status: self.status,
                },
                out_events,
            );
            return;
        }

        let total = self.waves.total();
        info!(total, "waves extended after victory");
        out_events.push(Event::WavesExtended { total });
        self.start_next_wave(out_events);
        self.set_status(GameStatus::Running, out_events);
    }

    fn start_next_wave(&mut self, out_events: &mut Vec<Event>) {
        if !self.waves.advance(self.now) {
            return;
        }
        self.economy.gold_multiplier *= self.config.wave_reward.gold_multiplier_decay;
        let wave = self.waves.number();
        info!(wave, gold_multiplier = self.economy.gold_multiplier, "wave started");
        out_events.push(Event::WaveStarted { wave });
    }

    fn clear_wave(&mut self, reward: u32, out_events: &mut Vec<Event>) {
        if !(self.waves.completed() && self.enemies.is_empty()) {
            return;
        }

        let wave = self.waves.number();
        self.economy.gold = self.economy.gold.saturating_add(reward);
        info!(wave, reward, "wave cleared");
        out_events.push(Event::WaveCleared { wave, reward });

        if self.waves.has_next() {
            self.start_next_wave(out_events);
        } else {
            self.set_status(GameStatus::Victory, out_events);
        }
    }

    fn spawn_enemy(&mut self, out_events: &mut Vec<Event>) {
        let Some(kind) = self.waves.emit(self.now) else {
            return;
        };

        let stats = self.config.enemies.get(kind);
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        let start = self.config.path[0].to_point();
        self.enemies.push(Enemy {
            id,
            kind,
            health: stats.health,
            max_health: stats.health,
            speed: stats.speed,
            motion: PathMotion {
                path_index: 0,
                progress: 0.0,
                position: start,
                reached_end: false,
            },
            gold_reward: stats.gold_reward,
            damage: stats.damage,
        });

        debug!(enemy = id.get(), ?kind, wave = self.waves.number(), "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy: id, kind });
    }

    fn resolve_arrivals(&mut self, out_events: &mut Vec<Event>) {
        let combat = &self.config.combat;
        let mut defeated = false;

        for enemy in self.enemies.iter().filter(|enemy| enemy.motion.reached_end) {
            let damage = combat.goal_damage(enemy.health, enemy.damage);
            self.economy.lives = self.economy.lives.saturating_sub(damage);
            out_events.push(Event::EnemyReachedGoal {
                enemy: enemy.id,
                damage,
            });
            if self.economy.lives == 0 {
                defeated = true;
                break;
            }
        }

        self.enemies.retain(|enemy| !enemy.motion.reached_end);

        if defeated {
            self.set_status(GameStatus::Defeat, out_events);
        }
    }

    fn resolve_attack(&mut self, tower: TowerId, hits: &[Hit], out_events: &mut Vec<Event>) {
        let Some(target) = hits.first().map(|hit| hit.enemy) else {
            return;
        };
        let now = self.now;
        let animation = self.config.presentation.attack_animation();
        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };
        state.last_attack = now;

        for hit in hits {
            if let Some(enemy) = self.enemy_mut(hit.enemy) {
                enemy.health = enemy.health.saturating_sub(hit.damage);
            }
        }
        self.hints.animate(tower, now + animation);

        trace!(tower = tower.get(), target = target.get(), hits = hits.len(), "tower attacked");
        out_events.push(Event::TowerAttacked {
            tower,
            target,
            hits: hits.len(),
        });
    }

    fn produce_gold(&mut self, tower: TowerId, amount: u32, out_events: &mut Vec<Event>) {
        let now = self.now;
        let presentation = &self.config.presentation;
        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };
        if state.gold_production_rate == 0 {
            return;
        }
        state.last_production = now;
        let position = state.position;

        self.economy.gold = self.economy.gold.saturating_add(amount);
        self.hints.push_gold(
            amount,
            position,
            now,
            presentation.gold_indicator(),
            presentation.max_gold_indicators,
        );
        self.hints.animate(tower, now + presentation.attack_animation());

        trace!(tower = tower.get(), amount, "gold produced");
        out_events.push(Event::GoldProduced { tower, amount });
    }

    fn resolve_kills(&mut self, out_events: &mut Vec<Event>) {
        let mut bounty: u32 = 0;
        let mut killed = 0_usize;
        for enemy in self.enemies.iter().filter(|enemy| enemy.health == 0) {
            bounty = bounty.saturating_add(enemy.gold_reward);
            killed += 1;
            out_events.push(Event::EnemyKilled {
                enemy: enemy.id,
                bounty: enemy.gold_reward,
            });
        }
        if killed == 0 {
            return;
        }

        self.enemies.retain(|enemy| enemy.health > 0);
        let gold = round_amount(f64::from(bounty) * self.economy.gold_multiplier);
        self.economy.gold = self.economy.gold.saturating_add(gold);

        debug!(gold, remaining = self.enemies.len(), "bounty collected");
        out_events.push(Event::BountyCollected { gold });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::from_valid_config(GameConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Player commands are validated first and rejected without side effects.
/// System commands are ignored unless the game is running.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if let Command::Player(player) = command {
        world.apply_player(player, out_events);
        return;
    }

    if world.status != GameStatus::Running {
        return;
    }

    match command {
        Command::Player(_) => {}
        Command::Tick { dt } => {
            world.now = world.now.saturating_add(dt);
            world.tick_index = world.tick_index.saturating_add(1);
            trace!(tick = world.tick_index, now = ?world.now, "tick");
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::ClearWave { reward } => world.clear_wave(reward, out_events),
        Command::MarkWaveEmitted => {
            if world.waves.mark_completed() {
                out_events.push(Event::WaveEmitted {
                    wave: world.waves.number(),
                });
            }
        }
        Command::SpawnEnemy => world.spawn_enemy(out_events),
        Command::MoveEnemy { enemy, motion } => {
            if let Some(enemy) = world.enemy_mut(enemy) {
                enemy.motion = motion;
            }
        }
        Command::ResolveArrivals => world.resolve_arrivals(out_events),
        Command::ResolveAttack { tower, hits } => world.resolve_attack(tower, &hits, out_events),
        Command::ProduceGold { tower, amount } => world.produce_gold(tower, amount, out_events),
        Command::ResolveKills => world.resolve_kills(out_events),
        Command::ExpireHints => world.hints.expire(world.now),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use zombie_defence_core::{
        EconomySnapshot, EnemyView, GameConfig, GameStatus, GridCellSnapshot, GridPosition,
        PresentationHints, TowerId, TowerKind, TowerSnapshot, TowerView, WaveSnapshot,
        WorldSnapshot,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Current session status.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.status
    }

    /// Current simulation time.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.now
    }

    /// Number of ticks processed while running.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Ordered path walked by enemies.
    #[must_use]
    pub fn path(world: &World) -> &[GridPosition] {
        &world.config.path
    }

    /// Player resources.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            gold: world.economy.gold,
            lives: world.economy.lives,
            gold_multiplier: world.economy.gold_multiplier,
        }
    }

    /// Progress of the active wave.
    #[must_use]
    pub fn wave(world: &World) -> WaveSnapshot {
        world.waves.snapshot()
    }

    /// Captures a read-only view of the towers on the battlefield.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Looks up a single tower.
    #[must_use]
    pub fn tower(world: &World, id: TowerId) -> Option<TowerSnapshot> {
        world.towers.get(id).map(|tower| tower.snapshot())
    }

    /// Number of towers on the battlefield.
    #[must_use]
    pub fn tower_count(world: &World) -> usize {
        world.towers.len()
    }

    /// Captures a read-only view of the enemies on the battlefield.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Number of enemies on the battlefield.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Describes the cell at `position`, if it lies on the grid.
    #[must_use]
    pub fn cell(world: &World, position: GridPosition) -> Option<GridCellSnapshot> {
        world.grid.contains(position).then(|| GridCellSnapshot {
            position,
            is_path: world.grid.is_path(position),
            tower: world.grid.tower_at(position),
        })
    }

    /// Tower type pending placement.
    #[must_use]
    pub fn selected_tower_type(world: &World) -> Option<TowerKind> {
        world.selected_tower_type
    }

    /// Tower under inspection.
    #[must_use]
    pub fn selected_tower(world: &World) -> Option<TowerId> {
        world.selected_tower
    }

    /// Presentation-only hints.
    #[must_use]
    pub fn hints(world: &World) -> PresentationHints {
        world.hints.snapshot()
    }

    /// Price of the next extra life.
    #[must_use]
    pub fn life_price(world: &World) -> u32 {
        world
            .config
            .extra_life
            .price(world.economy.lives, world.config.economy.starting_lives)
    }

    /// Complete snapshot for presentation collaborators.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        WorldSnapshot {
            grid_size: world.grid.size(),
            cells: world.grid.snapshot(),
            path: world.config.path.clone(),
            towers: tower_view(world).into_vec(),
            enemies: enemy_view(world).into_vec(),
            economy: economy(world),
            wave: wave(world),
            status: world.status,
            selected_tower_type: world.selected_tower_type,
            selected_tower: world.selected_tower,
            now: world.now,
            hints: hints(world),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Economy {
    gold: u32,
    lives: u32,
    gold_multiplier: f64,
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    health: u32,
    max_health: u32,
    speed: f64,
    motion: PathMotion,
    gold_reward: u32,
    damage: u32,
}

impl Enemy {
    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            motion: self.motion,
            gold_reward: self.gold_reward,
            damage: self.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zombie_defence_core::{config::WaveDefinition, WorldPoint};

    fn place(world: &mut World, kind: TowerKind, x: u32, y: u32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Player(PlayerCommand::SelectTowerType(Some(kind))),
            &mut events,
        );
        apply(
            world,
            Command::Player(PlayerCommand::PlaceTower {
                position: GridPosition::new(x, y),
            }),
            &mut events,
        );
        events
    }

    fn rejection(events: &[Event]) -> Option<Rejection> {
        events.iter().find_map(|event| match event {
            Event::CommandRejected { reason } => Some(*reason),
            _ => None,
        })
    }

    fn start(world: &mut World) {
        let mut events = Vec::new();
        apply(world, Command::Player(PlayerCommand::StartGame), &mut events);
    }

    #[test]
    fn new_world_matches_configuration() {
        let world = World::default();
        let economy = query::economy(&world);
        assert_eq!(economy.gold, 250);
        assert_eq!(economy.lives, 100);
        assert!((economy.gold_multiplier - 1.0).abs() < f64::EPSILON);
        assert_eq!(query::status(&world), GameStatus::NotStarted);
        assert_eq!(query::wave(&world).number, 1);
        assert!(query::cell(&world, GridPosition::new(0, 3)).is_some_and(|cell| cell.is_path));
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn invalid_configuration_is_refused() {
        let config = GameConfig {
            grid_size: 0,
            ..GameConfig::default()
        };
        assert!(matches!(World::new(config), Err(ConfigError::EmptyGrid)));
    }

    #[test]
    fn placement_debits_cost_and_clears_pending_type() {
        let mut world = World::default();
        let events = place(&mut world, TowerKind::Knight, 2, 2);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::TowerPlaced { cost: 100, .. })));
        assert_eq!(query::economy(&world).gold, 150);
        assert_eq!(query::selected_tower_type(&world), None);
        assert!(query::cell(&world, GridPosition::new(2, 2)).is_some_and(|cell| cell.has_tower()));
    }

    #[test]
    fn placement_on_path_is_rejected() {
        let mut world = World::default();
        let events = place(&mut world, TowerKind::Archer, 1, 3);
        assert_eq!(rejection(&events), Some(Rejection::PathCell));
        assert_eq!(query::tower_count(&world), 0);
        assert_eq!(query::economy(&world).gold, 250);
    }

    #[test]
    fn placement_on_occupied_cell_is_rejected() {
        let mut world = World::default();
        let _ = place(&mut world, TowerKind::Archer, 4, 4);
        let events = place(&mut world, TowerKind::Archer, 4, 4);
        assert_eq!(rejection(&events), Some(Rejection::Occupied));
        assert_eq!(query::tower_count(&world), 1);
        assert_eq!(query::economy(&world).gold, 175);
    }

    #[test]
    fn placement_without_pending_type_is_rejected() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Player(PlayerCommand::PlaceTower {
                position: GridPosition::new(0, 0),
            }),
            &mut events,
        );
        assert_eq!(rejection(&events), Some(Rejection::NoTowerTypeSelected));
    }

    #[test]
    fn unaffordable_placement_leaves_world_unchanged() {
        let mut world = World::default();
        let _ = place(&mut world, TowerKind::GoldMiner, 0, 0);
        let events = place(&mut world, TowerKind::Knight, 1, 0);
        assert_eq!(
            rejection(&events),
            Some(Rejection::InsufficientGold {
                required: 100,
                available: 50,
            })
        );
        assert_eq!(query::economy(&world).gold, 50);
        assert_eq!(query::tower_count(&world), 1);
        assert_eq!(query::selected_tower_type(&world), Some(TowerKind::Knight));
    }

    #[test]
    fn unaffordable_upgrade_is_a_no_op() {
        let mut world = World::default();
        let _ = place(&mut world, TowerKind::Cannon, 0, 0);
        let _ = place(&mut world, TowerKind::Archer, 1, 0);
        assert_eq!(query::economy(&world).gold, 25);

        let tower = TowerId::new(1);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Player(PlayerCommand::UpgradeTower { tower }),
            &mut events,
        );
        assert!(matches!(
            rejection(&events),
            Some(Rejection::InsufficientGold { required: 50, .. })
        ));
        let snapshot = query::tower(&world, tower).expect("tower exists");
        assert_eq!(snapshot.level, 1);
        assert_eq!(query::economy(&world).gold, 25);
    }

    #[test]
    fn upgrade_selects_tower_and_debits_cost() {
        let mut world = World::default();
        let _ = place(&mut world, TowerKind::Archer, 0, 0);
        let tower = TowerId::new(0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Player(PlayerCommand::UpgradeTower { tower }),
            &mut events,
        );

        let snapshot = query::tower(&world, tower).expect("tower exists");
        assert_eq!(snapshot.level, 2);
        assert_eq!(snapshot.damage, 9);
        assert!((snapshot.attack_speed - 1.8).abs() < 1e-9);
        assert_eq!(snapshot.upgrade_cost, 75);
        assert_eq!(snapshot.sell_value, 87);
        assert_eq!(query::economy(&world).gold, 125);
        assert_eq!(query::selected_tower(&world), Some(tower));
    }

    #[test]
    fn selling_frees_cell_and_refunds_sell_value() {
        let mut world = World::default();
        let _ = place(&mut world, TowerKind::Knight, 5, 5);
        let tower = TowerId::new(0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Player(PlayerCommand::SelectTower(Some(tower))),
            &mut events,
        );
        apply(
            &mut world,
            Command::Player(PlayerCommand::SellTower { tower }),
            &mut events,
        );

        assert_eq!(query::economy(&world).gold, 220);
        assert_eq!(query::tower_count(&world), 0);
        assert_eq!(query::selected_tower(&world), None);
        assert!(query::cell(&world, GridPosition::new(5, 5)).is_some_and(|cell| !cell.has_tower()));
    }

    #[test]
    fn selections_are_mutually_exclusive() {
        let mut world = World::default();
        let _ = place(&mut world, TowerKind::Knight, 5, 5);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Player(PlayerCommand::SelectTower(Some(TowerId::new(0)))),
            &mut events,
        );
        apply(
            &mut world,
            Command::Player(PlayerCommand::SelectTowerType(Some(TowerKind::Archer))),
            &mut events,
        );
        assert_eq!(query::selected_tower(&world), None);
        assert_eq!(query::selected_tower_type(&world), Some(TowerKind::Archer));

        apply(
            &mut world,
            Command::Player(PlayerCommand::SelectTower(Some(TowerId::new(0)))),
            &mut events,
        );
        assert_eq!(query::selected_tower_type(&world), None);
    }

    #[test]
    fn life_price_grows_with_lives() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(&mut world, Command::Player(PlayerCommand::BuyLife), &mut events);
        assert_eq!(query::economy(&world).lives, 101);
        assert_eq!(query::economy(&world).gold, 150);
        assert_eq!(query::life_price(&world), 125);

        apply(&mut world, Command::Player(PlayerCommand::BuyLife), &mut events);
        apply(&mut world, Command::Player(PlayerCommand::BuyLife), &mut events);
        assert_eq!(query::economy(&world).lives, 102);
        assert_eq!(query::economy(&world).gold, 25);
        assert!(matches!(
            rejection(&events),
            Some(Rejection::InsufficientGold { required: 156, .. })
        ));
    }

    #[test]
    fn system_commands_are_ignored_until_running() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_secs(1),
            },
            &mut events,
        );
        apply(&mut world, Command::SpawnEnemy, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::now(&world), Duration::ZERO);
        assert_eq!(query::enemy_count(&world), 0);
    }

    #[test]
    fn pause_requires_running_game() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(&mut world, Command::Player(PlayerCommand::PauseGame), &mut events);
        assert_eq!(
            rejection(&events),
            Some(Rejection::InvalidStatus {
                status: GameStatus::NotStarted,
            })
        );

        start(&mut world);
        events.clear();
        apply(&mut world, Command::Player(PlayerCommand::PauseGame), &mut events);
        assert_eq!(query::status(&world), GameStatus::Paused);
        assert_eq!(
            events,
            vec![Event::StatusChanged {
                from: GameStatus::Running,
                to: GameStatus::Paused,
            }]
        );
    }

    #[test]
    fn killed_enemy_pays_bounty_times_multiplier() {
        let mut world = World::default();
        start(&mut world);
        let mut events = Vec::new();
        apply(&mut world, Command::SpawnEnemy, &mut events);
        let _ = place(&mut world, TowerKind::Knight, 0, 4);
        let enemy = EnemyId::new(0);
        apply(
            &mut world,
            Command::ResolveAttack {
                tower: TowerId::new(0),
                hits: vec![Hit {
                    enemy,
                    damage: 500,
                }],
            },
            &mut events,
        );
        apply(&mut world, Command::ResolveKills, &mut events);

        assert_eq!(query::enemy_count(&world), 0);
        assert_eq!(query::economy(&world).gold, 150 + 10);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::BountyCollected { gold: 10 })));
    }

    #[test]
    fn bounty_is_rounded_after_scaling_the_sum() {
        let single = |number| WaveDefinition {
            number,
            enemies: vec![EnemyKind::BasicZombie; number as usize],
            spawn_rate: 1.0,
        };
        let config = GameConfig {
            waves: vec![single(1), single(2)],
            ..GameConfig::default()
        };
        let mut world = World::new(config).expect("valid configuration");
        let _ = place(&mut world, TowerKind::Knight, 0, 4);
        start(&mut world);

        let kill = |world: &mut World, enemies: &[u32], events: &mut Vec<Event>| {
            let hits = enemies
                .iter()
                .map(|&id| Hit {
                    enemy: EnemyId::new(id),
                    damage: 500,
                })
                .collect();
            apply(
                world,
                Command::ResolveAttack {
                    tower: TowerId::new(0),
                    hits,
                },
                events,
            );
            apply(world, Command::ResolveKills, events);
        };

        let mut events = Vec::new();
        apply(&mut world, Command::SpawnEnemy, &mut events);
        kill(&mut world, &[0], &mut events);
        apply(&mut world, Command::MarkWaveEmitted, &mut events);
        apply(&mut world, Command::ClearWave { reward: 0 }, &mut events);
        assert_eq!(query::wave(&world).number, 2);
        assert!((query::economy(&world).gold_multiplier - 0.75).abs() < 1e-9);
        let gold_before = query::economy(&world).gold;

        events.clear();
        apply(&mut world, Command::SpawnEnemy, &mut events);
        apply(&mut world, Command::SpawnEnemy, &mut events);
        kill(&mut world, &[1, 2], &mut events);

        assert!(events.contains(&Event::BountyCollected { gold: 15 }));
        assert_eq!(query::economy(&world).gold, gold_before + 15);
    }

    #[test]
    fn spawned_kinds_follow_the_roster() {
        let config = GameConfig {
            waves: vec![WaveDefinition {
                number: 1,
                enemies: vec![EnemyKind::FastZombie, EnemyKind::ArmoredZombie],
                spawn_rate: 1.0,
            }],
            ..GameConfig::default()
        };
        let mut world = World::new(config).expect("valid configuration");
        start(&mut world);

        let mut events = Vec::new();
        for _ in 0..3 {
            apply(&mut world, Command::SpawnEnemy, &mut events);
        }

        let kinds: Vec<EnemyKind> = events
            .iter()
            .filter_map(|event| match event {
                Event::EnemySpawned { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec![EnemyKind::FastZombie, EnemyKind::ArmoredZombie]);
        assert_eq!(query::enemy_count(&world), 2, "exhausted roster spawned again");
        assert_eq!(query::enemy_view(&world).into_vec()[1].health, 350);
    }

    #[test]
    fn arrival_that_exhausts_lives_is_a_defeat() {
        let config = GameConfig {
            economy: zombie_defence_core::config::EconomyConfig {
                starting_lives: 3,
                ..Default::default()
            },
            ..GameConfig::default()
        };
        let mut world = World::new(config).expect("valid configuration");
        start(&mut world);

        let mut events = Vec::new();
        for _ in 0..2 {
            apply(&mut world, Command::SpawnEnemy, &mut events);
        }
        let arrived = PathMotion {
            path_index: 15,
            progress: 1.0,
            position: WorldPoint::new(9.0, 2.0),
            reached_end: true,
        };
        for id in 0..2 {
            apply(
                &mut world,
                Command::MoveEnemy {
                    enemy: EnemyId::new(id),
                    motion: arrived,
                },
                &mut events,
            );
        }
        events.clear();
        apply(&mut world, Command::ResolveArrivals, &mut events);

        assert_eq!(query::economy(&world).lives, 0);
        assert_eq!(query::status(&world), GameStatus::Defeat);
        assert_eq!(query::enemy_count(&world), 0);
        let arrivals = events
            .iter()
            .filter(|event| matches!(event, Event::EnemyReachedGoal { .. }))
            .count();
        assert_eq!(arrivals, 1, "processing stops at the defeating arrival");
    }

    #[test]
    fn terminal_status_rejects_building() {
        let config = GameConfig {
            economy: zombie_defence_core::config::EconomyConfig {
                starting_lives: 1,
                ..Default::default()
            },
            ..GameConfig::default()
        };
        let mut world = World::new(config).expect("valid configuration");
        start(&mut world);
        let mut events = Vec::new();
        apply(&mut world, Command::SpawnEnemy, &mut events);
        apply(
            &mut world,
            Command::MoveEnemy {
                enemy: EnemyId::new(0),
                motion: PathMotion {
                    path_index: 15,
                    progress: 1.0,
                    position: WorldPoint::new(9.0, 2.0),
                    reached_end: true,
                },
            },
            &mut events,
        );
        apply(&mut world, Command::ResolveArrivals, &mut events);
        assert_eq!(query::status(&world), GameStatus::Defeat);

        let events = place(&mut world, TowerKind::Archer, 0, 0);
        assert_eq!(
            rejection(&events),
            Some(Rejection::InvalidStatus {
                status: GameStatus::Defeat,
            })
        );
    }
}
