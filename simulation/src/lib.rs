#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven Zombie Defence engine.
//!
//! [`Simulation`] owns the authoritative world together with every pure
//! system. Player commands and ticks are strictly serialized: each call runs
//! to completion before the next one is accepted, so the same sequence of
//! calls always produces the same world.
//!
//! Command entry points report only a [`CommandOutcome`]. The state they
//! leave behind is read with [`Simulation::snapshot`], which callers invoke
//! once after a batch of commands instead of paying for a snapshot per call.

use std::time::Duration;

use tracing::trace;
use zombie_defence_core::{
    Command, CommandOutcome, ConfigError, Event, GameConfig, GameStatus, GridPosition,
    PlayerCommand, TowerId, TowerKind, TowerTarget, WorldSnapshot,
};
use zombie_defence_system_movement::Movement;
use zombie_defence_system_production::Production;
use zombie_defence_system_spawning::Spawning;
use zombie_defence_system_tower_combat::TowerCombat;
use zombie_defence_system_tower_targeting::TowerTargeting;
use zombie_defence_system_wave_lifecycle::WaveLifecycle;
use zombie_defence_world::{self as world, query, World};

/// Headless simulation engine.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    tick_interval: Duration,
    lifecycle: WaveLifecycle,
    spawning: Spawning,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    production: Production,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
    last_events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation from a validated configuration.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let tick_interval = config.tick_interval()?;
        let world = World::new(config)?;
        Ok(Self {
            world,
            tick_interval,
            lifecycle: WaveLifecycle::new(),
            spawning: Spawning::new(),
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            production: Production::new(),
            commands: Vec::new(),
            targets: Vec::new(),
            last_events: Vec::new(),
        })
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Greeting shown when a session is opened.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    /// Complete read-only snapshot of the world.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        query::snapshot(&self.world)
    }

    /// Current session status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// Simulated time covered by [`Simulation::advance`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Events produced by the most recent command or tick.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.last_events
    }

    /// Applies a player command between ticks.
    pub fn execute(&mut self, command: PlayerCommand) -> CommandOutcome {
        self.last_events.clear();
        world::apply(
            &mut self.world,
            Command::Player(command),
            &mut self.last_events,
        );

        self.last_events
            .iter()
            .find_map(|event| match event {
                Event::CommandRejected { reason } => Some(CommandOutcome::Rejected(*reason)),
                _ => None,
            })
            .unwrap_or(CommandOutcome::Applied)
    }

    /// Starts the session.
    pub fn start_game(&mut self) -> CommandOutcome {
        self.execute(PlayerCommand::StartGame)
    }

    /// Suspends tick-driven mutation.
    pub fn pause_game(&mut self) -> CommandOutcome {
        self.execute(PlayerCommand::PauseGame)
    }

    /// Resumes a paused session.
    pub fn resume_game(&mut self) -> CommandOutcome {
        self.execute(PlayerCommand::ResumeGame)
    }

    /// Releases the pending wave.
    pub fn start_wave(&mut self) -> CommandOutcome {
        self.execute(PlayerCommand::StartWave)
    }

    /// Sets or clears the tower type pending placement.
    pub fn select_tower_type(&mut self, kind: Option<TowerKind>) -> CommandOutcome {
        self.execute(PlayerCommand::SelectTowerType(kind))
    }

    /// Sets or clears the tower under inspection.
    pub fn select_tower(&mut self, tower: Option<TowerId>) -> CommandOutcome {
        self.execute(PlayerCommand::SelectTower(tower))
    }

    /// Builds the pending tower type on cell `(x, y)`.
    pub fn place_tower(&mut self, x: u32, y: u32) -> CommandOutcome {
        self.execute(PlayerCommand::PlaceTower {
            position: GridPosition::new(x, y),
        })
    }

    /// Upgrades a tower by one level.
    pub fn upgrade_tower(&mut self, tower: TowerId) -> CommandOutcome {
        self.execute(PlayerCommand::UpgradeTower { tower })
    }

    /// Sells a tower.
    pub fn sell_tower(&mut self, tower: TowerId) -> CommandOutcome {
        self.execute(PlayerCommand::SellTower { tower })
    }

    /// Buys one additional life.
    pub fn buy_life(&mut self) -> CommandOutcome {
        self.execute(PlayerCommand::BuyLife)
    }

    /// Appends synthetic waves after a victory and resumes play.
    pub fn continue_after_victory(&mut self) -> CommandOutcome {
        self.execute(PlayerCommand::ContinueAfterVictory)
    }

    /// Advances the simulation by one tick of the configured cadence.
    pub fn advance(&mut self) {
        self.advance_by(self.tick_interval);
    }

    /// Advances the simulation by `dt` of simulated time.
    ///
    /// Does nothing unless the session is running. Defeat and victory end
    /// the tick immediately.
    pub fn advance_by(&mut self, dt: Duration) {
        self.last_events.clear();
        if self.status() != GameStatus::Running {
            return;
        }

        world::apply(&mut self.world, Command::Tick { dt }, &mut self.last_events);

        self.lifecycle.handle(
            query::status(&self.world),
            &query::wave(&self.world),
            query::enemy_count(&self.world),
            query::tower_count(&self.world),
            &query::economy(&self.world),
            &query::config(&self.world).wave_reward,
            &mut self.commands,
        );
        self.commit();
        if self.status() != GameStatus::Running {
            return;
        }

        self.spawning.handle(
            query::status(&self.world),
            &query::wave(&self.world),
            query::now(&self.world),
            &mut self.commands,
        );
        self.commit();

        self.movement.handle(
            &self.last_events,
            &query::enemy_view(&self.world),
            query::path(&self.world),
            &mut self.commands,
        );
        self.commit();

        world::apply(
            &mut self.world,
            Command::ResolveArrivals,
            &mut self.last_events,
        );
        if self.status() != GameStatus::Running {
            return;
        }

        let towers = query::tower_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(
            query::status(&self.world),
            query::now(&self.world),
            &towers,
            &enemies,
            &mut self.targets,
        );
        self.combat.handle(
            query::status(&self.world),
            &towers,
            &enemies,
            &self.targets,
            &query::config(&self.world).combat.splash,
            &mut self.commands,
        );
        self.commit();

        self.production.handle(
            query::status(&self.world),
            query::now(&self.world),
            &query::tower_view(&self.world),
            &query::economy(&self.world),
            &query::config(&self.world).production,
            &mut self.commands,
        );
        self.commands.push(Command::ResolveKills);
        self.commands.push(Command::ExpireHints);
        self.commit();

        trace!(
            tick = query::tick_index(&self.world),
            now = ?query::now(&self.world),
            events = self.last_events.len(),
            "tick resolved"
        );
    }

    fn commit(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.last_events);
        }
    }
}
