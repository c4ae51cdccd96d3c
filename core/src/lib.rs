#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Zombie Defence engine.
//!
//! This crate defines the message surface that connects the driver, the
//! authoritative world, and pure systems. Drivers submit [`PlayerCommand`]
//! values describing player intent, the simulation wraps them into world
//! [`Command`] values together with the commands produced by its systems,
//! and the world executes those commands via its `apply` entry point before
//! broadcasting [`Event`] values. Systems only ever read immutable views and
//! respond with new command batches.

pub mod config;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use config::{ConfigError, GameConfig};

/// Time between two occurrences of something happening `rate` times per second.
///
/// Returns `None` for non-positive or non-finite rates and for rates so small
/// that the interval does not fit a [`Duration`].
#[must_use]
pub fn interval_for_rate(rate: f64) -> Option<Duration> {
    if !(rate.is_finite() && rate > 0.0) {
        return None;
    }
    Duration::try_from_secs_f64(rate.recip()).ok()
}

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Zombie Defence.";

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// The board is being prepared and no enemies have been released yet.
    NotStarted,
    /// Ticks advance the simulation.
    Running,
    /// Ticks are ignored until the game resumes.
    Paused,
    /// Every wave has been cleared.
    Victory,
    /// The player ran out of lives.
    Defeat,
}

impl GameStatus {
    /// Reports whether the status ends the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Player intents accepted by the command processor.
///
/// Every command either applies completely or is rejected without touching
/// the world. Rejections surface as [`CommandOutcome::Rejected`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Starts the session.
    StartGame,
    /// Suspends tick-driven mutation.
    PauseGame,
    /// Resumes a paused session.
    ResumeGame,
    /// Releases the pending wave; behaves like [`PlayerCommand::ResumeGame`].
    StartWave,
    /// Sets or clears the tower type pending placement.
    SelectTowerType(Option<TowerKind>),
    /// Sets or clears the tower under inspection.
    SelectTower(Option<TowerId>),
    /// Builds the pending tower type on the provided cell.
    PlaceTower {
        /// Cell that should host the tower.
        position: GridPosition,
    },
    /// Upgrades an existing tower by one level.
    UpgradeTower {
        /// Tower to upgrade.
        tower: TowerId,
    },
    /// Sells an existing tower for its sell value.
    SellTower {
        /// Tower to sell.
        tower: TowerId,
    },
    /// Buys one additional life.
    BuyLife,
    /// Appends synthetic waves after a victory and resumes play.
    ContinueAfterVictory,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Applies a player intent.
    Player(PlayerCommand),
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Credits the wave clearance reward and moves on to the next wave.
    ClearWave {
        /// Gold granted for clearing the wave.
        reward: u32,
    },
    /// Records that the active wave has emitted its whole roster.
    MarkWaveEmitted,
    /// Spawns the next enemy of the active wave's roster at the first point of the path.
    SpawnEnemy,
    /// Commits the path state computed for an enemy.
    MoveEnemy {
        /// Enemy being moved.
        enemy: EnemyId,
        /// Path state the enemy occupies after moving.
        motion: PathMotion,
    },
    /// Deducts lives for every enemy that reached the goal and removes them.
    ResolveArrivals,
    /// Commits a tower attack.
    ResolveAttack {
        /// Tower that fired.
        tower: TowerId,
        /// Damage applied to each enemy hit by the attack.
        hits: Vec<Hit>,
    },
    /// Credits gold produced by a resource tower.
    ProduceGold {
        /// Tower that produced the gold.
        tower: TowerId,
        /// Gold produced after all multipliers.
        amount: u32,
    },
    /// Removes dead enemies and credits their bounty.
    ResolveKills,
    /// Prunes presentation hints whose display time elapsed.
    ExpireHints,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a transition between two game states.
    StatusChanged {
        /// Status before the transition.
        from: GameStatus,
        /// Status after the transition.
        to: GameStatus,
    },
    /// Announces the tower type pending placement.
    TowerTypeSelected {
        /// Pending type, if any.
        kind: Option<TowerKind>,
    },
    /// Announces the tower under inspection.
    TowerSelected {
        /// Inspected tower, if any.
        tower: Option<TowerId>,
    },
    /// Confirms that a tower was built.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Kind of tower that was built.
        kind: TowerKind,
        /// Cell hosting the tower.
        position: GridPosition,
        /// Gold debited for the construction.
        cost: u32,
    },
    /// Confirms that a tower gained a level.
    TowerUpgraded {
        /// Upgraded tower.
        tower: TowerId,
        /// Level reached by the tower.
        level: u32,
        /// Gold debited for the upgrade.
        cost: u32,
    },
    /// Confirms that a tower was sold.
    TowerSold {
        /// Sold tower.
        tower: TowerId,
        /// Cell freed by the sale.
        position: GridPosition,
        /// Gold credited for the sale.
        refund: u32,
    },
    /// Confirms that a life was purchased.
    LifePurchased {
        /// Gold debited for the life.
        cost: u32,
        /// Lives after the purchase.
        lives: u32,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of enemy spawned.
        kind: EnemyKind,
    },
    /// Reports that the active wave emitted its whole roster.
    WaveEmitted {
        /// Number of the wave.
        wave: u32,
    },
    /// Reports that an enemy walked off the end of the path.
    EnemyReachedGoal {
        /// Enemy that arrived.
        enemy: EnemyId,
        /// Lives deducted for the arrival.
        damage: u32,
    },
    /// Reports a tower attack.
    TowerAttacked {
        /// Tower that fired.
        tower: TowerId,
        /// Primary target of the attack.
        target: EnemyId,
        /// Number of enemies damaged, splash included.
        hits: usize,
    },
    /// Reports gold produced by a resource tower.
    GoldProduced {
        /// Producing tower.
        tower: TowerId,
        /// Gold credited.
        amount: u32,
    },
    /// Reports that an enemy was destroyed.
    EnemyKilled {
        /// Destroyed enemy.
        enemy: EnemyId,
        /// Bounty of the enemy before the gold multiplier.
        bounty: u32,
    },
    /// Reports the gold credited for the kills of a tick.
    BountyCollected {
        /// Gold credited after the gold multiplier.
        gold: u32,
    },
    /// Reports that a wave was cleared.
    WaveCleared {
        /// Number of the cleared wave.
        wave: u32,
        /// Gold credited for the clearance.
        reward: u32,
    },
    /// Reports that a new wave became active.
    WaveStarted {
        /// Number of the new wave.
        wave: u32,
    },
    /// Reports that synthetic waves were appended after a victory.
    WavesExtended {
        /// Total number of waves after the extension.
        total: u32,
    },
    /// Reports that a command had no effect.
    CommandRejected {
        /// Specific reason the command was rejected.
        reason: Rejection,
    },
}

/// Reasons a player command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum Rejection {
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// Towers cannot be built on the enemy path.
    #[error("cell belongs to the enemy path")]
    PathCell,
    /// The requested cell already hosts a tower.
    #[error("cell already hosts a tower")]
    Occupied,
    /// Placement requested without a pending tower type.
    #[error("no tower type selected")]
    NoTowerTypeSelected,
    /// The player cannot afford the command.
    #[error("requires {required} gold but only {available} is available")]
    InsufficientGold {
        /// Gold required by the command.
        required: u32,
        /// Gold held by the player.
        available: u32,
    },
    /// No tower with the provided identifier exists.
    #[error("tower does not exist")]
    MissingTower,
    /// The command is not meaningful in the current game status.
    #[error("command not permitted while {status:?}")]
    InvalidStatus {
        /// Status at the time of the command.
        status: GameStatus,
    },
}

/// Result of submitting a player command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command changed the world.
    Applied,
    /// The command had no effect.
    Rejected(Rejection),
}

impl CommandOutcome {
    /// Reports whether the command changed the world.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    x: u32,
    y: u32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: GridPosition) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Converts the cell into a continuous point located at the cell center.
    #[must_use]
    pub fn to_point(self) -> WorldPoint {
        WorldPoint::new(f64::from(self.x), f64::from(self.y))
    }

    /// Euclidean distance between two cells measured in cell units.
    #[must_use]
    pub fn distance(self, other: GridPosition) -> f64 {
        self.to_point().distance(other.to_point())
    }
}

/// Continuous position on the battlefield measured in cell units.
///
/// Integral coordinates coincide with cell centers, so a point equal to
/// `GridPosition::to_point` sits exactly on that cell.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl WorldPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation between `self` and `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: WorldPoint, t: f64) -> WorldPoint {
        let t = t.clamp(0.0, 1.0);
        WorldPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Types of towers that can be constructed on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Melee blocker with short range and medium damage.
    Knight,
    /// Ranged attacker with fast, light attacks.
    Archer,
    /// Slow splash attacker.
    Cannon,
    /// Resource generator that produces gold over time.
    GoldMiner,
    /// Aura buffer that boosts nearby producers and has a weak attack.
    Blacksmith,
}

impl TowerKind {
    /// Every tower kind in presentation order.
    pub const ALL: [TowerKind; 5] = [
        Self::Knight,
        Self::Archer,
        Self::Cannon,
        Self::GoldMiner,
        Self::Blacksmith,
    ];

    /// Stable lowercase name used by configuration files and drivers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Knight => "knight",
            Self::Archer => "archer",
            Self::Cannon => "cannon",
            Self::GoldMiner => "gold_miner",
            Self::Blacksmith => "blacksmith",
        }
    }

    /// Parses the name produced by [`TowerKind::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Types of enemies released by waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Slow, average enemy present in every wave.
    BasicZombie,
    /// Fragile enemy that moves quickly.
    FastZombie,
    /// Slow enemy with a large health pool.
    ArmoredZombie,
    /// Mid-speed enemy introduced in late waves.
    SpitterZombie,
}

/// Path state of an enemy produced by the movement system.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathMotion {
    /// Index of the path segment currently occupied.
    pub path_index: usize,
    /// Progress within the segment in `[0, 1]`.
    pub progress: f64,
    /// Interpolated position on the battlefield.
    pub position: WorldPoint,
    /// Indicates whether the enemy walked off the end of the path.
    pub reached_end: bool,
}

/// Damage dealt to a single enemy by an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    /// Enemy receiving the damage.
    pub enemy: EnemyId,
    /// Amount of health removed.
    pub damage: u32,
}

/// Enemies a ready tower may attack this tick, best candidate first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TowerTarget {
    /// Tower that is ready to attack.
    pub tower: TowerId,
    /// In-range live enemies ordered by attack priority.
    pub candidates: Vec<EnemyId>,
}

impl TowerTarget {
    /// Preferred target, ignoring enemies killed earlier in the same tick.
    #[must_use]
    pub fn primary(&self) -> Option<EnemyId> {
        self.candidates.first().copied()
    }
}

/// Immutable representation of a tower used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell hosting the tower.
    pub position: GridPosition,
    /// Current level, starting at one.
    pub level: u32,
    /// Damage dealt per attack.
    pub damage: u32,
    /// Attack range measured in cells.
    pub range: f64,
    /// Attacks per second.
    pub attack_speed: f64,
    /// Simulation time of the last attack.
    pub last_attack: Duration,
    /// Gold paid to build the tower.
    pub cost: u32,
    /// Gold refunded when the tower is sold.
    pub sell_value: u32,
    /// Gold required for the next upgrade.
    pub upgrade_cost: u32,
    /// Indicates whether attacks splash onto nearby enemies.
    pub area_effect: bool,
    /// Radius of the aura projected onto producers; zero disables the aura.
    pub buff_radius: f64,
    /// Gold produced per production interval; zero for non-producers.
    pub gold_production_rate: u32,
    /// Simulation time of the last production.
    pub last_production: Duration,
}

impl TowerSnapshot {
    /// Minimum simulated time between two attacks, or `None` for towers that never attack.
    #[must_use]
    pub fn attack_interval(&self) -> Option<Duration> {
        if self.damage == 0 {
            return None;
        }
        interval_for_rate(self.attack_speed)
    }

    /// Reports whether the tower can attack at `now`.
    #[must_use]
    pub fn ready_to_attack(&self, now: Duration) -> bool {
        self.attack_interval()
            .is_some_and(|interval| now.saturating_sub(self.last_attack) >= interval)
    }

    /// Reports whether the tower produces gold.
    #[must_use]
    pub const fn is_producer(&self) -> bool {
        self.gold_production_rate > 0
    }

    /// Reports whether the tower projects a production aura.
    #[must_use]
    pub fn is_aura(&self) -> bool {
        self.buff_radius > 0.0
    }
}

/// Read-only snapshot describing all towers on the battlefield.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Number of towers in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of enemy.
    pub kind: EnemyKind,
    /// Remaining health.
    pub health: u32,
    /// Health at spawn.
    pub max_health: u32,
    /// Movement speed in cells per second.
    pub speed: f64,
    /// Path state of the enemy.
    pub motion: PathMotion,
    /// Gold granted when the enemy is killed.
    pub gold_reward: u32,
    /// Lives deducted under the fixed goal damage policy.
    pub damage: u32,
}

impl EnemySnapshot {
    /// Reports whether the enemy can still be targeted.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.health > 0 && !self.motion.reached_end
    }
}

/// Read-only snapshot describing all enemies on the battlefield.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Progress of the active wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSnapshot {
    /// One-based wave number.
    pub number: u32,
    /// Number of waves in the table, synthetic waves included.
    pub total_waves: u32,
    /// Ordered roster drawn cyclically by the spawner.
    pub enemies: Vec<EnemyKind>,
    /// Enemies released per second.
    pub spawn_rate: f64,
    /// Enemies released so far.
    pub emitted: u32,
    /// Simulation time of the last spawn, or of the spawn clock origin.
    pub last_spawn: Duration,
    /// Indicates whether every enemy of the wave was released.
    pub completed: bool,
}

impl WaveSnapshot {
    /// Number of enemies the wave releases.
    #[must_use]
    pub fn count(&self) -> u32 {
        u32::try_from(self.enemies.len()).unwrap_or(u32::MAX)
    }

    /// Reports whether further waves follow the active one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_waves
    }
}

/// Player resources.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Gold balance.
    pub gold: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Scalar applied to every gold gain.
    pub gold_multiplier: f64,
}

/// Floating gold gain shown above a producer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoldIndicator {
    /// Identifier of the indicator.
    pub id: u32,
    /// Gold gained.
    pub amount: u32,
    /// Cell the gain originated from.
    pub position: GridPosition,
    /// Simulation time the indicator was created.
    pub created_at: Duration,
    /// Time the indicator stays visible.
    pub duration: Duration,
}

/// Presentation-only state kept beside the simulation.
///
/// Nothing in the simulation reads these values back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationHints {
    /// Gold gain indicators ordered by creation.
    pub gold_indicators: Vec<GoldIndicator>,
    /// Towers currently playing an attack or production animation, with the end time.
    pub animations: Vec<(TowerId, Duration)>,
}

/// Read-only view of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCellSnapshot {
    /// Cell location.
    pub position: GridPosition,
    /// Indicates whether the cell belongs to the enemy path.
    pub is_path: bool,
    /// Tower hosted by the cell.
    pub tower: Option<TowerId>,
}

impl GridCellSnapshot {
    /// Reports whether the cell hosts a tower.
    #[must_use]
    pub const fn has_tower(&self) -> bool {
        self.tower.is_some()
    }
}

/// Complete read-only snapshot handed to presentation collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Grid cells in row-major order.
    pub cells: Vec<GridCellSnapshot>,
    /// Ordered path walked by enemies.
    pub path: Vec<GridPosition>,
    /// Towers ordered by identifier.
    pub towers: Vec<TowerSnapshot>,
    /// Enemies ordered by identifier.
    pub enemies: Vec<EnemySnapshot>,
    /// Player resources.
    pub economy: EconomySnapshot,
    /// Active wave.
    pub wave: WaveSnapshot,
    /// Session status.
    pub status: GameStatus,
    /// Tower type pending placement.
    pub selected_tower_type: Option<TowerKind>,
    /// Tower under inspection.
    pub selected_tower: Option<TowerId>,
    /// Simulation clock.
    pub now: Duration,
    /// Presentation-only hints.
    pub hints: PresentationHints,
}
