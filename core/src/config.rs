//! Tunable game configuration.
//!
//! [`GameConfig::default`] reproduces the reference balance. Every section
//! may be overridden from TOML; omitted sections and fields keep their
//! defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{interval_for_rate, EnemyKind, GridPosition, TowerKind};

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The grid has no cells.
    #[error("grid size must be positive")]
    EmptyGrid,
    /// The path has fewer than two points.
    #[error("path must contain at least two points, found {0}")]
    PathTooShort(usize),
    /// A path point lies outside the grid.
    #[error("path point ({x}, {y}) lies outside the {size}x{size} grid")]
    PathOutOfBounds {
        /// Column of the offending point.
        x: u32,
        /// Row of the offending point.
        y: u32,
        /// Side length of the grid.
        size: u32,
    },
    /// Two consecutive path points are not orthogonal neighbours.
    #[error("path point {index} is not adjacent to its successor")]
    DisjointPath {
        /// Index of the first point of the offending pair.
        index: usize,
    },
    /// The wave table is empty.
    #[error("wave table must contain at least one wave")]
    NoWaves,
    /// A wave has an empty roster.
    #[error("wave {0} has no enemies")]
    EmptyWave(u32),
    /// A wave releases enemies at a rate with no representable interval.
    #[error("wave {0} must have a positive spawn rate with a representable interval")]
    InvalidSpawnRate(u32),
    /// The tick rate is non-positive or yields no usable tick interval.
    #[error("tick rate must be positive and yield a tick interval of at least one nanosecond")]
    InvalidTickRate,
    /// A numeric tunable is negative or not finite.
    #[error("{0} must be a finite, non-negative number")]
    InvalidValue(&'static str),
}

/// Complete configuration surface of a game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Pixel size of a cell; used by presentation only.
    pub cell_size: u32,
    /// Ticks per second issued by the driver.
    pub tick_rate_hz: f64,
    /// Ordered path walked by enemies.
    pub path: Vec<GridPosition>,
    /// Starting resources and sell policy.
    pub economy: EconomyConfig,
    /// Base statistics of every tower kind.
    pub towers: TowerTable,
    /// Base statistics of every enemy kind.
    pub enemies: EnemyTable,
    /// Per-stat multipliers applied on upgrade.
    pub upgrade: UpgradeMultipliers,
    /// Pricing curve of extra lives.
    pub extra_life: ExtraLifePricing,
    /// Wave clearance reward constants.
    pub wave_reward: WaveRewardConfig,
    /// Gold production cadence and aura strength.
    pub production: ProductionConfig,
    /// Splash and goal damage policies.
    pub combat: CombatConfig,
    /// Lifetimes of presentation hints.
    pub presentation: PresentationConfig,
    /// Synthetic waves appended after a victory.
    pub continuation: ContinuationConfig,
    /// Ordered wave table.
    pub waves: Vec<WaveDefinition>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            cell_size: 40,
            tick_rate_hz: 30.0,
            path: default_path(),
            economy: EconomyConfig::default(),
            towers: TowerTable::default(),
            enemies: EnemyTable::default(),
            upgrade: UpgradeMultipliers::default(),
            extra_life: ExtraLifePricing::default(),
            wave_reward: WaveRewardConfig::default(),
            production: ProductionConfig::default(),
            combat: CombatConfig::default(),
            presentation: PresentationConfig::default(),
            continuation: ContinuationConfig::default(),
            waves: (1..=DEFAULT_WAVE_COUNT).map(WaveDefinition::generate).collect(),
        }
    }
}

const DEFAULT_WAVE_COUNT: u32 = 10;

const DEFAULT_PATH: [(u32, u32); 17] = [
    (0, 3),
    (1, 3),
    (2, 3),
    (3, 3),
    (3, 4),
    (3, 5),
    (3, 6),
    (4, 6),
    (5, 6),
    (6, 6),
    (6, 5),
    (6, 4),
    (6, 3),
    (6, 2),
    (7, 2),
    (8, 2),
    (9, 2),
];

fn default_path() -> Vec<GridPosition> {
    DEFAULT_PATH
        .iter()
        .map(|&(x, y)| GridPosition::new(x, y))
        .collect()
}

impl GameConfig {
    /// Parses a TOML document and validates the result.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        if self.path.len() < 2 {
            return Err(ConfigError::PathTooShort(self.path.len()));
        }

        for point in &self.path {
            if point.x() >= self.grid_size || point.y() >= self.grid_size {
                return Err(ConfigError::PathOutOfBounds {
                    x: point.x(),
                    y: point.y(),
                    size: self.grid_size,
                });
            }
        }

        for (index, pair) in self.path.windows(2).enumerate() {
            if pair[0].manhattan_distance(pair[1]) != 1 {
                return Err(ConfigError::DisjointPath { index });
            }
        }

        let _ = self.tick_interval()?;

        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }

        for wave in &self.waves {
            if wave.enemies.is_empty() {
                return Err(ConfigError::EmptyWave(wave.number));
            }
            if interval_for_rate(wave.spawn_rate).is_none() {
                return Err(ConfigError::InvalidSpawnRate(wave.number));
            }
        }

        for kind in TowerKind::ALL {
            let stats = self.towers.get(kind);
            non_negative("tower range", stats.range)?;
            non_negative("tower attack speed", stats.attack_speed)?;
            if stats.attack_speed > 0.0 && interval_for_rate(stats.attack_speed).is_none() {
                return Err(ConfigError::InvalidValue("tower attack speed"));
            }
            non_negative("tower buff radius", stats.buff_radius)?;
        }

        for stats in self.enemies.iter() {
            non_negative("enemy speed", stats.speed)?;
        }

        non_negative("damage upgrade multiplier", self.upgrade.damage)?;
        non_negative("range upgrade multiplier", self.upgrade.range)?;
        non_negative("attack speed upgrade multiplier", self.upgrade.attack_speed)?;
        non_negative("upgrade cost multiplier", self.upgrade.upgrade_cost)?;
        non_negative(
            "production upgrade multiplier",
            self.upgrade.gold_production_rate,
        )?;
        non_negative("extra life multiplier", self.extra_life.multiplier)?;
        non_negative("gold multiplier decay", self.wave_reward.gold_multiplier_decay)?;
        non_negative("aura bonus", self.production.aura_bonus_per_level)?;
        non_negative("splash radius", self.combat.splash.radius)?;
        non_negative("splash damage ratio", self.combat.splash.damage_ratio)?;

        Ok(())
    }

    /// Simulated time covered by one tick.
    pub fn tick_interval(&self) -> Result<Duration, ConfigError> {
        interval_for_rate(self.tick_rate_hz)
            .filter(|interval| !interval.is_zero())
            .ok_or(ConfigError::InvalidTickRate)
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue(name))
    }
}

/// Starting resources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Gold at the start of a session.
    pub starting_gold: u32,
    /// Lives at the start of a session.
    pub starting_lives: u32,
    /// Numerator of the sell ratio.
    pub sell_ratio_numerator: u32,
    /// Denominator of the sell ratio.
    pub sell_ratio_denominator: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_gold: 250,
            starting_lives: 100,
            sell_ratio_numerator: 7,
            sell_ratio_denominator: 10,
        }
    }
}

impl EconomyConfig {
    /// Gold refunded for `invested` gold, rounded down.
    #[must_use]
    pub fn sell_value(&self, invested: u32) -> u32 {
        if self.sell_ratio_denominator == 0 {
            return 0;
        }
        let scaled = u64::from(invested) * u64::from(self.sell_ratio_numerator)
            / u64::from(self.sell_ratio_denominator);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

/// Base statistics of a tower kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerStats {
    /// Damage dealt per attack.
    pub damage: u32,
    /// Attack range measured in cells.
    pub range: f64,
    /// Attacks per second.
    pub attack_speed: f64,
    /// Construction cost.
    pub cost: u32,
    /// Cost of the first upgrade.
    pub upgrade_cost: u32,
    /// Indicates whether attacks splash onto nearby enemies.
    #[serde(default)]
    pub area_effect: bool,
    /// Radius of the production aura.
    #[serde(default)]
    pub buff_radius: f64,
    /// Gold produced per production interval.
    #[serde(default)]
    pub gold_production_rate: u32,
}

/// Base statistics of every tower kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerTable {
    /// Melee blocker.
    pub knight: TowerStats,
    /// Ranged attacker.
    pub archer: TowerStats,
    /// Splash attacker.
    pub cannon: TowerStats,
    /// Resource generator.
    pub gold_miner: TowerStats,
    /// Aura buffer.
    pub blacksmith: TowerStats,
}

impl TowerTable {
    /// Statistics of the provided kind.
    #[must_use]
    pub fn get(&self, kind: TowerKind) -> &TowerStats {
        match kind {
            TowerKind::Knight => &self.knight,
            TowerKind::Archer => &self.archer,
            TowerKind::Cannon => &self.cannon,
            TowerKind::GoldMiner => &self.gold_miner,
            TowerKind::Blacksmith => &self.blacksmith,
        }
    }
}

impl Default for TowerTable {
    fn default() -> Self {
        Self {
            knight: TowerStats {
                damage: 10,
                range: 1.0,
                attack_speed: 1.0,
                cost: 100,
                upgrade_cost: 75,
                area_effect: false,
                buff_radius: 0.0,
                gold_production_rate: 0,
            },
            archer: TowerStats {
                damage: 6,
                range: 3.0,
                attack_speed: 1.5,
                cost: 75,
                upgrade_cost: 50,
                area_effect: false,
                buff_radius: 0.0,
                gold_production_rate: 0,
            },
            cannon: TowerStats {
                damage: 18,
                range: 2.0,
                attack_speed: 0.5,
                cost: 150,
                upgrade_cost: 100,
                area_effect: true,
                buff_radius: 0.0,
                gold_production_rate: 0,
            },
            gold_miner: TowerStats {
                damage: 0,
                range: 0.0,
                attack_speed: 0.0,
                cost: 200,
                upgrade_cost: 150,
                area_effect: false,
                buff_radius: 0.0,
                gold_production_rate: 10,
            },
            blacksmith: TowerStats {
                damage: 5,
                range: 1.0,
                attack_speed: 0.7,
                cost: 125,
                upgrade_cost: 100,
                area_effect: false,
                buff_radius: 2.0,
                gold_production_rate: 0,
            },
        }
    }
}

/// Base statistics of an enemy kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Health at spawn.
    pub health: u32,
    /// Movement speed in cells per second.
    pub speed: f64,
    /// Gold granted on kill.
    pub gold_reward: u32,
    /// Lives deducted on arrival under the fixed goal damage policy.
    pub damage: u32,
}

/// Base statistics of every enemy kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    /// Basic zombie.
    pub basic_zombie: EnemyStats,
    /// Fast zombie.
    pub fast_zombie: EnemyStats,
    /// Armored zombie.
    pub armored_zombie: EnemyStats,
    /// Spitter zombie.
    pub spitter_zombie: EnemyStats,
}

impl EnemyTable {
    /// Statistics of the provided kind.
    #[must_use]
    pub fn get(&self, kind: EnemyKind) -> &EnemyStats {
        match kind {
            EnemyKind::BasicZombie => &self.basic_zombie,
            EnemyKind::FastZombie => &self.fast_zombie,
            EnemyKind::ArmoredZombie => &self.armored_zombie,
            EnemyKind::SpitterZombie => &self.spitter_zombie,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &EnemyStats> {
        [
            &self.basic_zombie,
            &self.fast_zombie,
            &self.armored_zombie,
            &self.spitter_zombie,
        ]
        .into_iter()
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            basic_zombie: EnemyStats {
                health: 175,
                speed: 0.5,
                gold_reward: 10,
                damage: 1,
            },
            fast_zombie: EnemyStats {
                health: 105,
                speed: 1.0,
                gold_reward: 15,
                damage: 1,
            },
            armored_zombie: EnemyStats {
                health: 350,
                speed: 0.3,
                gold_reward: 20,
                damage: 2,
            },
            spitter_zombie: EnemyStats {
                health: 140,
                speed: 0.6,
                gold_reward: 15,
                damage: 1,
            },
        }
    }
}

/// Per-stat multipliers applied when a tower gains a level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeMultipliers {
    /// Damage multiplier; rounded to the nearest integer.
    pub damage: f64,
    /// Range multiplier; rounded to one decimal place.
    pub range: f64,
    /// Attack speed multiplier; rounded to one decimal place.
    pub attack_speed: f64,
    /// Upgrade cost multiplier; rounded to the nearest integer.
    pub upgrade_cost: f64,
    /// Production multiplier; rounded to the nearest integer.
    pub gold_production_rate: f64,
}

impl Default for UpgradeMultipliers {
    fn default() -> Self {
        Self {
            damage: 1.5,
            range: 1.05,
            attack_speed: 1.2,
            upgrade_cost: 1.5,
            gold_production_rate: 1.5,
        }
    }
}

/// Exponential pricing of extra lives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraLifePricing {
    /// Price while lives equal the starting count.
    pub base_cost: u32,
    /// Growth factor per life above the starting count.
    pub multiplier: f64,
}

impl Default for ExtraLifePricing {
    fn default() -> Self {
        Self {
            base_cost: 100,
            multiplier: 1.25,
        }
    }
}

impl ExtraLifePricing {
    /// Price of the next life given the current and starting life counts.
    #[must_use]
    pub fn price(&self, lives: u32, starting_lives: u32) -> u32 {
        let exponent = i64::from(lives) - i64::from(starting_lives);
        let exponent = i32::try_from(exponent).unwrap_or(i32::MAX);
        round_amount(f64::from(self.base_cost) * self.multiplier.powi(exponent))
    }
}

/// Constants of the wave clearance reward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveRewardConfig {
    /// Flat gold granted per cleared wave.
    pub base_gold: u32,
    /// Gold granted per remaining life.
    pub per_life_bonus: u32,
    /// Gold granted per standing tower.
    pub per_tower_bonus: u32,
    /// Factor applied to the gold multiplier on each wave advance.
    pub gold_multiplier_decay: f64,
}

impl Default for WaveRewardConfig {
    fn default() -> Self {
        Self {
            base_gold: 50,
            per_life_bonus: 2,
            per_tower_bonus: 5,
            gold_multiplier_decay: 0.75,
        }
    }
}

/// Gold production cadence and aura strength.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    /// Milliseconds between two productions of the same tower.
    pub interval_ms: u64,
    /// Production bonus granted per level of the buffing tower.
    pub aura_bonus_per_level: f64,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            aura_bonus_per_level: 0.2,
        }
    }
}

impl ProductionConfig {
    /// Time between two productions of the same tower.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// How many lives an arriving enemy deducts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDamagePolicy {
    /// Deducts the per-kind damage from the enemy table.
    Fixed,
    /// Deducts `max(5, round(round(health / 10) / 10))` from the remaining health.
    RemainingHealth,
}

/// Secondary damage dealt by area-effect towers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    /// Enables secondary damage; disabled splash leaves the area flag inert.
    pub enabled: bool,
    /// Radius around the primary target, in cells.
    pub radius: f64,
    /// Fraction of the tower damage dealt to secondary targets.
    pub damage_ratio: f64,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 1.0,
            damage_ratio: 0.5,
        }
    }
}

/// Combat policies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Secondary damage of area-effect towers.
    pub splash: SplashConfig,
    /// Lives deducted by arriving enemies.
    pub goal_damage: GoalDamagePolicy,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            splash: SplashConfig::default(),
            goal_damage: GoalDamagePolicy::RemainingHealth,
        }
    }
}

impl CombatConfig {
    /// Lives deducted by an enemy reaching the goal.
    #[must_use]
    pub fn goal_damage(&self, health: u32, fixed_damage: u32) -> u32 {
        match self.goal_damage {
            GoalDamagePolicy::Fixed => fixed_damage,
            GoalDamagePolicy::RemainingHealth => {
                let tenths = round_amount(f64::from(health) / 10.0);
                round_amount(f64::from(tenths) / 10.0).max(5)
            }
        }
    }
}

/// Lifetimes of presentation-only hints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Milliseconds an attack or production animation lasts.
    pub attack_animation_ms: u64,
    /// Milliseconds a gold indicator stays visible.
    pub gold_indicator_ms: u64,
    /// Maximum number of gold indicators kept at once.
    pub max_gold_indicators: usize,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            attack_animation_ms: 300,
            gold_indicator_ms: 2_000,
            max_gold_indicators: 16,
        }
    }
}

impl PresentationConfig {
    /// Lifetime of an attack or production animation.
    #[must_use]
    pub const fn attack_animation(&self) -> Duration {
        Duration::from_millis(self.attack_animation_ms)
    }

    /// Lifetime of a gold indicator.
    #[must_use]
    pub const fn gold_indicator(&self) -> Duration {
        Duration::from_millis(self.gold_indicator_ms)
    }
}

/// Synthetic waves appended when play continues after a victory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuationConfig {
    /// Number of waves appended per continuation.
    pub extra_waves: u32,
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self { extra_waves: 5 }
    }
}

/// Composition and cadence of a single wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    /// One-based wave number.
    pub number: u32,
    /// Ordered roster; the spawner draws from it cyclically.
    pub enemies: Vec<EnemyKind>,
    /// Enemies released per second.
    pub spawn_rate: f64,
}

impl WaveDefinition {
    /// Builds wave `number` from the standard growth curve.
    ///
    /// Every wave holds `2n` basic zombies, then `n/2` fast zombies from wave
    /// three, `n/3` armored zombies from wave five and `n/4` spitters from
    /// wave seven. The spawn rate grows by a tenth per wave.
    #[must_use]
    pub fn generate(number: u32) -> Self {
        let mut enemies = Vec::new();
        enemies.extend(std::iter::repeat(EnemyKind::BasicZombie).take(count(number * 2)));
        if number >= 3 {
            enemies.extend(std::iter::repeat(EnemyKind::FastZombie).take(count(number / 2)));
        }
        if number >= 5 {
            enemies.extend(std::iter::repeat(EnemyKind::ArmoredZombie).take(count(number / 3)));
        }
        if number >= 7 {
            enemies.extend(std::iter::repeat(EnemyKind::SpitterZombie).take(count(number / 4)));
        }

        Self {
            number,
            enemies,
            spawn_rate: 0.5 + f64::from(number) * 0.1,
        }
    }
}

fn count(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Rounds a non-negative amount half away from zero, saturating at `u32::MAX`.
#[must_use]
pub fn round_amount(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let rounded = value.round();
    if rounded >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        rounded as u32
    }
}
