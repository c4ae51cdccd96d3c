use std::time::Duration;

use zombie_defence_core::{
    Command, Event, GameConfig, GridPosition, PlayerCommand, TowerKind,
};
use zombie_defence_system_tower_combat::TowerCombat;
use zombie_defence_system_tower_targeting::TowerTargeting;
use zombie_defence_world::{self as world, query, World};

const TICK: Duration = Duration::from_millis(100);

struct Harness {
    world: World,
    targeting: TowerTargeting,
    combat: TowerCombat,
}

impl Harness {
    fn new(config: GameConfig) -> Self {
        Self {
            world: World::new(config).expect("valid configuration"),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
        }
    }

    fn player(&mut self, command: PlayerCommand) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Player(command), &mut events);
        events
    }

    fn place(&mut self, kind: TowerKind, x: u32, y: u32) {
        let _ = self.player(PlayerCommand::SelectTowerType(Some(kind)));
        let events = self.player(PlayerCommand::PlaceTower {
            position: GridPosition::new(x, y),
        });
        assert!(
            events
                .iter()
                .any(|event| matches!(event, Event::TowerPlaced { .. })),
            "placement failed: {events:?}"
        );
    }

    fn spawn(&mut self) {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::SpawnEnemy, &mut events);
    }

    fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt: TICK }, &mut events);

        let mut targets = Vec::new();
        self.targeting.handle(
            query::status(&self.world),
            query::now(&self.world),
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut targets,
        );

        let mut commands = Vec::new();
        self.combat.handle(
            query::status(&self.world),
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &targets,
            &query::config(&self.world).combat.splash,
            &mut commands,
        );
        commands.push(Command::ResolveKills);

        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        events
    }
}

#[test]
fn knight_kills_basic_zombie_and_collects_bounty() {
    let mut harness = Harness::new(GameConfig::default());
    harness.place(TowerKind::Knight, 0, 4);
    let _ = harness.player(PlayerCommand::StartGame);
    harness.spawn();

    let mut attack_times = Vec::new();
    let mut killed = false;
    for _ in 0..200 {
        let events = harness.tick();
        for event in &events {
            match event {
                Event::TowerAttacked { .. } => attack_times.push(query::now(&harness.world)),
                Event::EnemyKilled { .. } => killed = true,
                _ => {}
            }
        }
        if killed {
            break;
        }
    }

    assert!(killed, "zombie survived");
    assert_eq!(attack_times.len(), 18, "175 health needs 18 knight hits");
    for pair in attack_times.windows(2) {
        assert!(
            pair[1] - pair[0] >= Duration::from_secs(1),
            "tower attacked twice within its interval"
        );
    }
    assert_eq!(query::economy(&harness.world).gold, 250 - 100 + 10);
    assert_eq!(query::enemy_count(&harness.world), 0);
}

#[test]
fn out_of_range_enemy_is_never_attacked() {
    let mut harness = Harness::new(GameConfig::default());
    harness.place(TowerKind::Knight, 9, 9);
    let _ = harness.player(PlayerCommand::StartGame);
    harness.spawn();

    for _ in 0..50 {
        let events = harness.tick();
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::TowerAttacked { .. })));
    }
    let tower = query::tower_view(&harness.world).into_vec()[0];
    assert_eq!(tower.last_attack, Duration::ZERO);
}

#[test]
fn cannon_splash_damages_clustered_enemies() {
    let mut harness = Harness::new(GameConfig::default());
    harness.place(TowerKind::Cannon, 1, 4);
    let _ = harness.player(PlayerCommand::StartGame);
    harness.spawn();
    harness.spawn();

    let mut hits = None;
    for _ in 0..30 {
        for event in harness.tick() {
            if let Event::TowerAttacked { hits: count, .. } = event {
                hits = Some(count);
            }
        }
        if hits.is_some() {
            break;
        }
    }

    assert_eq!(hits, Some(2));
    let healths: Vec<u32> = query::enemy_view(&harness.world)
        .iter()
        .map(|enemy| enemy.health)
        .collect();
    assert_eq!(healths, vec![175 - 18, 175 - 9]);
}

#[test]
fn attack_sets_presentation_animation() {
    let mut harness = Harness::new(GameConfig::default());
    harness.place(TowerKind::Archer, 0, 2);
    let _ = harness.player(PlayerCommand::StartGame);
    harness.spawn();

    for _ in 0..7 {
        let _ = harness.tick();
    }
    let hints = query::hints(&harness.world);
    assert_eq!(hints.animations.len(), 1);
    assert_eq!(hints.animations[0].1, Duration::from_millis(700 + 300));
}
