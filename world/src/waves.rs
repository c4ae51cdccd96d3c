//! Wave table and the progress of the active wave.

use std::time::Duration;

use zombie_defence_core::{config::WaveDefinition, EnemyKind, WaveSnapshot};

#[derive(Clone, Debug)]
pub(crate) struct WaveProgress {
    table: Vec<WaveDefinition>,
    index: usize,
    emitted: u32,
    last_spawn: Duration,
    completed: bool,
}

impl WaveProgress {
    /// Starts at the first wave of `table`, which must not be empty.
    pub(crate) fn new(table: Vec<WaveDefinition>) -> Self {
        Self {
            table,
            index: 0,
            emitted: 0,
            last_spawn: Duration::ZERO,
            completed: false,
        }
    }

    fn active(&self) -> Option<&WaveDefinition> {
        self.table.get(self.index)
    }

    pub(crate) fn number(&self) -> u32 {
        self.active().map_or(0, |wave| wave.number)
    }

    pub(crate) fn count(&self) -> u32 {
        self.active()
            .map_or(0, |wave| u32::try_from(wave.enemies.len()).unwrap_or(u32::MAX))
    }

    pub(crate) const fn completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn fully_emitted(&self) -> bool {
        self.emitted >= self.count()
    }

    pub(crate) fn has_next(&self) -> bool {
        self.index + 1 < self.table.len()
    }

    pub(crate) fn total(&self) -> u32 {
        u32::try_from(self.table.len()).unwrap_or(u32::MAX)
    }

    pub(crate) fn restart_spawn_clock(&mut self, now: Duration) {
        self.last_spawn = now;
    }

    pub(crate) fn mark_completed(&mut self) -> bool {
        if self.completed || !self.fully_emitted() {
            return false;
        }
        self.completed = true;
        true
    }

    /// Records one spawn and returns the kind drawn round-robin from the roster.
    pub(crate) fn emit(&mut self, now: Duration) -> Option<EnemyKind> {
        if self.completed || self.fully_emitted() {
            return None;
        }
        let wave = self.active()?;
        let slot = usize::try_from(self.emitted).ok()? % wave.enemies.len();
        let kind = wave.enemies[slot];
        self.emitted += 1;
        self.last_spawn = now;
        Some(kind)
    }

    /// Moves to the next wave and resets the per-wave counters.
    pub(crate) fn advance(&mut self, now: Duration) -> bool {
        if !self.has_next() {
            return false;
        }
        self.index += 1;
        self.emitted = 0;
        self.completed = false;
        self.last_spawn = now;
        true
    }

    pub(crate) fn extend(&mut self, count: u32) {
        let last = self.table.last().map_or(0, |wave| wave.number);
        self.table
            .extend((1..=count).map(|offset| WaveDefinition::generate(last + offset)));
    }

    pub(crate) fn snapshot(&self) -> WaveSnapshot {
        let (enemies, spawn_rate) = self
            .active()
            .map(|wave| (wave.enemies.clone(), wave.spawn_rate))
            .unwrap_or_default();
        WaveSnapshot {
            number: self.number(),
            total_waves: self.total(),
            enemies,
            spawn_rate,
            emitted: self.emitted,
            last_spawn: self.last_spawn,
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> WaveProgress {
        WaveProgress::new(vec![
            WaveDefinition {
                number: 1,
                enemies: vec![EnemyKind::BasicZombie, EnemyKind::FastZombie],
                spawn_rate: 1.0,
            },
            WaveDefinition::generate(2),
        ])
    }

    #[test]
    fn roster_is_drawn_round_robin() {
        let mut waves = progress();
        assert_eq!(waves.emit(Duration::from_secs(1)), Some(EnemyKind::BasicZombie));
        assert_eq!(waves.emit(Duration::from_secs(2)), Some(EnemyKind::FastZombie));
        assert_eq!(waves.emit(Duration::from_secs(3)), None);
        assert!(waves.fully_emitted());
        assert_eq!(waves.snapshot().last_spawn, Duration::from_secs(2));
    }

    #[test]
    fn completion_requires_full_emission() {
        let mut waves = progress();
        assert!(!waves.mark_completed());
        let _ = waves.emit(Duration::ZERO);
        let _ = waves.emit(Duration::ZERO);
        assert!(waves.mark_completed());
        assert!(!waves.mark_completed(), "completion is reported once");
        assert!(waves.completed());
    }

    #[test]
    fn advance_resets_counters() {
        let mut waves = progress();
        let _ = waves.emit(Duration::ZERO);
        assert!(waves.advance(Duration::from_secs(9)));
        let snapshot = waves.snapshot();
        assert_eq!(snapshot.number, 2);
        assert_eq!(snapshot.emitted, 0);
        assert_eq!(snapshot.last_spawn, Duration::from_secs(9));
        assert!(!snapshot.completed);
        assert!(!waves.advance(Duration::from_secs(10)));
    }

    #[test]
    fn extension_continues_numbering() {
        let mut waves = progress();
        waves.extend(3);
        assert_eq!(waves.total(), 5);
        assert!(waves.advance(Duration::ZERO));
        assert!(waves.advance(Duration::ZERO));
        assert_eq!(waves.number(), 3);
        assert_eq!(waves.count(), WaveDefinition::generate(3).enemies.len() as u32);
    }
}
