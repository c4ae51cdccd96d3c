//! Presentation hints stored beside the simulation state.
//!
//! The simulation writes these values but never reads them back, so their
//! expiry timing cannot influence gameplay.

use std::{
    collections::{BTreeMap, VecDeque},
    time::Duration,
};

use zombie_defence_core::{GoldIndicator, GridPosition, PresentationHints, TowerId};

#[derive(Clone, Debug, Default)]
pub(crate) struct Hints {
    gold_indicators: VecDeque<GoldIndicator>,
    animations: BTreeMap<TowerId, Duration>,
    next_indicator_id: u32,
}

impl Hints {
    pub(crate) fn animate(&mut self, tower: TowerId, until: Duration) {
        let _ = self.animations.insert(tower, until);
    }

    pub(crate) fn forget_tower(&mut self, tower: TowerId) {
        let _ = self.animations.remove(&tower);
    }

    /// Records a gold gain, dropping the oldest indicators beyond `capacity`.
    pub(crate) fn push_gold(
        &mut self,
        amount: u32,
        position: GridPosition,
        now: Duration,
        duration: Duration,
        capacity: usize,
    ) {
        let id = self.next_indicator_id;
        self.next_indicator_id = self.next_indicator_id.wrapping_add(1);
        self.gold_indicators.push_back(GoldIndicator {
            id,
            amount,
            position,
            created_at: now,
            duration,
        });
        while self.gold_indicators.len() > capacity {
            let _ = self.gold_indicators.pop_front();
        }
    }

    pub(crate) fn expire(&mut self, now: Duration) {
        self.gold_indicators
            .retain(|indicator| now.saturating_sub(indicator.created_at) < indicator.duration);
        self.animations.retain(|_, until| *until > now);
    }

    pub(crate) fn snapshot(&self) -> PresentationHints {
        PresentationHints {
            gold_indicators: self.gold_indicators.iter().copied().collect(),
            animations: self
                .animations
                .iter()
                .map(|(tower, until)| (*tower, *until))
                .collect(),
        }
    }
}
