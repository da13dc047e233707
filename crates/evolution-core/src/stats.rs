use crate::dna::DnaType;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Origin of an absorption event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsorbSource {
    Loot,
    Kill,
}

/// Read-only snapshot used as requirement input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub total_kills: u32,
    pub kills_last_minute: u32,
    pub survival_time_secs: f64,
    pub dominant_type: DnaType,
    pub purity: f32,
    pub generation: u32,
    pub mutation_points: u32,
}

/// Timestamped kill/loot history, reduced to what the stats need.
///
/// Survival time counts from the first loot event rather than from run start;
/// a run with no loot reports 0 seconds survived.
#[derive(Clone, Debug)]
pub struct ActivityLog {
    total_kills: u32,
    recent_kills: VecDeque<u64>,
    first_loot_ms: Option<u64>,
    window_ms: u64,
}

impl ActivityLog {
    pub fn new(window_ms: u64) -> Self {
        Self {
            total_kills: 0,
            recent_kills: VecDeque::new(),
            first_loot_ms: None,
            window_ms,
        }
    }

    pub fn record(&mut self, source: AbsorbSource, now_ms: u64) {
        match source {
            AbsorbSource::Kill => {
                self.total_kills = self.total_kills.saturating_add(1);
                self.recent_kills.push_back(now_ms);
                self.prune(now_ms);
            }
            AbsorbSource::Loot => {
                self.first_loot_ms.get_or_insert(now_ms);
            }
        }
    }

    pub fn total_kills(&self) -> u32 {
        self.total_kills
    }

    pub fn kills_within_window(&self, now_ms: u64) -> u32 {
        let count = self
            .recent_kills
            .iter()
            .filter(|&&t| now_ms.saturating_sub(t) < self.window_ms)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    pub fn survival_time_secs(&self, now_ms: u64) -> f64 {
        self.first_loot_ms
            .map_or(0.0, |start| now_ms.saturating_sub(start) as f64 / 1000.0)
    }

    pub fn clear(&mut self) {
        self.total_kills = 0;
        self.recent_kills.clear();
        self.first_loot_ms = None;
    }

    fn prune(&mut self, now_ms: u64) {
        while self
            .recent_kills
            .front()
            .is_some_and(|&t| now_ms.saturating_sub(t) >= self.window_ms)
        {
            self.recent_kills.pop_front();
        }
    }
}
