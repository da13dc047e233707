use super::GenomeEngine;
use crate::catalog::{EvolutionPath, EvolutionRequirements};
use crate::events::GenomeEvent;
use crate::stats::PerformanceStats;
use std::collections::HashSet;
use tracing::{debug, info};

/// Throttle and dedup state for availability notifications.
///
/// A path id stays in `offered` until the next committed evolution or an
/// explicit reset, so each path is announced at most once per era.
#[derive(Clone, Debug, Default)]
pub(super) struct OfferingState {
    offered: HashSet<String>,
    last_check_ms: Option<u64>,
}

impl OfferingState {
    /// Claim a check slot. Fails while the cooldown since the last claimed
    /// check is running; the first check of a run always succeeds.
    fn begin_check(&mut self, now_ms: u64, cooldown_ms: u64) -> bool {
        if let Some(last) = self.last_check_ms {
            if now_ms.saturating_sub(last) < cooldown_ms {
                return false;
            }
        }
        self.last_check_ms = Some(now_ms);
        true
    }

    pub(super) fn is_offered(&self, path_id: &str) -> bool {
        self.offered.contains(path_id)
    }

    pub(super) fn offered_ids(&self) -> impl Iterator<Item = &str> {
        self.offered.iter().map(String::as_str)
    }

    pub(super) fn last_check_ms(&self) -> Option<u64> {
        self.last_check_ms
    }
}

impl GenomeEngine {
    /// Evaluate availability and announce paths not offered yet.
    ///
    /// Returns `true` when an `EvolutionAvailable` event was emitted.
    pub fn check_for_evolution(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self
            .offering
            .begin_check(now, self.config.offer_cooldown_ms)
        {
            debug!(now, "availability check skipped during cooldown");
            return false;
        }

        let new_paths: Vec<EvolutionPath> = self
            .available_paths()
            .into_iter()
            .filter(|p| !self.offering.is_offered(&p.id))
            .cloned()
            .collect();
        if new_paths.is_empty() {
            return false;
        }

        self.offering
            .offered
            .extend(new_paths.iter().map(|p| p.id.clone()));
        info!(
            count = new_paths.len(),
            generation = self.genome.generation(),
            "new evolution paths available"
        );
        let event = GenomeEvent::EvolutionAvailable {
            paths: new_paths,
            current_dna: self.genome.dna_breakdown(),
        };
        self.events.emit(&event);
        true
    }

    /// Every catalog path whose requirements currently hold, in catalog order.
    pub fn available_paths(&self) -> Vec<&EvolutionPath> {
        let stats = self.stats();
        self.catalog
            .iter()
            .filter(|p| self.meets_requirements(&p.requirements, &stats))
            .collect()
    }

    pub fn is_path_available(&self, path_id: &str) -> bool {
        self.catalog
            .get(path_id)
            .is_some_and(|p| self.meets_requirements(&p.requirements, &self.stats()))
    }

    /// Forget every offered path so they can be announced again.
    pub fn reset_offered_evolutions(&mut self) {
        self.offering.offered.clear();
    }

    pub fn offered_path_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.offering.offered_ids().collect();
        ids.sort_unstable();
        ids
    }

    pub(in crate::engine) fn meets_requirements(
        &self,
        req: &EvolutionRequirements,
        stats: &PerformanceStats,
    ) -> bool {
        req.min_dna
            .iter()
            .all(|(&t, &min)| self.genome.value(t) >= min)
            && req
                .max_dna
                .iter()
                .all(|(&t, &max)| self.genome.value(t) <= max)
            && stats.total_kills >= req.min_kills
            && stats.survival_time_secs >= req.min_survival_time_secs
            && stats.generation >= req.min_generation
    }
}
