use super::GenomeEngine;
use crate::events::GenomeEvent;
use std::sync::Arc;
use tracing::{debug, info};

impl GenomeEngine {
    /// Commit to an evolution path.
    ///
    /// Requirements are checked again against the current state, since an
    /// earlier offer may have gone stale. Returns `false` for unknown ids and
    /// unmet requirements; the genome is untouched in both cases.
    pub fn evolve(&mut self, path_id: &str) -> bool {
        let catalog = Arc::clone(&self.catalog);
        let Some(path) = catalog.get(path_id) else {
            debug!(path_id, "evolve rejected: unknown path");
            return false;
        };
        if !self.meets_requirements(&path.requirements, &self.stats()) {
            debug!(path_id, "evolve rejected: requirements no longer met");
            return false;
        }

        let from = std::mem::replace(&mut self.current_form, path.id.clone());
        self.genome.increment_generation();
        self.reset_offered_evolutions();

        let generation = self.genome.generation();
        info!(from = %from, to = %path.id, generation, "evolution committed");
        let event = GenomeEvent::EvolutionComplete {
            from,
            to: path.id.clone(),
            generation,
            bonuses: path.bonuses.clone(),
        };
        self.events.emit(&event);
        true
    }
}
