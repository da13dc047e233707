use super::GenomeEngine;
use crate::constants::{RESHUFFLE_STEP, STRAND_VALUE_MAX};
use crate::dna::DnaType;
use crate::events::GenomeEvent;
use crate::mutation::MutationEffect;
use rand::Rng;
use tracing::{debug, info};

impl GenomeEngine {
    /// Award mutation points. Saturates at `u32::MAX`.
    pub fn grant_mutation_points(&mut self, points: u32) {
        let total = self.genome.mutation_points().saturating_add(points);
        self.genome.set_mutation_points(total);
    }

    /// Spend mutation points to edit the genome directly.
    ///
    /// Fails without side effects for unknown ids, insufficient points, and
    /// a missing target on targeted mutations. A stability boost also needs
    /// the target strand to exist.
    pub fn apply_mutation(&mut self, mutation_id: &str, target_type: Option<DnaType>) -> bool {
        let Some(mutation) = self.mutations.get(mutation_id).cloned() else {
            debug!(mutation_id, "mutation rejected: unknown id");
            return false;
        };
        let points = self.genome.mutation_points();
        if points < mutation.cost {
            debug!(
                mutation_id,
                points,
                cost = mutation.cost,
                "mutation rejected: insufficient points"
            );
            return false;
        }
        if mutation.effect.requires_target() && target_type.is_none() {
            debug!(mutation_id, "mutation rejected: target type required");
            return false;
        }
        if let (MutationEffect::StabilityBoost { .. }, Some(t)) = (&mutation.effect, target_type) {
            if !self.genome.contains(t) {
                debug!(mutation_id, target = ?t, "mutation rejected: no strand for target");
                return false;
            }
        }

        self.genome.set_mutation_points(points - mutation.cost);

        match mutation.effect {
            MutationEffect::StabilityBoost { delta } => {
                if let Some(strand) = target_type.and_then(|t| self.genome.strand_mut(t)) {
                    strand.set_stability(strand.stability() + delta);
                    strand.record_mutation();
                }
            }
            MutationEffect::Resistance { amount }
            | MutationEffect::WeaknessReduction { amount } => {
                debug!(mutation_id, target = ?target_type, amount, "resistance edit recorded");
            }
            MutationEffect::Purification { purity_increase } => {
                self.purify(purity_increase);
            }
            MutationEffect::Reshuffle => {
                self.reshuffle();
            }
        }

        info!(mutation_id, target = ?target_type, "mutation applied");
        let event = GenomeEvent::MutationApplied {
            mutation_id: mutation.id,
            target_type,
        };
        self.events.emit(&event);
        true
    }

    fn purify(&mut self, purity_increase: f32) {
        let dominant = self.genome.dominant_type();
        let keep = (1.0 - purity_increase).clamp(0.0, 1.0);
        for strand in self.genome.strands_mut() {
            if strand.dna_type() != dominant && strand.value() > 0.0 {
                strand.set_value(strand.value() * keep);
                strand.record_mutation();
            }
        }
        self.genome.recalculate();
    }

    /// Pool all non-dominant DNA, then hand it back one step at a time to
    /// uniformly chosen non-dominant types. Steps landing on a full strand
    /// are only partly seated; the rest is lost.
    fn reshuffle(&mut self) {
        let dominant = self.genome.dominant_type();
        let mut targets = Vec::new();
        let mut pool = 0.0f32;
        for strand in self.genome.strands_mut() {
            if strand.dna_type() == dominant {
                continue;
            }
            pool += strand.value();
            strand.set_value(0.0);
            strand.record_mutation();
            targets.push(strand.dna_type());
        }
        if targets.is_empty() {
            self.genome.recalculate();
            return;
        }

        let mut remaining = pool;
        while remaining > 0.0 {
            let step = remaining.min(RESHUFFLE_STEP);
            let pick = targets[self.rng.random_range(0..targets.len())];
            if let Some(strand) = self.genome.strand_mut(pick) {
                let seated = step.min(STRAND_VALUE_MAX - strand.value());
                strand.set_value(strand.value() + seated);
            }
            remaining -= step;
        }
        self.genome.recalculate();
    }
}
