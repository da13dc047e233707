use super::GenomeEngine;
use crate::dna::DnaType;
use crate::stats::AbsorbSource;
use tracing::{debug, trace};

impl GenomeEngine {
    /// Absorb DNA of one type from a kill or a loot pickup.
    ///
    /// Gains shrink as the genome grows purer, and every other non-empty
    /// strand loses a share of the gain. Trait types the genome does not carry
    /// and non-positive amounts are ignored.
    pub fn absorb(&mut self, dna_type: DnaType, amount: f32, source: AbsorbSource) {
        if !(amount.is_finite() && amount > 0.0) {
            debug!(?dna_type, amount, "ignoring non-positive absorb amount");
            return;
        }
        if !self.genome.contains(dna_type) {
            debug!(?dna_type, "ignoring absorb for trait type without a strand");
            return;
        }

        self.activity.record(source, self.clock.now_ms());

        let purity_factor = 1.0 - self.genome.purity() * self.config.absorb_purity_damping;
        let gain = amount * purity_factor;
        let decay = gain * self.config.cross_decay_rate;

        for strand in self.genome.strands_mut() {
            if strand.dna_type() == dna_type {
                strand.set_value(strand.value() + gain);
            } else if strand.value() > 0.0 {
                strand.set_value(strand.value() - decay);
            }
        }
        trace!(?dna_type, ?source, amount, gain, "absorbed dna");

        self.genome.recalculate();
        self.check_for_evolution();
    }

    /// Absorb the DNA of a defeated enemy, worth half its experience value.
    ///
    /// A kill worth no experience is ignored like any other non-positive
    /// absorb and does not count toward `total_kills`.
    pub fn absorb_kill(&mut self, dna_type: DnaType, experience_value: f32) {
        self.absorb(dna_type, experience_value / 2.0, AbsorbSource::Kill);
    }
}
