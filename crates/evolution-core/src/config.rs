use crate::constants::{
    ABSORB_PURITY_DAMPING, CROSS_DECAY_RATE, OFFER_COOLDOWN_MS, RECENT_KILL_WINDOW_MS,
};
use crate::genome::Genome;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deterministic seed for the reshuffle RNG.
    pub seed: u64,
    /// Minimum spacing between two availability checks, in milliseconds.
    pub offer_cooldown_ms: u64,
    /// Fraction of current purity subtracted from absorption efficiency.
    pub absorb_purity_damping: f32,
    /// Share of each gain removed from every other non-empty strand.
    pub cross_decay_rate: f32,
    /// Window used for the recent-kill statistic, in milliseconds.
    pub recent_kill_window_ms: u64,
    /// Mutation points a fresh run starts with.
    pub initial_mutation_points: u32,
    /// Stability assigned to every strand of a fresh genome.
    pub initial_stability: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            offer_cooldown_ms: OFFER_COOLDOWN_MS,
            absorb_purity_damping: ABSORB_PURITY_DAMPING,
            cross_decay_rate: CROSS_DECAY_RATE,
            recent_kill_window_ms: RECENT_KILL_WINDOW_MS,
            initial_mutation_points: 0,
            initial_stability: Genome::DEFAULT_STABILITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineConfigError {
    #[error("absorb_purity_damping must be finite and within [0,1]")]
    InvalidAbsorbPurityDamping,
    #[error("cross_decay_rate must be finite and within [0,1]")]
    InvalidCrossDecayRate,
    #[error("recent_kill_window_ms must be positive")]
    InvalidRecentKillWindow,
    #[error("initial_stability must be finite and within [0,1]")]
    InvalidInitialStability,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        self.validate_absorption()?;
        self.validate_stats()?;
        self.validate_genome()?;
        Ok(())
    }

    fn validate_absorption(&self) -> Result<(), EngineConfigError> {
        if !(self.absorb_purity_damping.is_finite()
            && (0.0..=1.0).contains(&self.absorb_purity_damping))
        {
            return Err(EngineConfigError::InvalidAbsorbPurityDamping);
        }
        if !(self.cross_decay_rate.is_finite() && (0.0..=1.0).contains(&self.cross_decay_rate)) {
            return Err(EngineConfigError::InvalidCrossDecayRate);
        }
        Ok(())
    }

    fn validate_stats(&self) -> Result<(), EngineConfigError> {
        if self.recent_kill_window_ms == 0 {
            return Err(EngineConfigError::InvalidRecentKillWindow);
        }
        Ok(())
    }

    fn validate_genome(&self) -> Result<(), EngineConfigError> {
        if !(self.initial_stability.is_finite() && (0.0..=1.0).contains(&self.initial_stability)) {
            return Err(EngineConfigError::InvalidInitialStability);
        }
        Ok(())
    }
}
