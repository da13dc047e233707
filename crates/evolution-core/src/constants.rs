/// Upper bound of a strand value.
pub const STRAND_VALUE_MAX: f32 = 100.0;

/// Upper bound of strand stability.
pub const STABILITY_MAX: f32 = 1.0;

/// Minimum wall-clock spacing between two availability checks.
pub const OFFER_COOLDOWN_MS: u64 = 5_000;

/// Width of the window behind `PerformanceStats::kills_last_minute`.
pub const RECENT_KILL_WINDOW_MS: u64 = 60_000;

/// Fraction of current purity that dampens further absorption.
pub const ABSORB_PURITY_DAMPING: f32 = 0.5;

/// Share of an absorbed gain taken from every other non-empty strand.
pub const CROSS_DECAY_RATE: f32 = 0.1;

/// Size of one redistribution step during a reshuffle mutation.
pub const RESHUFFLE_STEP: f32 = 1.0;

/// Form id reported as `from` for the first committed evolution.
pub const BASE_FORM_ID: &str = "base";
