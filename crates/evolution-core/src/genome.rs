use crate::constants::{STABILITY_MAX, STRAND_VALUE_MAX};
use crate::dna::DnaType;
use serde::Serialize;
use std::collections::BTreeMap;
use strum::{EnumCount, IntoEnumIterator};

/// One trait's accumulated DNA.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DnaStrand {
    // Fields are private; values are clamped on every write.
    dna_type: DnaType,
    value: f32,
    stability: f32,
    mutation_count: u32,
}

impl DnaStrand {
    pub fn new(dna_type: DnaType, stability: f32) -> Self {
        Self {
            dna_type,
            value: 0.0,
            stability: stability.clamp(0.0, STABILITY_MAX),
            mutation_count: 0,
        }
    }

    pub fn dna_type(&self) -> DnaType {
        self.dna_type
    }

    /// Current dominance of this trait, within `[0, 100]`.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Resistance to randomized edits, within `[0, 1]`.
    pub fn stability(&self) -> f32 {
        self.stability
    }

    pub fn mutation_count(&self) -> u32 {
        self.mutation_count
    }

    pub(crate) fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, STRAND_VALUE_MAX);
    }

    pub(crate) fn set_stability(&mut self, stability: f32) {
        self.stability = stability.clamp(0.0, STABILITY_MAX);
    }

    pub(crate) fn record_mutation(&mut self) {
        self.mutation_count = self.mutation_count.saturating_add(1);
    }
}

/// The complete genetic profile of one player character.
///
/// `dominant_type` and `purity` are derived from the strands and are only
/// written by [`Genome::recalculate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Genome {
    strands: [Option<DnaStrand>; DnaType::COUNT],
    dominant_type: DnaType,
    purity: f32,
    generation: u32,
    mutation_points: u32,
}

impl Genome {
    /// Default stability assigned to fresh strands.
    pub const DEFAULT_STABILITY: f32 = 0.5;

    /// A genome carrying every trait type at value 0.
    pub fn new() -> Self {
        Self::with_types(DnaType::iter(), Self::DEFAULT_STABILITY)
    }

    /// A genome carrying only the given trait types. Types outside the set
    /// have no strand; absorbing them is a no-op and they read as 0.
    pub fn with_types(types: impl IntoIterator<Item = DnaType>, stability: f32) -> Self {
        let mut strands = [None; DnaType::COUNT];
        let mut first = None;
        for t in types {
            first.get_or_insert(t);
            strands[t.index()] = Some(DnaStrand::new(t, stability));
        }
        Self {
            strands,
            dominant_type: first.unwrap_or(DnaType::Fire),
            purity: 0.0,
            generation: 0,
            mutation_points: 0,
        }
    }

    pub fn strand(&self, dna_type: DnaType) -> Option<&DnaStrand> {
        self.strands[dna_type.index()].as_ref()
    }

    /// Strand value, or 0 for a trait type this genome does not carry.
    pub fn value(&self, dna_type: DnaType) -> f32 {
        self.strand(dna_type).map_or(0.0, DnaStrand::value)
    }

    pub fn contains(&self, dna_type: DnaType) -> bool {
        self.strands[dna_type.index()].is_some()
    }

    /// Present strands in trait-id order.
    pub fn strands(&self) -> impl Iterator<Item = &DnaStrand> {
        self.strands.iter().flatten()
    }

    pub fn dominant_type(&self) -> DnaType {
        self.dominant_type
    }

    pub fn purity(&self) -> f32 {
        self.purity
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn mutation_points(&self) -> u32 {
        self.mutation_points
    }

    pub fn total_value(&self) -> f32 {
        self.strands().map(DnaStrand::value).sum()
    }

    /// Snapshot of every present strand's value.
    pub fn dna_breakdown(&self) -> BTreeMap<DnaType, f32> {
        self.strands().map(|s| (s.dna_type, s.value)).collect()
    }

    /// Recompute `dominant_type` and `purity` in one scan.
    ///
    /// The scan keeps a running maximum starting at 0 and only replaces it on
    /// a strictly greater value, so the first trait to reach the maximum wins
    /// ties. An exact tie does not keep the previous dominant type: a strand
    /// earlier in `DnaType` order that catches up to it takes over. The
    /// previous dominant type only survives when every strand is 0.
    pub fn recalculate(&mut self) {
        let mut max_value = 0.0f32;
        let mut total = 0.0f32;
        let mut dominant = self.dominant_type;
        for strand in self.strands.iter().flatten() {
            total += strand.value;
            if strand.value > max_value {
                max_value = strand.value;
                dominant = strand.dna_type;
            }
        }
        self.dominant_type = dominant;
        self.purity = max_value / total.max(1.0);
    }

    pub(crate) fn strand_mut(&mut self, dna_type: DnaType) -> Option<&mut DnaStrand> {
        self.strands[dna_type.index()].as_mut()
    }

    pub(crate) fn strands_mut(&mut self) -> impl Iterator<Item = &mut DnaStrand> {
        self.strands.iter_mut().flatten()
    }

    pub(crate) fn increment_generation(&mut self) {
        self.generation = self.generation.saturating_add(1);
    }

    pub(crate) fn set_mutation_points(&mut self, points: u32) {
        self.mutation_points = points;
    }
}

impl Default for Genome {
    fn default() -> Self {
        Self::new()
    }
}
