use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What a mutation does to the genome once paid for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationEffect {
    /// Raise the target strand's stability, capped at 1.
    StabilityBoost { delta: f32 },
    /// Permanent resistance against the target type. Only announced; the
    /// combat side keeps the resistance table.
    Resistance { amount: f32 },
    /// Permanent weakness reduction against the target type. Only announced.
    WeaknessReduction { amount: f32 },
    /// Scale every non-dominant strand by `1 - purity_increase`.
    Purification { purity_increase: f32 },
    /// Pool all non-dominant DNA and scatter it back point by point.
    Reshuffle,
}

impl MutationEffect {
    pub fn requires_target(&self) -> bool {
        matches!(
            self,
            Self::StabilityBoost { .. } | Self::Resistance { .. } | Self::WeaknessReduction { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub id: String,
    pub name: String,
    pub cost: u32,
    pub effect: MutationEffect,
}

impl Mutation {
    pub fn new(id: &str, name: &str, cost: u32, effect: MutationEffect) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            cost,
            effect,
        }
    }
}

/// Fixed set of purchasable mutations, keyed by id.
#[derive(Clone, Debug)]
pub struct MutationTable {
    mutations: HashMap<String, Mutation>,
}

impl MutationTable {
    pub fn new(mutations: impl IntoIterator<Item = Mutation>) -> Self {
        Self {
            mutations: mutations.into_iter().map(|m| (m.id.clone(), m)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Mutation> {
        self.mutations.get(id)
    }

    /// Mutations sorted by cost, then id.
    pub fn list(&self) -> Vec<&Mutation> {
        let mut all: Vec<&Mutation> = self.mutations.values().collect();
        all.sort_by(|a, b| a.cost.cmp(&b.cost).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

impl Default for MutationTable {
    fn default() -> Self {
        Self::new([
            Mutation::new(
                "stabilize",
                "Genetic Stabilizer",
                2,
                MutationEffect::StabilityBoost { delta: 0.2 },
            ),
            Mutation::new(
                "hardened_membrane",
                "Hardened Membrane",
                3,
                MutationEffect::Resistance { amount: 0.25 },
            ),
            Mutation::new(
                "adaptive_tissue",
                "Adaptive Tissue",
                3,
                MutationEffect::WeaknessReduction { amount: 0.25 },
            ),
            Mutation::new(
                "purify",
                "Purification",
                4,
                MutationEffect::Purification {
                    purity_increase: 0.2,
                },
            ),
            Mutation::new("reshuffle", "Genetic Reshuffle", 5, MutationEffect::Reshuffle),
        ])
    }
}
