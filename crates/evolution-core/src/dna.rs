use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Elemental and physical lineages a genome can accumulate.
///
/// Declaration order is significant: it is the scan order of
/// [`Genome::recalculate`](crate::genome::Genome::recalculate), so among equal
/// strand values the earlier variant becomes dominant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DnaType {
    Fire,
    Ice,
    Lightning,
    Poison,
    Acid,
    Water,
    Earth,
    Wind,
    Light,
    Shadow,
    Void,
    Crystal,
    Metal,
    Nature,
    Blood,
    Psychic,
    Sound,
    Radiation,
    Armor,
    Speed,
}

impl DnaType {
    /// Integer trait id used to index strand storage.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
