use crate::dna::DnaType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

fn unit_multiplier() -> f32 {
    1.0
}

fn unit_scale() -> f32 {
    1.0
}

/// Conditions a genome and its run statistics must meet for a path to be legal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionRequirements {
    /// Per-type lower bounds on strand value (inclusive).
    pub min_dna: BTreeMap<DnaType, f32>,
    /// Per-type upper bounds on strand value (inclusive).
    pub max_dna: BTreeMap<DnaType, f32>,
    pub min_kills: u32,
    pub min_survival_time_secs: f64,
    pub min_generation: u32,
}

/// Bonuses granted by a form. Applying them is the consumer's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionBonuses {
    #[serde(default = "unit_multiplier")]
    pub health_multiplier: f32,
    #[serde(default = "unit_multiplier")]
    pub damage_multiplier: f32,
    #[serde(default = "unit_multiplier")]
    pub speed_multiplier: f32,
    #[serde(default)]
    pub special_abilities: Vec<String>,
    #[serde(default)]
    pub resistances: BTreeMap<DnaType, f32>,
    #[serde(default)]
    pub weaknesses: BTreeMap<DnaType, f32>,
}

impl Default for EvolutionBonuses {
    fn default() -> Self {
        Self {
            health_multiplier: 1.0,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            special_abilities: Vec::new(),
            resistances: BTreeMap::new(),
            weaknesses: BTreeMap::new(),
        }
    }
}

/// Cosmetic descriptor; opaque to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub body_plan: String,
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: String::new(),
            body_plan: String::new(),
            scale: 1.0,
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPath {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: EvolutionRequirements,
    #[serde(default)]
    pub bonuses: EvolutionBonuses,
    #[serde(default)]
    pub appearance: Appearance,
    /// Informational follow-up forms. Not enforced and not resolved.
    #[serde(default)]
    pub next_evolutions: Vec<String>,
}

impl EvolutionPath {
    pub fn new(id: impl Into<String>, requirements: EvolutionRequirements) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            requirements,
            ..Self::default()
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only lookup of evolution paths, iterated in a stable order.
///
/// The catalog is taken as given: duplicate ids replace earlier entries and
/// `next_evolutions` references are never checked.
#[derive(Clone, Debug, Default)]
pub struct EvolutionCatalog {
    paths: Vec<EvolutionPath>,
    index: HashMap<String, usize>,
}

impl EvolutionCatalog {
    pub fn from_paths(paths: impl IntoIterator<Item = EvolutionPath>) -> Self {
        let mut catalog = Self::default();
        for path in paths {
            match catalog.index.get(&path.id) {
                Some(&slot) => catalog.paths[slot] = path,
                None => {
                    catalog.index.insert(path.id.clone(), catalog.paths.len());
                    catalog.paths.push(path);
                }
            }
        }
        catalog
    }

    /// Parse a JSON object keyed by path id. Entries without an `id` take
    /// their key; entries are ordered by key.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, EvolutionPath> = serde_json::from_str(json)?;
        Ok(Self::from_paths(entries.into_iter().map(|(key, mut path)| {
            if path.id.is_empty() {
                path.id = key;
            }
            path
        })))
    }

    pub fn get(&self, id: &str) -> Option<&EvolutionPath> {
        self.index.get(id).map(|&i| &self.paths[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvolutionPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_catalog_fills_ids_and_defaults() {
        let json = r#"{
            "ember_whelp": {
                "name": "Ember Whelp",
                "requirements": { "min_dna": { "fire": 20 } },
                "next_evolutions": ["magma_drake", "does_not_exist"]
            },
            "frost_mite": {
                "id": "frost_mite",
                "requirements": { "min_dna": { "ice": 25 }, "max_dna": { "fire": 5 }, "min_kills": 10 },
                "bonuses": { "speed_multiplier": 1.2, "special_abilities": ["chill_aura"] }
            }
        }"#;
        let catalog = EvolutionCatalog::from_json_str(json).expect("catalog should parse");
        assert_eq!(catalog.len(), 2);

        let whelp = catalog.get("ember_whelp").unwrap();
        assert_eq!(whelp.id, "ember_whelp");
        assert_eq!(whelp.requirements.min_dna[&DnaType::Fire], 20.0);
        assert_eq!(whelp.requirements.min_generation, 0);
        assert_eq!(whelp.bonuses.health_multiplier, 1.0);
        assert_eq!(whelp.appearance.scale, 1.0);

        let mite = catalog.get("frost_mite").unwrap();
        assert_eq!(mite.requirements.max_dna[&DnaType::Fire], 5.0);
        assert_eq!(mite.requirements.min_kills, 10);
        assert_eq!(mite.bonuses.speed_multiplier, 1.2);
    }

    #[test]
    fn json_catalog_rejects_unknown_dna_type() {
        let json = r#"{ "x": { "requirements": { "min_dna": { "plasma": 1 } } } }"#;
        assert!(matches!(
            EvolutionCatalog::from_json_str(json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn duplicate_ids_keep_position_and_take_last_entry() {
        let mut second = EvolutionPath::new("a", EvolutionRequirements::default());
        second.name = "second".into();
        let catalog = EvolutionCatalog::from_paths([
            EvolutionPath::new("a", EvolutionRequirements::default()),
            EvolutionPath::new("b", EvolutionRequirements::default()),
            second,
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("a").unwrap().name, "second");
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn missing_id_is_none() {
        let catalog = EvolutionCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.get("anything").is_none());
    }
}
