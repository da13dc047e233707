pub mod catalog;
pub mod clock;
pub mod config;
pub mod constants;
pub mod dna;
pub mod engine;
pub mod events;
pub mod genome;
pub mod mutation;
pub mod rng;
pub mod stats;

pub use catalog::{EvolutionCatalog, EvolutionPath, EvolutionRequirements};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use dna::DnaType;
pub use engine::{EngineInitError, GenomeEngine};
pub use events::GenomeEvent;
pub use genome::{DnaStrand, Genome};
pub use stats::{AbsorbSource, PerformanceStats};
