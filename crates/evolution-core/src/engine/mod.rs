//! The genome engine: one genome, its activity history, the offering
//! protocol, and the mutation economy, driven synchronously by gameplay calls.

mod absorb;
mod commit;
mod economy;
mod offering;

use crate::catalog::EvolutionCatalog;
use crate::clock::{Clock, SystemClock};
use crate::config::{EngineConfig, EngineConfigError};
use crate::constants::BASE_FORM_ID;
use crate::dna::DnaType;
use crate::events::{EventBus, GenomeEvent, ListenerId};
use crate::genome::Genome;
use crate::mutation::MutationTable;
use crate::rng::create_rng;
use crate::stats::{ActivityLog, PerformanceStats};
use offering::OfferingState;
use rand_chacha::ChaCha12Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineInitError {
    #[error("{0}")]
    Config(#[from] EngineConfigError),
}

pub struct GenomeEngine {
    genome: Genome,
    /// Template restored by [`GenomeEngine::reset`].
    initial_genome: Genome,
    catalog: Arc<EvolutionCatalog>,
    mutations: MutationTable,
    config: EngineConfig,
    clock: Box<dyn Clock>,
    events: EventBus,
    activity: ActivityLog,
    offering: OfferingState,
    current_form: String,
    rng: ChaCha12Rng,
}

impl GenomeEngine {
    pub fn new(
        config: EngineConfig,
        catalog: Arc<EvolutionCatalog>,
    ) -> Result<Self, EngineInitError> {
        config.validate()?;
        let mut initial_genome = Genome::new();
        Self::seed_genome(&mut initial_genome, &config);
        Ok(Self {
            genome: initial_genome.clone(),
            initial_genome,
            catalog,
            mutations: MutationTable::default(),
            activity: ActivityLog::new(config.recent_kill_window_ms),
            offering: OfferingState::default(),
            current_form: BASE_FORM_ID.to_string(),
            rng: create_rng(config.seed),
            clock: Box::new(SystemClock::new()),
            events: EventBus::new(),
            config,
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_mutations(mut self, mutations: MutationTable) -> Self {
        self.mutations = mutations;
        self
    }

    /// Restrict the genome to a subset of trait types. Resets the run.
    pub fn with_trait_types(mut self, types: impl IntoIterator<Item = DnaType>) -> Self {
        let mut genome = Genome::with_types(types, self.config.initial_stability);
        Self::seed_genome(&mut genome, &self.config);
        self.initial_genome = genome;
        self.reset();
        self
    }

    fn seed_genome(genome: &mut Genome, config: &EngineConfig) {
        for strand in genome.strands_mut() {
            strand.set_stability(config.initial_stability);
        }
        genome.set_mutation_points(config.initial_mutation_points);
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn catalog(&self) -> &EvolutionCatalog {
        &self.catalog
    }

    pub fn mutations(&self) -> &MutationTable {
        &self.mutations
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Id of the most recently committed path, or the base form.
    pub fn current_form(&self) -> &str {
        &self.current_form
    }

    pub fn dna_breakdown(&self) -> BTreeMap<DnaType, f32> {
        self.genome.dna_breakdown()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GenomeEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Recompute the genome's derived fields.
    pub fn recalculate(&mut self) {
        self.genome.recalculate();
    }

    pub fn stats(&self) -> PerformanceStats {
        let now = self.clock.now_ms();
        PerformanceStats {
            total_kills: self.activity.total_kills(),
            kills_last_minute: self.activity.kills_within_window(now),
            survival_time_secs: self.activity.survival_time_secs(now),
            dominant_type: self.genome.dominant_type(),
            purity: self.genome.purity(),
            generation: self.genome.generation(),
            mutation_points: self.genome.mutation_points(),
        }
    }

    /// Restore the state of a fresh run. Listeners stay subscribed.
    pub fn reset(&mut self) {
        self.genome = self.initial_genome.clone();
        self.activity.clear();
        self.offering = OfferingState::default();
        self.current_form = BASE_FORM_ID.to_string();
        self.rng = create_rng(self.config.seed);
        info!("genome engine reset");
    }
}
