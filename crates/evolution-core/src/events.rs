use crate::catalog::{EvolutionBonuses, EvolutionPath};
use crate::dna::DnaType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Notifications emitted by the engine for UI and AI consumers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenomeEvent {
    /// Paths that became legal and were not offered before in this era.
    EvolutionAvailable {
        paths: Vec<EvolutionPath>,
        current_dna: BTreeMap<DnaType, f32>,
    },
    EvolutionComplete {
        from: String,
        to: String,
        generation: u32,
        bonuses: EvolutionBonuses,
    },
    MutationApplied {
        mutation_id: String,
        target_type: Option<DnaType>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GenomeEvent) + Send>;

/// Synchronous observer list. Every listener runs to completion inside
/// [`EventBus::emit`], in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&GenomeEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &GenomeEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.len())
            .finish()
    }
}
