use crate::habits::build_snapshot;
use crate::history::HistoryStore;
use crate::models::{GateState, HABIT_COUNT, HabitSnapshot, HistoryRecord, TarotCard};
use crate::tarot_gate::{self, excerpt};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("tarot is locked at {0}% completion")]
    Locked(u8),
}

/// Everything one user session owns. All mutation goes through the named methods.
#[derive(Debug, Clone)]
pub struct SessionContext {
    history: HistoryStore,
    snapshot: HabitSnapshot,
    gate: GateState,
    tarot: Option<TarotCard>,
    model_api_key: String,
    weather_api_key: String,
}

impl SessionContext {
    pub fn new() -> Self {
        let mut history = HistoryStore::default();
        history.seed();
        Self::with_history(history, build_snapshot([false; HABIT_COUNT], 5))
    }

    pub fn with_history(history: HistoryStore, snapshot: HabitSnapshot) -> Self {
        let gate = tarot_gate::gate_state(snapshot.completion_rate);
        Self {
            history,
            snapshot,
            gate,
            tarot: None,
            model_api_key: String::new(),
            weather_api_key: String::new(),
        }
    }

    pub fn snapshot(&self) -> &HabitSnapshot {
        &self.snapshot
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub fn tarot(&self) -> Option<&TarotCard> {
        self.tarot.as_ref()
    }

    pub fn tarot_excerpt(&self) -> Option<String> {
        self.tarot.as_ref().and_then(excerpt)
    }

    pub fn chart(&self) -> Vec<HistoryRecord> {
        self.history.append_today(&self.snapshot)
    }

    /// Replaces today's snapshot and re-evaluates the gate against it.
    pub fn apply_snapshot(&mut self, snapshot: HabitSnapshot) -> GateState {
        let (gate, tarot) = tarot_gate::evaluate(snapshot.completion_rate, self.tarot.take());
        if gate != self.gate {
            info!(rate = snapshot.completion_rate, ?gate, "tarot gate changed");
        }
        self.snapshot = snapshot;
        self.gate = gate;
        self.tarot = tarot;
        gate
    }

    pub fn ensure_unlocked(&self) -> Result<(), DrawError> {
        match self.gate {
            GateState::Unlocked => Ok(()),
            GateState::Locked => Err(DrawError::Locked(self.snapshot.completion_rate)),
        }
    }

    /// Overwrites the card slot. Only allowed while the gate is unlocked.
    pub fn store_draw(&mut self, card: TarotCard) -> Result<&TarotCard, DrawError> {
        self.ensure_unlocked()?;
        info!(card = %card.name, "tarot card drawn");
        Ok(self.tarot.insert(card))
    }

    pub fn clear_tarot(&mut self) {
        self.tarot = None;
    }

    pub fn set_model_api_key(&mut self, key: &str) {
        self.model_api_key = key.trim().to_string();
    }

    pub fn set_weather_api_key(&mut self, key: &str) {
        self.weather_api_key = key.trim().to_string();
    }

    pub fn model_api_key(&self) -> &str {
        &self.model_api_key
    }

    pub fn weather_api_key(&self) -> &str {
        &self.weather_api_key
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
