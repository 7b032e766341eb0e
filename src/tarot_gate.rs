use crate::models::{GateState, TarotCard};

pub const UNLOCK_THRESHOLD: u8 = 60;
const EXCERPT_CHARS: usize = 120;

pub fn gate_state(completion_rate: u8) -> GateState {
    if completion_rate >= UNLOCK_THRESHOLD {
        GateState::Unlocked
    } else {
        GateState::Locked
    }
}

/// Recomputes the gate for a new snapshot. A locked gate always empties the card slot;
/// an unlocked gate keeps whatever was drawn.
pub fn evaluate(completion_rate: u8, slot: Option<TarotCard>) -> (GateState, Option<TarotCard>) {
    match gate_state(completion_rate) {
        GateState::Unlocked => (GateState::Unlocked, slot),
        GateState::Locked => (GateState::Locked, None),
    }
}

/// Display excerpt of a card description, cut on a char boundary.
pub fn excerpt(card: &TarotCard) -> Option<String> {
    let description = card.description.trim();
    if description.is_empty() {
        return None;
    }
    if description.chars().count() <= EXCERPT_CHARS {
        return Some(description.to_string());
    }
    let cut: String = description.chars().take(EXCERPT_CHARS).collect();
    Some(format!("{}...", cut.trim_end()))
}
