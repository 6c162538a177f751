use tracing::debug;

use crate::domain::{DomainError, Turn};

/// Default bound on the number of turns sent per request, instruction included.
pub const DEFAULT_MAX_TURNS: usize = 30;

/// A validated, non-zero bound on conversation length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryLimit(usize);

impl HistoryLimit {
    pub fn new(max_turns: usize) -> Result<Self, DomainError> {
        if max_turns == 0 {
            return Err(DomainError::configuration(
                "history limit must allow at least one turn",
            ));
        }
        Ok(Self(max_turns))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        Self(DEFAULT_MAX_TURNS)
    }
}

/// Repair and bound `turns` so the result starts with exactly one canonical
/// instruction and holds at most `max_turns` turns.
///
/// Fails only when `max_turns` is zero.
pub fn normalize(turns: &[Turn], max_turns: usize) -> Result<Vec<Turn>, DomainError> {
    Ok(normalize_within(turns, HistoryLimit::new(max_turns)?))
}

/// Infallible form of [`normalize`] for an already-validated limit.
///
/// Only position 0 is inspected: a leading instruction is replaced by the
/// canonical one, anything else gets the canonical instruction prepended. When
/// over the limit, the oldest turns after the instruction are dropped.
pub fn normalize_within(turns: &[Turn], limit: HistoryLimit) -> Vec<Turn> {
    let rest = match turns.first() {
        Some(first) if first.is_instruction() => &turns[1..],
        _ => turns,
    };

    let keep = limit.get() - 1;
    let start = rest.len().saturating_sub(keep);
    if start > 0 {
        debug!(
            "Dropping {} oldest turns to fit history limit of {}",
            start,
            limit.get()
        );
    }

    let mut normalized = Vec::with_capacity(1 + rest.len() - start);
    normalized.push(Turn::canonical_instruction());
    normalized.extend_from_slice(&rest[start..]);
    normalized
}
