use serde::{Deserialize, Serialize};

/// User-driven change of the selected year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Forward,
    Reverse,
    /// Absolute index from the slider
    Set(usize),
}

/// Index into the attribute sequence; always `index < len`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    index: usize,
    len: usize,
}

impl SelectionState {
    /// Starts at index 0; `None` for an empty sequence
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.len
    }

    pub fn forward(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    pub fn reverse(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }

    /// Out-of-range input is clamped to the last index
    pub fn set(self, index: usize) -> Self {
        if index >= self.len {
            log::debug!("slider index {} clamped to {}", index, self.len - 1);
        }
        Self {
            index: index.min(self.len - 1),
            ..self
        }
    }

    pub fn apply(self, transition: Transition) -> Self {
        match transition {
            Transition::Forward => self.forward(),
            Transition::Reverse => self.reverse(),
            Transition::Set(index) => self.set(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequence_has_no_state() {
        assert!(SelectionState::new(0).is_none());
    }

    #[test]
    fn test_forward_then_reverse_round_trips() {
        for len in 1..=7 {
            let mut state = SelectionState::new(len).unwrap();
            for _ in 0..len {
                assert_eq!(state.forward().reverse(), state);
                assert_eq!(state.reverse().forward(), state);
                state = state.forward();
            }
        }
    }

    #[test]
    fn test_wraparound() {
        let state = SelectionState::new(3).unwrap();
        assert_eq!(state.reverse().index(), 2);
        assert!(state.reverse().is_last());
        assert_eq!(state.set(2).forward().index(), 0);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let start = SelectionState::new(7).unwrap();
        let end = (0..7).fold(start, |s, _| s.apply(Transition::Forward));
        assert_eq!(end, start);
    }

    #[test]
    fn test_set_and_clamp() {
        let state = SelectionState::new(4).unwrap();
        assert_eq!(state.apply(Transition::Set(2)).index(), 2);
        assert_eq!(state.apply(Transition::Set(99)).index(), 3);
    }

    #[test]
    fn test_single_year_stays_put() {
        let state = SelectionState::new(1).unwrap();
        assert_eq!(state.forward(), state);
        assert_eq!(state.reverse(), state);
    }
}
