//! Year sequence: selection state and the transition planner
pub mod controller;
pub mod state;

pub use controller::{plan, SequenceController, ViewUpdate};
pub use state::{SelectionState, Transition};
