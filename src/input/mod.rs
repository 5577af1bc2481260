pub mod events;

pub use events::{InputEvent, KeyCode, MapEvent};
