pub mod radius;

pub use radius::{RadiusError, RadiusScale};
