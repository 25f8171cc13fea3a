// Domain layer: entities and the storage port. No I/O here.

pub mod model;
pub mod ports;

pub use model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
pub use ports::Storage;
