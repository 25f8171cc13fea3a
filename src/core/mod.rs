pub mod codec;
pub mod csv_storage;
pub mod memory_storage;
pub mod rota;

pub use crate::domain::model::{Apprentice, Employee, FridayLunch, Guest, Restaurant};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
