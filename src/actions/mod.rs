pub mod catalog;

pub use catalog::{ActionCatalog, ActionEffect};
