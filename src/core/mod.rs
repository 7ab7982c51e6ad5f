pub mod classifier;
pub mod handler;
pub mod loader;

pub use crate::domain::model::{CatalogDocument, ClassifiedItem, Flag, Item, RestrictedRequest};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
