pub mod entity;
pub mod error;

pub use entity::{Amenity, Entity, Record, TYPE_TAG_KEY};
pub use error::{HearthError, Result};
