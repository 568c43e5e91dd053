//! Entity metadata registry.
//!
//! Every table column, form widget and sort option in the panel is derived
//! from the [`FieldDescriptor`] lists defined here. Adding an entity means
//! adding one [`EntitySchema`] to the registry; no other code changes.

mod registry;
mod types;

pub use registry::{entity_names, fields_for, schema_for, ENTITIES};
pub use types::{DataType, EntitySchema, FieldDescriptor, NumberBounds, ID_KEY};
