// models/src/lib.rs

// Declare all top-level modules within the 'models' crate
pub mod errors;
pub mod fields;

// Declare the 'medical' sub-module
pub mod medical;

// Re-export common core types for convenience when other crates use 'models::*'
pub use errors::{ValidationError, ValidationResult};
pub use fields::FieldKind;
pub use medical::{Appointment, Person, RecordEntry, Role};
