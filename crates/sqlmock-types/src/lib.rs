//! Value types shared by the sqlmock crates.
//!
//! [`DriverValue`] is the runtime-typed scalar the mock driver receives as a
//! statement argument and hands back in mock rows.

pub mod value;

pub use value::{DriverValue, ValueFamily, ValueKind};
