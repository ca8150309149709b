//! Derive macros shared by the calendar types.
//!
//! Re-exports the `derive_more` derives so modules only need `use crate::prelude::*`.

pub use derive_more::Display;
