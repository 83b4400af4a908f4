//! Shared types and derived-metrics rules for InventoryPro
//!
//! Everything here is a pure function over caller-supplied records: stock
//! status, cashflow aggregation, order pricing, margins and list filtering.
//! The backend (HTTP) and wasm (browser) crates both call into this crate.

pub mod error;
pub mod models;
pub mod search;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use search::*;
pub use types::*;
pub use validation::*;
