//! Domain models for InventoryPro

mod cashflow;
mod directory;
mod inventory;
mod order;
mod sales;
mod warehouse;

pub use cashflow::*;
pub use directory::*;
pub use inventory::*;
pub use order::*;
pub use sales::*;
pub use warehouse::*;
