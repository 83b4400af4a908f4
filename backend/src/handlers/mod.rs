//! HTTP handlers for the metrics API

pub mod cashflow;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod sales;
pub mod transfers;

pub use cashflow::*;
pub use health::*;
pub use inventory::*;
pub use orders::*;
pub use sales::*;
pub use transfers::*;
