//! Pricing core - pure calculation logic, no I/O
//!
//! Everything in here is deterministic and side-effect free so it can
//! be unit tested without a database or HTTP harness.

pub mod engine;
pub mod region;

pub use engine::{compute, JobInput, LineItem, QuoteInput, QuoteTotals, TAX_RATE};
pub use region::{adjusted_price, multiplier_for};
