//! # Allotment Module
//!
//! Asset allotment lifecycle: allot, update, return, delete, and the
//! current and per-user views joined to the asset master.

pub mod manager;
pub mod model;

pub use manager::{AllotmentManager, ASSET_ALLOTMENT};
pub use model::{Allotment, AllotmentInput, AllotmentStatus, CurrentAllotment, UserAllotment};
