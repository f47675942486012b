//! Pure domain logic for the wornby platform.
//!
//! Everything here is synchronous and I/O-free: the product-tag overlay
//! engine, shared id/time types, role resolution, and the domain error enum.
//! Persistence lives in `wornby-db`, HTTP in `wornby-api`.

pub mod error;
pub mod overlay;
pub mod roles;
pub mod tag;
pub mod types;
