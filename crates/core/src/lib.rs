//! Domain logic for the stockroom inventory service.
//!
//! Everything in this crate is pure: no I/O, no database handles. The
//! persistence layer (`stockroom-db`) and the HTTP layer (`stockroom-api`)
//! build on these types and rules.

pub mod error;
pub mod export;
pub mod facets;
pub mod naming;
pub mod reorder;
pub mod roles;
pub mod status;
pub mod types;
