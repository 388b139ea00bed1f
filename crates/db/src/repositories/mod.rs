//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Every multi-statement sequence
//! that must hold the single-front/dense-order invariants runs inside one
//! transaction.

pub mod photo_repo;
pub mod product_repo;
pub mod stats_repo;

pub use photo_repo::PhotoRepo;
pub use product_repo::ProductRepo;
pub use stats_repo::StatsRepo;
