//! HTTP request handlers.

pub mod export;
pub mod photos;
pub mod products;
pub mod stats;
