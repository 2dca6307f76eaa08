//! cardseek - Geo-ranked inventory search for a local trading-card marketplace
//!
//! This library provides the search engine behind the cardseek marketplace:
//! a pure filtering/ranking/pagination pipeline over candidate listings,
//! plus the haversine distance calculation it depends on.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::distance_miles, SearchDefaults, SearchEngine};
pub use crate::models::{
    CardCondition, GeoPoint, ListingRow, SearchQuery, SearchResult, Seller, SellerType, SortKey,
    SortOrder,
};
