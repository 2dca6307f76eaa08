// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CardCondition, GeoPoint, ListingRow, SearchQuery, SearchResult, Seller, SellerType, SortKey,
    SortOrder,
};
pub use requests::{
    CreateInventoryRequest, CreateSellerRequest, ListInventoryParams, ListSellersParams,
    NearbySellersParams, SearchParams, UpdateInventoryRequest, UpdateSellerRequest,
};
pub use responses::{
    CreatedResponse, ErrorResponse, HealthResponse, MessageResponse, NearbySellersResponse,
};
