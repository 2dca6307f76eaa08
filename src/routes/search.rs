use crate::models::{GeoPoint, NearbySellersParams, NearbySellersResponse, SearchParams};
use crate::routes::{bad_request, storage_error, AppState};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure all search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search_inventory))
        .route("/search/sellers", web::get().to(nearby_sellers));
}

/// Inventory search endpoint
///
/// GET /api/v1/search
///
/// Filters the in-stock card/seller join by the supplied attributes, ranks
/// by price, distance or condition, and returns one page plus the total
/// match count. Geographic filtering only applies when `latitude` and
/// `longitude` are both present.
async fn search_inventory(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    if let Err(errors) = params.validate() {
        tracing::info!("Validation failed for search request: {}", errors);
        return bad_request(errors.to_string());
    }

    let query = match params.to_search_query(state.search.max_limit) {
        Ok(query) => query,
        Err(message) => {
            tracing::info!("Rejected search request: {}", message);
            return bad_request(message);
        }
    };

    let candidates = match state.postgres.fetch_search_candidates(&query).await {
        Ok(candidates) => candidates,
        Err(e) => return storage_error("Failed to fetch search candidates", &e),
    };

    let candidate_count = candidates.len();
    let result = state.engine.search(candidates, &query);

    tracing::info!(
        "Search returned {} of {} matches (from {} candidates)",
        result.items.len(),
        result.total,
        candidate_count
    );

    HttpResponse::Ok().json(result)
}

/// Nearby sellers endpoint
///
/// GET /api/v1/search/sellers?latitude=..&longitude=..
///
/// Returns sellers within the radius of the reference point, nearest first.
/// Latitude and longitude are required here, unlike the inventory search.
async fn nearby_sellers(
    state: web::Data<AppState>,
    params: web::Query<NearbySellersParams>,
) -> impl Responder {
    if let Err(errors) = params.validate() {
        return bad_request(errors.to_string());
    }

    let origin = match (params.latitude, params.longitude) {
        (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude),
        _ => return bad_request("latitude and longitude are required"),
    };

    let seller_type = match params.seller_type.as_deref().map(str::parse) {
        Some(Ok(seller_type)) => Some(seller_type),
        Some(Err(message)) => return bad_request(message),
        None => None,
    };

    let sellers = match state.postgres.fetch_sellers(seller_type).await {
        Ok(sellers) => sellers,
        Err(e) => return storage_error("Failed to fetch sellers", &e),
    };

    let limit = params
        .limit
        .map_or(state.search.default_limit, |l| {
            usize::try_from(l.max(0)).unwrap_or(0).min(state.search.max_limit)
        });

    let items = state
        .engine
        .nearby_sellers(sellers, origin, params.radius_miles, limit);

    tracing::debug!("Nearby-seller search returned {} sellers", items.len());

    HttpResponse::Ok().json(NearbySellersResponse {
        total: items.len(),
        items,
    })
}
