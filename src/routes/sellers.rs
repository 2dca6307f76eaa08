use crate::models::{
    CreateSellerRequest, CreatedResponse, ListSellersParams, MessageResponse, SellerType,
    UpdateSellerRequest,
};
use crate::routes::{bad_request, storage_error, AppState};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Configure all seller routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/sellers", web::get().to(list_sellers))
        .route("/sellers", web::post().to(create_seller))
        .route("/sellers/{id}", web::get().to(get_seller))
        .route("/sellers/{id}", web::put().to(update_seller))
        .route("/sellers/{id}", web::delete().to(delete_seller));
}

/// List sellers, newest first
///
/// GET /api/v1/sellers?type=..&city=..&state=..
async fn list_sellers(
    state: web::Data<AppState>,
    params: web::Query<ListSellersParams>,
) -> impl Responder {
    let seller_type = match params.seller_type.as_deref().map(str::parse::<SellerType>) {
        Some(Ok(seller_type)) => Some(seller_type),
        Some(Err(message)) => return bad_request(message),
        None => None,
    };

    match state
        .postgres
        .list_sellers(&params, seller_type, state.search.default_limit)
        .await
    {
        Ok(sellers) => HttpResponse::Ok().json(sellers),
        Err(e) => storage_error("Failed to fetch sellers", &e),
    }
}

/// Fetch a single seller
async fn get_seller(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.postgres.get_seller(path.into_inner()).await {
        Ok(seller) => HttpResponse::Ok().json(seller),
        Err(e) => storage_error("Failed to fetch seller", &e),
    }
}

/// Register a seller
///
/// POST /api/v1/sellers
async fn create_seller(
    state: web::Data<AppState>,
    req: web::Json<CreateSellerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    match state.postgres.create_seller(&req).await {
        Ok(id) => {
            tracing::info!("Registered seller {} ({})", id, req.name);
            HttpResponse::Created().json(CreatedResponse { id })
        }
        Err(e) => storage_error("Failed to register seller", &e),
    }
}

/// Update a seller; absent fields are left unchanged
async fn update_seller(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSellerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    match state.postgres.update_seller(path.into_inner(), &req).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "seller updated".to_string(),
        }),
        Err(e) => storage_error("Failed to update seller", &e),
    }
}

/// Delete a seller
async fn delete_seller(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.postgres.delete_seller(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "seller deleted".to_string(),
        }),
        Err(e) => storage_error("Failed to delete seller", &e),
    }
}
