use crate::models::{
    CreateInventoryRequest, CreatedResponse, ListInventoryParams, MessageResponse,
    UpdateInventoryRequest,
};
use crate::routes::{bad_request, storage_error, AppState};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Configure all inventory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/inventory", web::get().to(list_inventory))
        .route("/inventory", web::post().to(create_inventory))
        .route("/inventory/{id}", web::get().to(get_inventory))
        .route("/inventory/{id}", web::put().to(update_inventory))
        .route("/inventory/{id}", web::delete().to(delete_inventory));
}

/// List inventory items, newest first
///
/// GET /api/v1/inventory?sellerId=..&cardName=..
async fn list_inventory(
    state: web::Data<AppState>,
    params: web::Query<ListInventoryParams>,
) -> impl Responder {
    match state
        .postgres
        .list_inventory(&params, state.search.default_limit)
        .await
    {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => storage_error("Failed to fetch inventory", &e),
    }
}

/// Fetch a single inventory item
async fn get_inventory(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.postgres.get_inventory(path.into_inner()).await {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(e) => storage_error("Failed to fetch inventory item", &e),
    }
}

/// Create an inventory item
///
/// POST /api/v1/inventory
async fn create_inventory(
    state: web::Data<AppState>,
    req: web::Json<CreateInventoryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    match state.postgres.create_inventory(&req).await {
        Ok(id) => {
            tracing::info!("Created inventory item {} for seller {}", id, req.seller_id);
            HttpResponse::Created().json(CreatedResponse { id })
        }
        Err(e) => storage_error("Failed to create inventory item", &e),
    }
}

/// Update an inventory item; absent fields are left unchanged
async fn update_inventory(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateInventoryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request(errors.to_string());
    }

    match state.postgres.update_inventory(path.into_inner(), &req).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "inventory item updated".to_string(),
        }),
        Err(e) => storage_error("Failed to update inventory item", &e),
    }
}

/// Delete an inventory item
async fn delete_inventory(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    match state.postgres.delete_inventory(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "inventory item deleted".to_string(),
        }),
        Err(e) => storage_error("Failed to delete inventory item", &e),
    }
}
