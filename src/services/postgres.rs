use crate::models::{
    CreateInventoryRequest, CreateSellerRequest, GeoPoint, ListInventoryParams, ListSellersParams,
    ListingRow, SearchQuery, Seller, SellerType, UpdateInventoryRequest, UpdateSellerRequest,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

const LISTING_SELECT: &str = r#"
    SELECT
        i.id,
        i.card_id,
        i.seller_id,
        c.name AS card_name,
        c.set_name,
        c.set_code,
        c.rarity,
        i.condition,
        i.foil,
        i.price,
        i.quantity,
        s.name AS seller_name,
        s.type AS seller_type,
        s.latitude,
        s.longitude,
        s.city,
        s.state
    FROM inventory i
    JOIN cards c ON i.card_id = c.id
    JOIN sellers s ON i.seller_id = s.id
"#;

const SELLER_SELECT: &str = r#"
    SELECT
        id, name, type, email, phone, website, pickup_hours, rating,
        latitude, longitude, address, city, state, zip_code, country, created_at
    FROM sellers
"#;

/// PostgreSQL client for the marketplace store
///
/// The only I/O boundary in the service: candidate fetches for search,
/// inventory and seller CRUD. Search candidate queries push the
/// non-geographic predicates down to SQL as an optimization; the search
/// engine re-applies every filter, so correctness never depends on the
/// pushdown.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch candidate rows for an inventory search
    ///
    /// Restricts to in-stock rows and pushes the attribute filters down to
    /// SQL. Geographic filtering is never pushed down, distance is not
    /// expressible as a column predicate here.
    pub async fn fetch_search_candidates(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<ListingRow>, PostgresError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(LISTING_SELECT);
        builder.push(" WHERE i.quantity > 0");

        if let Some(card_name) = &query.card_name {
            builder
                .push(" AND c.name ILIKE ")
                .push_bind(format!("%{}%", card_name));
        }
        if let Some(set_name) = &query.set_name {
            builder
                .push(" AND c.set_name ILIKE ")
                .push_bind(format!("%{}%", set_name));
        }
        if let Some(conditions) = &query.conditions {
            builder
                .push(" AND i.condition = ANY(")
                .push_bind(conditions.clone())
                .push(")");
        }
        if query.foil_only {
            builder.push(" AND i.foil = TRUE");
        }
        if let Some(min_price) = query.min_price {
            builder.push(" AND i.price >= ").push_bind(min_price);
        }
        if let Some(max_price) = query.max_price {
            builder.push(" AND i.price <= ").push_bind(max_price);
        }
        if let Some(seller_types) = &query.seller_types {
            builder
                .push(" AND s.type = ANY(")
                .push_bind(seller_types.clone())
                .push(")");
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        let listings = rows.iter().map(listing_from_row).collect::<Vec<_>>();

        tracing::debug!("Fetched {} search candidates", listings.len());

        Ok(listings)
    }

    /// List inventory, newest first, with optional seller/card-name filters
    pub async fn list_inventory(
        &self,
        params: &ListInventoryParams,
        default_limit: usize,
    ) -> Result<Vec<ListingRow>, PostgresError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(LISTING_SELECT);
        builder.push(" WHERE 1=1");

        if let Some(seller_id) = params.seller_id {
            builder.push(" AND i.seller_id = ").push_bind(seller_id);
        }
        if let Some(card_name) = &params.card_name {
            builder
                .push(" AND c.name ILIKE ")
                .push_bind(format!("%{}%", card_name));
        }

        let limit = params.limit.unwrap_or(default_limit as i64).max(0);
        let offset = params.offset.unwrap_or(0).max(0);
        builder.push(" ORDER BY i.created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder.build().fetch_all(&self.pool).await?;

        Ok(rows.iter().map(listing_from_row).collect())
    }

    /// Fetch a single inventory item by id
    pub async fn get_inventory(&self, id: Uuid) -> Result<ListingRow, PostgresError> {
        let query = format!("{} WHERE i.id = $1", LISTING_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(listing_from_row)
            .ok_or_else(|| PostgresError::NotFound(format!("inventory item {}", id)))
    }

    /// Insert a new inventory item and return its id
    pub async fn create_inventory(
        &self,
        req: &CreateInventoryRequest,
    ) -> Result<Uuid, PostgresError> {
        let id = Uuid::new_v4();
        let query = r#"
            INSERT INTO inventory (id, card_id, seller_id, quantity, price, condition, foil)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(req.card_id)
            .bind(req.seller_id)
            .bind(req.quantity)
            .bind(req.price)
            .bind(req.condition)
            .bind(req.foil)
            .execute(&self.pool)
            .await
            .map_err(reject_missing_references)?;

        tracing::debug!("Created inventory item {} for seller {}", id, req.seller_id);

        Ok(id)
    }

    /// Apply a partial update to an inventory item
    pub async fn update_inventory(
        &self,
        id: Uuid,
        req: &UpdateInventoryRequest,
    ) -> Result<(), PostgresError> {
        if req.is_empty() {
            return Err(PostgresError::InvalidInput("no fields to update".to_string()));
        }

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE inventory SET ");
        let mut fields = builder.separated(", ");

        if let Some(quantity) = req.quantity {
            fields.push("quantity = ").push_bind_unseparated(quantity);
        }
        if let Some(price) = req.price {
            fields.push("price = ").push_bind_unseparated(price);
        }
        if let Some(condition) = req.condition {
            fields.push("condition = ").push_bind_unseparated(condition);
        }
        if let Some(foil) = req.foil {
            fields.push("foil = ").push_bind_unseparated(foil);
        }
        fields.push("updated_at = NOW()");

        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("inventory item {}", id)));
        }

        Ok(())
    }

    /// Delete an inventory item
    pub async fn delete_inventory(&self, id: Uuid) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("inventory item {}", id)));
        }

        Ok(())
    }

    /// List sellers, newest first, with optional type/city/state filters
    pub async fn list_sellers(
        &self,
        params: &ListSellersParams,
        seller_type: Option<SellerType>,
        default_limit: usize,
    ) -> Result<Vec<Seller>, PostgresError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELLER_SELECT);
        builder.push(" WHERE 1=1");

        if let Some(seller_type) = seller_type {
            builder.push(" AND type = ").push_bind(seller_type);
        }
        if let Some(city) = &params.city {
            builder
                .push(" AND city ILIKE ")
                .push_bind(format!("%{}%", city));
        }
        if let Some(state) = &params.state {
            builder.push(" AND state = ").push_bind(state.clone());
        }

        let limit = params.limit.unwrap_or(default_limit as i64).max(0);
        let offset = params.offset.unwrap_or(0).max(0);
        builder.push(" ORDER BY created_at DESC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder.build().fetch_all(&self.pool).await?;

        Ok(rows.iter().map(seller_from_row).collect())
    }

    /// Fetch every seller, optionally restricted by type
    ///
    /// Candidate fetch for the nearby-sellers search; distance filtering
    /// happens in the engine.
    pub async fn fetch_sellers(
        &self,
        seller_type: Option<SellerType>,
    ) -> Result<Vec<Seller>, PostgresError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELLER_SELECT);
        if let Some(seller_type) = seller_type {
            builder.push(" WHERE type = ").push_bind(seller_type);
        }

        let rows = builder.build().fetch_all(&self.pool).await?;

        Ok(rows.iter().map(seller_from_row).collect())
    }

    /// Fetch a single seller by id
    pub async fn get_seller(&self, id: Uuid) -> Result<Seller, PostgresError> {
        let query = format!("{} WHERE id = $1", SELLER_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref()
            .map(seller_from_row)
            .ok_or_else(|| PostgresError::NotFound(format!("seller {}", id)))
    }

    /// Register a new seller and return its id
    pub async fn create_seller(&self, req: &CreateSellerRequest) -> Result<Uuid, PostgresError> {
        let id = Uuid::new_v4();
        let query = r#"
            INSERT INTO sellers
                (id, name, type, email, phone, website, pickup_hours,
                 latitude, longitude, address, city, state, zip_code, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(&req.name)
            .bind(req.seller_type)
            .bind(&req.email)
            .bind(&req.phone)
            .bind(&req.website)
            .bind(&req.pickup_hours)
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(&req.address)
            .bind(&req.city)
            .bind(&req.state)
            .bind(&req.zip_code)
            .bind(req.country.as_deref().unwrap_or("US"))
            .execute(&self.pool)
            .await
            .map_err(reject_duplicates)?;

        tracing::debug!("Registered seller {} ({})", id, req.name);

        Ok(id)
    }

    /// Apply a partial update to a seller
    pub async fn update_seller(
        &self,
        id: Uuid,
        req: &UpdateSellerRequest,
    ) -> Result<(), PostgresError> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE sellers SET ");
        let mut fields = builder.separated(", ");
        let mut any = false;

        if let Some(name) = &req.name {
            fields.push("name = ").push_bind_unseparated(name.clone());
            any = true;
        }
        if let Some(seller_type) = req.seller_type {
            fields.push("type = ").push_bind_unseparated(seller_type);
            any = true;
        }
        if let Some(phone) = &req.phone {
            fields.push("phone = ").push_bind_unseparated(phone.clone());
            any = true;
        }
        if let Some(website) = &req.website {
            fields.push("website = ").push_bind_unseparated(website.clone());
            any = true;
        }
        if let Some(pickup_hours) = &req.pickup_hours {
            fields
                .push("pickup_hours = ")
                .push_bind_unseparated(pickup_hours.clone());
            any = true;
        }
        if let Some(latitude) = req.latitude {
            fields.push("latitude = ").push_bind_unseparated(latitude);
            any = true;
        }
        if let Some(longitude) = req.longitude {
            fields.push("longitude = ").push_bind_unseparated(longitude);
            any = true;
        }
        if let Some(address) = &req.address {
            fields.push("address = ").push_bind_unseparated(address.clone());
            any = true;
        }
        if let Some(city) = &req.city {
            fields.push("city = ").push_bind_unseparated(city.clone());
            any = true;
        }
        if let Some(state) = &req.state {
            fields.push("state = ").push_bind_unseparated(state.clone());
            any = true;
        }
        if let Some(zip_code) = &req.zip_code {
            fields.push("zip_code = ").push_bind_unseparated(zip_code.clone());
            any = true;
        }

        if !any {
            return Err(PostgresError::InvalidInput("no fields to update".to_string()));
        }
        fields.push("updated_at = NOW()");

        builder.push(" WHERE id = ").push_bind(id);

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("seller {}", id)));
        }

        Ok(())
    }

    /// Delete a seller
    pub async fn delete_seller(&self, id: Uuid) -> Result<(), PostgresError> {
        let result = sqlx::query("DELETE FROM sellers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PostgresError::NotFound(format!("seller {}", id)));
        }

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn listing_from_row(row: &PgRow) -> ListingRow {
    ListingRow {
        id: row.get("id"),
        card_id: row.get("card_id"),
        seller_id: row.get("seller_id"),
        card_name: row.get("card_name"),
        set_name: row.get("set_name"),
        set_code: row.get("set_code"),
        rarity: row.get("rarity"),
        condition: row.get("condition"),
        foil: row.get("foil"),
        price: row.get("price"),
        quantity: row.get("quantity"),
        seller_name: row.get("seller_name"),
        seller_type: row.get("seller_type"),
        location: GeoPoint::new(row.get("latitude"), row.get("longitude")),
        city: row.get("city"),
        state: row.get("state"),
        distance_miles: None,
    }
}

fn seller_from_row(row: &PgRow) -> Seller {
    Seller {
        id: row.get("id"),
        name: row.get("name"),
        seller_type: row.get("type"),
        email: row.get("email"),
        phone: row.get("phone"),
        website: row.get("website"),
        pickup_hours: row.get("pickup_hours"),
        rating: row.get("rating"),
        location: GeoPoint::new(row.get("latitude"), row.get("longitude")),
        address: row.get("address"),
        city: row.get("city"),
        state: row.get("state"),
        zip_code: row.get("zip_code"),
        country: row.get("country"),
        created_at: row.get("created_at"),
        distance_miles: None,
    }
}

/// Map foreign-key violations on inserts to an input error
fn reject_missing_references(err: sqlx::Error) -> PostgresError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) {
            return PostgresError::InvalidInput("unknown card or seller id".to_string());
        }
    }
    err.into()
}

/// Map unique violations on inserts to an input error
fn reject_duplicates(err: sqlx::Error) -> PostgresError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
            return PostgresError::InvalidInput("seller email already registered".to_string());
        }
    }
    err.into()
}
