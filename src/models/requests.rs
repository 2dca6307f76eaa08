use crate::models::{
    CardCondition, GeoPoint, SearchQuery, SellerType, SortKey, SortOrder,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the inventory search endpoint
///
/// Multi-valued filters (`condition`, `sellerType`) arrive as comma-separated
/// lists; `to_search_query` parses them into typed sets once, at this
/// boundary, so nothing downstream handles raw strings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchParams {
    #[serde(alias = "card_name", rename = "cardName", default)]
    pub card_name: Option<String>,
    #[serde(alias = "set_name", rename = "setName", default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(alias = "foil_only", rename = "foilOnly", default)]
    pub foil_only: Option<bool>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_price", rename = "minPrice", default)]
    pub min_price: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_price", rename = "maxPrice", default)]
    pub max_price: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "radius_miles", rename = "radiusMiles", default)]
    pub radius_miles: Option<f64>,
    #[serde(alias = "seller_type", rename = "sellerType", default)]
    pub seller_type: Option<String>,
    #[serde(alias = "sort_by", rename = "sortBy", default)]
    pub sort_by: Option<String>,
    #[serde(alias = "sort_order", rename = "sortOrder", default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl SearchParams {
    /// Convert validated wire parameters into the typed engine query
    ///
    /// Rejects unknown enum tokens, a lone latitude or longitude, and a
    /// distance sort without a reference point. Negative limit/offset clamp
    /// to 0 and limit is capped at `max_limit`.
    pub fn to_search_query(&self, max_limit: usize) -> Result<SearchQuery, String> {
        let conditions = self
            .condition
            .as_deref()
            .map(parse_list::<CardCondition>)
            .transpose()?;
        let seller_types = self
            .seller_type
            .as_deref()
            .map(parse_list::<SellerType>)
            .transpose()?;

        let origin = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint::new(latitude, longitude)),
            (None, None) => None,
            _ => return Err("latitude and longitude must be supplied together".to_string()),
        };

        let sort_by = self
            .sort_by
            .as_deref()
            .map(str::parse::<SortKey>)
            .transpose()?
            .unwrap_or_default();
        let sort_order = self
            .sort_order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        if sort_by == SortKey::Distance && origin.is_none() {
            return Err("sortBy=distance requires latitude and longitude".to_string());
        }

        let limit = self
            .limit
            .map(|l| usize::try_from(l.max(0)).unwrap_or(0).min(max_limit));
        let offset = usize::try_from(self.offset.unwrap_or(0).max(0)).unwrap_or(0);

        Ok(SearchQuery {
            card_name: self.card_name.clone().filter(|s| !s.is_empty()),
            set_name: self.set_name.clone().filter(|s| !s.is_empty()),
            conditions,
            foil_only: self.foil_only.unwrap_or(false),
            min_price: self.min_price,
            max_price: self.max_price,
            seller_types,
            origin,
            radius_miles: self.radius_miles,
            sort_by,
            sort_order,
            limit,
            offset,
        })
    }
}

fn parse_list<T: std::str::FromStr<Err = String>>(raw: &str) -> Result<Vec<T>, String> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse::<T>)
        .collect()
}

/// Query parameters for the nearby-sellers endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbySellersParams {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "radius_miles", rename = "radiusMiles", default)]
    pub radius_miles: Option<f64>,
    #[serde(rename = "type", default)]
    pub seller_type: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Query parameters for the inventory list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInventoryParams {
    #[serde(alias = "seller_id", rename = "sellerId", default)]
    pub seller_id: Option<uuid::Uuid>,
    #[serde(alias = "card_name", rename = "cardName", default)]
    pub card_name: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Body for creating an inventory item
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInventoryRequest {
    #[serde(alias = "card_id", rename = "cardId")]
    pub card_id: uuid::Uuid,
    #[serde(alias = "seller_id", rename = "sellerId")]
    pub seller_id: uuid::Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub condition: CardCondition,
    #[serde(default)]
    pub foil: bool,
}

/// Body for updating an inventory item; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub condition: Option<CardCondition>,
    #[serde(default)]
    pub foil: Option<bool>,
}

impl UpdateInventoryRequest {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none()
            && self.price.is_none()
            && self.condition.is_none()
            && self.foil.is_none()
    }
}

/// Query parameters for the sellers list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSellersParams {
    #[serde(rename = "type", default)]
    pub seller_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Body for registering a seller
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSellerRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub seller_type: SellerType,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(alias = "pickup_hours", rename = "pickupHours", default)]
    pub pickup_hours: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(alias = "zip_code", rename = "zipCode", default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Body for updating a seller; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSellerRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub seller_type: Option<SellerType>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(alias = "pickup_hours", rename = "pickupHours", default)]
    pub pickup_hours: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(alias = "zip_code", rename = "zipCode", default)]
    pub zip_code: Option<String>,
}
