use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Card grading scale, declared best to worst.
///
/// The declaration order is the severity order: `Mint` compares less than
/// `Poor`, so an ascending condition sort lists the best copies first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "card_condition", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardCondition {
    Mint,
    NearMint,
    Excellent,
    Good,
    LightPlayed,
    Played,
    Poor,
}

impl FromStr for CardCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MINT" => Ok(CardCondition::Mint),
            "NEAR_MINT" => Ok(CardCondition::NearMint),
            "EXCELLENT" => Ok(CardCondition::Excellent),
            "GOOD" => Ok(CardCondition::Good),
            "LIGHT_PLAYED" => Ok(CardCondition::LightPlayed),
            "PLAYED" => Ok(CardCondition::Played),
            "POOR" => Ok(CardCondition::Poor),
            other => Err(format!("unknown card condition: {}", other)),
        }
    }
}

/// Who is offering the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "seller_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SellerType {
    Store,
    Individual,
}

impl FromStr for SellerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STORE" => Ok(SellerType::Store),
            "INDIVIDUAL" => Ok(SellerType::Individual),
            other => Err(format!("unknown seller type: {}", other)),
        }
    }
}

/// Key a search result set is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Distance,
    Condition,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "distance" => Ok(SortKey::Distance),
            "condition" => Ok(SortKey::Condition),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// One sellable inventory offer, joined with its card and seller attributes.
///
/// Rows are read-only inputs to the search engine; the only field the engine
/// writes is `distance_miles`, attached when the query carried a reference
/// point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRow {
    pub id: Uuid,
    #[serde(rename = "cardId")]
    pub card_id: Uuid,
    #[serde(rename = "sellerId")]
    pub seller_id: Uuid,
    #[serde(rename = "cardName")]
    pub card_name: String,
    #[serde(rename = "setName")]
    pub set_name: String,
    #[serde(rename = "setCode")]
    pub set_code: String,
    pub rarity: String,
    pub condition: CardCondition,
    pub foil: bool,
    pub price: f64,
    pub quantity: i32,
    #[serde(rename = "sellerName")]
    pub seller_name: String,
    #[serde(rename = "sellerType")]
    pub seller_type: SellerType,
    pub location: GeoPoint,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "distanceMiles", default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// A registered seller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub seller_type: SellerType,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "pickupHours", default)]
    pub pickup_hours: Option<String>,
    pub rating: f64,
    pub location: GeoPoint,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "zipCode", default)]
    pub zip_code: Option<String>,
    pub country: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "distanceMiles", default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// Filter and ranking descriptor for an inventory search.
///
/// Every filter is optional; supplied filters are ANDed. `radius_miles`,
/// `limit` and `offset` fall back to the engine defaults when absent.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub card_name: Option<String>,
    pub set_name: Option<String>,
    pub conditions: Option<Vec<CardCondition>>,
    pub foil_only: bool,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub seller_types: Option<Vec<SellerType>>,
    pub origin: Option<GeoPoint>,
    pub radius_miles: Option<f64>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
    pub offset: usize,
}

/// One page of search results.
///
/// `total` counts every row that survived filtering, before pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<ListingRow>,
    pub total: usize,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}
