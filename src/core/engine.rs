use crate::core::{
    distance::distance_miles,
    filters::{is_eligible, matches_filters},
};
use crate::models::{GeoPoint, ListingRow, SearchQuery, SearchResult, Seller, SortKey, SortOrder};
use std::cmp::Ordering;

/// Fallback values applied when a query leaves them unset
#[derive(Debug, Clone, Copy)]
pub struct SearchDefaults {
    pub radius_miles: f64,
    pub page_size: usize,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            radius_miles: 25.0,
            page_size: 50,
        }
    }
}

/// Search ranking engine - filters, ranks and paginates candidate listings
///
/// # Pipeline Stages
/// 1. Eligibility (in-stock only)
/// 2. Attribute filters (ANDed)
/// 3. Distance attachment + radius filter, when a reference point is given
/// 4. Stable sort by the requested key
/// 5. Count and paginate
///
/// The engine is a total function over its inputs: contradictory filters
/// yield an empty result, never an error, and it performs no I/O.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    defaults: SearchDefaults,
}

impl SearchEngine {
    pub fn new(defaults: SearchDefaults) -> Self {
        Self { defaults }
    }

    pub fn with_defaults() -> Self {
        Self {
            defaults: SearchDefaults::default(),
        }
    }

    /// Run the full search pipeline over a candidate set
    ///
    /// # Arguments
    /// * `candidates` - Joined card/inventory/seller rows from storage
    /// * `query` - Filter, sort and pagination descriptor
    ///
    /// # Returns
    /// The requested page plus the pre-pagination match count. Every item
    /// carries a distance exactly when `query.origin` was supplied.
    pub fn search(&self, candidates: Vec<ListingRow>, query: &SearchQuery) -> SearchResult {
        // Stages 1 + 2: eligibility and attribute filtering
        let mut rows: Vec<ListingRow> = candidates
            .into_iter()
            .filter(is_eligible)
            .filter(|row| matches_filters(row, query))
            .collect();

        // Stage 3: attach distances and drop rows outside the radius.
        // Skipped entirely without a reference point; no row carries a
        // distance in that case.
        if let Some(origin) = query.origin {
            let radius = query.radius_miles.unwrap_or(self.defaults.radius_miles);
            rows = rows
                .into_iter()
                .map(|mut row| {
                    row.distance_miles = Some(distance_miles(&origin, &row.location));
                    row
                })
                .filter(|row| row.distance_miles.is_some_and(|d| d <= radius))
                .collect();
        }

        // Stage 4: stable sort. Reversing the comparator rather than the
        // sorted sequence keeps ties in input order for both directions,
        // which keeps pagination deterministic across identical calls.
        rows.sort_by(|a, b| {
            let ordering = compare_by_key(a, b, query.sort_by);
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        // Stage 5: count, then clip the page to the available range
        let total = rows.len();
        let limit = query.limit.unwrap_or(self.defaults.page_size);
        let items: Vec<ListingRow> = rows.into_iter().skip(query.offset).take(limit).collect();
        let has_more = query.offset + items.len() < total;

        SearchResult {
            items,
            total,
            has_more,
        }
    }

    /// Rank sellers by distance from a reference point
    ///
    /// Attaches a distance to every seller, drops those outside the radius
    /// (inclusive bound), sorts nearest first and truncates to `limit`.
    pub fn nearby_sellers(
        &self,
        sellers: Vec<Seller>,
        origin: GeoPoint,
        radius_miles: Option<f64>,
        limit: usize,
    ) -> Vec<Seller> {
        let radius = radius_miles.unwrap_or(self.defaults.radius_miles);

        let mut ranked: Vec<Seller> = sellers
            .into_iter()
            .map(|mut seller| {
                seller.distance_miles = Some(distance_miles(&origin, &seller.location));
                seller
            })
            .filter(|seller| seller.distance_miles.is_some_and(|d| d <= radius))
            .collect();

        ranked.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(limit);
        ranked
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Compare two rows under a sort key, ascending
///
/// Distance comparisons treat rows without an attached distance as equal, so
/// a distance sort requested without a reference point degrades to input
/// order instead of failing. The HTTP layer rejects that combination before
/// it reaches the engine.
fn compare_by_key(a: &ListingRow, b: &ListingRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        SortKey::Condition => a.condition.cmp(&b.condition),
        SortKey::Distance => match (a.distance_miles, b.distance_miles) {
            (Some(da), Some(db)) => da.partial_cmp(&db).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}
