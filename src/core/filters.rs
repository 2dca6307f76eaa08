use crate::models::{ListingRow, SearchQuery};

/// Check whether a row is sellable at all
///
/// Out-of-stock offers are never returned regardless of other filters. The
/// storage layer already restricts candidate fetches to in-stock rows, but
/// the engine does not assume it.
#[inline]
pub fn is_eligible(row: &ListingRow) -> bool {
    row.quantity > 0
}

/// Check a row against every attribute filter the query supplies
///
/// Filters that are absent from the query always pass; supplied filters are
/// ANDed. Price bounds are inclusive on both ends.
#[inline]
pub fn matches_filters(row: &ListingRow, query: &SearchQuery) -> bool {
    if let Some(card_name) = &query.card_name {
        if !contains_ignore_case(&row.card_name, card_name) {
            return false;
        }
    }

    if let Some(set_name) = &query.set_name {
        if !contains_ignore_case(&row.set_name, set_name) {
            return false;
        }
    }

    if let Some(conditions) = &query.conditions {
        if !conditions.contains(&row.condition) {
            return false;
        }
    }

    if query.foil_only && !row.foil {
        return false;
    }

    if let Some(min_price) = query.min_price {
        if row.price < min_price {
            return false;
        }
    }

    if let Some(max_price) = query.max_price {
        if row.price > max_price {
            return false;
        }
    }

    if let Some(seller_types) = &query.seller_types {
        if !seller_types.contains(&row.seller_type) {
            return false;
        }
    }

    true
}

#[inline]
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
