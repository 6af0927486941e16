// src/services/builder.rs

//! Search request construction.
//!
//! Maps user-facing `SearchOptions` onto the wire-level
//! `SearchItemsRequest`. The mapping is omission-based: a field that is
//! unset, zero, or equal to its sentinel never appears in the request,
//! leaving the API's implicit default in force. Every field goes through
//! one of the small normalization helpers below so the inclusion rule
//! for each row is auditable on its own.

use crate::error::{AppError, Result};
use crate::models::{
    Condition, Credentials, Merchant, PARTNER_TYPE, SearchItemsRequest, SearchOptions, SortBy,
};

/// Category sentinel meaning "no index selected".
const ALL_INDEXES: &str = "All";

/// Build a `SearchItems` request body from user options and credentials.
///
/// Fails with a validation error when none of the search criteria map to
/// a value, and with a configuration error when no partner tag can be
/// resolved. Both checks run before any remote call is attempted.
pub fn build_search_request(
    options: &SearchOptions,
    credentials: &Credentials,
) -> Result<SearchItemsRequest> {
    let partner_tag = resolve_partner_tag(options, credentials)?;

    let criteria = &options.criteria;
    let filters = &options.filters;

    let request = SearchItemsRequest {
        search_index: non_sentinel(options.search_index.as_deref(), ALL_INDEXES),

        keywords: non_empty(criteria.keywords.as_deref()),
        title: non_empty(criteria.title.as_deref()),
        actor: non_empty(criteria.actor.as_deref()),
        artist: non_empty(criteria.artist.as_deref()),
        author: non_empty(criteria.author.as_deref()),
        brand: non_empty(criteria.brand.as_deref()),
        browse_node_id: non_empty(criteria.browse_node_id.as_deref()),

        // Zero means "not set" for the numeric filters; a genuine zero
        // bound is inexpressible.
        min_price: positive(filters.min_price),
        max_price: positive(filters.max_price),
        min_reviews_rating: positive(filters.min_reviews_rating),
        min_saving_percent: positive(filters.min_saving_percent),

        condition: filters.condition.filter(|c| *c != Condition::Any),
        availability: filters.availability,
        merchant: filters.merchant.filter(|m| *m != Merchant::All),
        delivery_flags: non_empty_vec(&filters.delivery_flags),

        // Values outside [1, 10] are dropped rather than clamped or
        // rejected, so an out-of-range input silently loses the field.
        item_count: options.item_count.filter(in_page_window),
        item_page: options.item_page.filter(in_page_window),

        sort_by: options.sort_by.filter(|s| *s != SortBy::Relevance),
        resources: non_empty_vec(&options.resources),

        offer_count: positive(options.extra.offer_count),
        currency_of_preference: non_empty(options.extra.currency_of_preference.as_deref()),
        languages_of_preference: split_languages(
            options.extra.languages_of_preference.as_deref(),
        ),

        partner_tag,
        partner_type: PARTNER_TYPE.to_string(),
        marketplace: credentials.marketplace.clone(),
    };

    ensure_criterion(&request)?;
    Ok(request)
}

/// Pass a string through only when it is non-empty.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Pass a string through only when it is non-empty and not the sentinel.
fn non_sentinel(value: Option<&str>, sentinel: &str) -> Option<String> {
    non_empty(value).filter(|v| v != sentinel)
}

/// Pass a number through only when it is non-zero.
fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

/// Pass a list through only when it has elements.
fn non_empty_vec<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// The API accepts item counts and page numbers in [1, 10].
fn in_page_window(value: &u8) -> bool {
    (1..=10).contains(value)
}

/// Split a comma-separated language list, trimming surrounding whitespace.
fn split_languages(value: Option<&str>) -> Option<Vec<String>> {
    non_empty(value).map(|v| v.split(',').map(|lang| lang.trim().to_string()).collect())
}

/// Use the per-item override when set, else the credential default.
fn resolve_partner_tag(options: &SearchOptions, credentials: &Credentials) -> Result<String> {
    let tag = options
        .partner_tag
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(&credentials.partner_tag);

    if tag.is_empty() {
        return Err(AppError::config(
            "Partner tag is required but was not provided in the request or the credentials",
        ));
    }
    Ok(tag.to_string())
}

/// At least one of the seven criteria must have survived the mapping.
fn ensure_criterion(request: &SearchItemsRequest) -> Result<()> {
    let has_criterion = request.keywords.is_some()
        || request.title.is_some()
        || request.actor.is_some()
        || request.artist.is_some()
        || request.author.is_some()
        || request.brand.is_some()
        || request.browse_node_id.is_some();

    if !has_criterion {
        return Err(AppError::validation(
            "At least one search criterion (keywords, title, actor, artist, author, brand \
             or browse node ID) must be provided",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, DeliveryFlag, SearchCriteria, SearchFilters};

    fn credentials() -> Credentials {
        Credentials {
            access_key: "AKIA_TEST".to_string(),
            secret_key: "secret".to_string(),
            partner_tag: "default-20".to_string(),
            marketplace: "www.amazon.com".to_string(),
        }
    }

    fn keyword_options(keywords: &str) -> SearchOptions {
        SearchOptions {
            criteria: SearchCriteria {
                keywords: Some(keywords.to_string()),
                ..SearchCriteria::default()
            },
            ..SearchOptions::default()
        }
    }

    #[test]
    fn rejects_options_without_any_criterion() {
        let error = build_search_request(&SearchOptions::default(), &credentials()).unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[test]
    fn empty_criterion_strings_do_not_count() {
        let mut options = SearchOptions::default();
        options.criteria.keywords = Some(String::new());
        options.criteria.author = Some(String::new());

        let error = build_search_request(&options, &credentials()).unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
    }

    #[test]
    fn single_criterion_maps_alone() {
        let mut options = SearchOptions::default();
        options.criteria.author = Some("Le Guin".to_string());

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.author.as_deref(), Some("Le Guin"));
        assert!(request.keywords.is_none());
        assert!(request.title.is_none());
        assert!(request.actor.is_none());
        assert!(request.artist.is_none());
        assert!(request.brand.is_none());
        assert!(request.browse_node_id.is_none());
    }

    #[test]
    fn criteria_combine_without_hierarchy() {
        let mut options = keyword_options("fantasy");
        options.criteria.author = Some("Le Guin".to_string());
        options.criteria.brand = Some("Penguin".to_string());

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.keywords.as_deref(), Some("fantasy"));
        assert_eq!(request.author.as_deref(), Some("Le Guin"));
        assert_eq!(request.brand.as_deref(), Some("Penguin"));
    }

    #[test]
    fn partner_tag_defaults_to_credentials() {
        let request = build_search_request(&keyword_options("laptop"), &credentials()).unwrap();
        assert_eq!(request.partner_tag, "default-20");
    }

    #[test]
    fn partner_tag_override_wins() {
        let mut options = keyword_options("laptop");
        options.partner_tag = Some("override-20".to_string());

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.partner_tag, "override-20");
    }

    #[test]
    fn empty_partner_tag_override_falls_back() {
        let mut options = keyword_options("laptop");
        options.partner_tag = Some(String::new());

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.partner_tag, "default-20");
    }

    #[test]
    fn missing_partner_tag_is_a_config_error() {
        let mut creds = credentials();
        creds.partner_tag = String::new();

        let error = build_search_request(&keyword_options("laptop"), &creds).unwrap_err();
        assert!(matches!(error, AppError::Config(_)));
    }

    #[test]
    fn sentinel_search_index_is_omitted() {
        let mut options = keyword_options("laptop");
        options.search_index = Some("All".to_string());
        let request = build_search_request(&options, &credentials()).unwrap();
        assert!(request.search_index.is_none());

        options.search_index = Some("Electronics".to_string());
        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.search_index.as_deref(), Some("Electronics"));
    }

    #[test]
    fn zero_price_filters_are_omitted() {
        let mut options = keyword_options("laptop");
        options.filters.min_price = Some(0);
        options.filters.max_price = Some(50_000);

        let request = build_search_request(&options, &credentials()).unwrap();
        assert!(request.min_price.is_none());
        assert_eq!(request.max_price, Some(50_000));
    }

    #[test]
    fn sentinel_condition_and_merchant_are_omitted() {
        let mut options = keyword_options("laptop");
        options.filters.condition = Some(Condition::Any);
        options.filters.merchant = Some(Merchant::All);

        let request = build_search_request(&options, &credentials()).unwrap();
        assert!(request.condition.is_none());
        assert!(request.merchant.is_none());

        options.filters.condition = Some(Condition::Used);
        options.filters.merchant = Some(Merchant::Amazon);

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.condition, Some(Condition::Used));
        assert_eq!(request.merchant, Some(Merchant::Amazon));
    }

    #[test]
    fn availability_and_delivery_flags_pass_through() {
        let mut options = keyword_options("laptop");
        options.filters = SearchFilters {
            availability: Some(Availability::IncludeOutOfStock),
            delivery_flags: vec![DeliveryFlag::Prime, DeliveryFlag::FreeShipping],
            ..SearchFilters::default()
        };

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.availability, Some(Availability::IncludeOutOfStock));
        assert_eq!(
            request.delivery_flags,
            Some(vec![DeliveryFlag::Prime, DeliveryFlag::FreeShipping])
        );
    }

    #[test]
    fn out_of_range_item_count_is_dropped() {
        let mut options = keyword_options("laptop");
        options.item_count = Some(15);
        options.item_page = Some(0);

        let request = build_search_request(&options, &credentials()).unwrap();
        assert!(request.item_count.is_none());
        assert!(request.item_page.is_none());
    }

    #[test]
    fn in_range_item_count_is_kept() {
        let mut options = keyword_options("laptop");
        options.item_count = Some(10);
        options.item_page = Some(1);

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.item_count, Some(10));
        assert_eq!(request.item_page, Some(1));
    }

    #[test]
    fn relevance_sort_is_omitted() {
        let mut options = keyword_options("laptop");
        options.sort_by = Some(SortBy::Relevance);
        let request = build_search_request(&options, &credentials()).unwrap();
        assert!(request.sort_by.is_none());

        options.sort_by = Some(SortBy::PriceLowToHigh);
        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(request.sort_by, Some(SortBy::PriceLowToHigh));
    }

    #[test]
    fn languages_are_split_and_trimmed() {
        let mut options = keyword_options("laptop");
        options.extra.languages_of_preference = Some("en_US, fr_FR".to_string());

        let request = build_search_request(&options, &credentials()).unwrap();
        assert_eq!(
            request.languages_of_preference,
            Some(vec!["en_US".to_string(), "fr_FR".to_string()])
        );
    }

    #[test]
    fn empty_language_string_is_omitted() {
        let mut options = keyword_options("laptop");
        options.extra.languages_of_preference = Some(String::new());

        let request = build_search_request(&options, &credentials()).unwrap();
        assert!(request.languages_of_preference.is_none());
    }

    #[test]
    fn end_to_end_example_keeps_only_set_fields() {
        let mut options = keyword_options("laptop");
        options.item_count = Some(5);
        options.sort_by = Some(SortBy::Relevance);

        let request = build_search_request(&options, &credentials()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "ItemCount",
                "Keywords",
                "Marketplace",
                "PartnerTag",
                "PartnerType"
            ]
        );
        assert_eq!(value["Keywords"], "laptop");
        assert_eq!(value["ItemCount"], 5);
        assert_eq!(value["PartnerType"], "Associates");
    }
}
