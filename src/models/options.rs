//! User-facing search options.
//!
//! Every field is optional on its own; request construction enforces the
//! one hard requirement (at least one search criterion) later.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Options for a single search, as supplied by the host per item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Product category to search in, e.g. "Electronics". "All" means
    /// no category restriction.
    pub search_index: Option<String>,

    /// Identifying fields; any combination, at least one required
    pub criteria: SearchCriteria,

    /// Result filters
    pub filters: SearchFilters,

    /// Number of items to return (1-10)
    pub item_count: Option<u8>,

    /// Results page to retrieve (1-10)
    pub item_page: Option<u8>,

    /// Sort order; "Relevance" is the API's implicit default
    pub sort_by: Option<SortBy>,

    /// Response resource paths to request, e.g. "ItemInfo.Title"
    pub resources: Vec<String>,

    /// Offer, currency, language and pacing settings
    pub extra: AdditionalOptions,

    /// Partner tag override for this item
    pub partner_tag: Option<String>,
}

/// Search criteria identifying the items to look up.
///
/// The fields are alternatives, not a hierarchy: any combination that is
/// supplied is passed through as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Keywords to search for
    pub keywords: Option<String>,

    /// Title of the item to search for
    pub title: Option<String>,

    /// Actor name (Movies & TV)
    pub actor: Option<String>,

    /// Artist name (Music)
    pub artist: Option<String>,

    /// Author name (Books)
    pub author: Option<String>,

    /// Brand name
    pub brand: Option<String>,

    /// Browse node ID restricting the search to a category subtree
    pub browse_node_id: Option<String>,
}

/// Result filters.
///
/// Zero means "not set" for the numeric bounds, so a genuine zero
/// minimum is inexpressible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Minimum price in the smallest currency unit (e.g. cents)
    pub min_price: Option<u32>,

    /// Maximum price in the smallest currency unit
    pub max_price: Option<u32>,

    /// Minimum average customer review rating (1-4)
    pub min_reviews_rating: Option<u32>,

    /// Minimum percentage saving for at least one offer (1-99)
    pub min_saving_percent: Option<u32>,

    /// Item condition; "Any" means no condition filter
    pub condition: Option<Condition>,

    /// Stock filter
    pub availability: Option<Availability>,

    /// Seller filter; "All" means no seller filter
    pub merchant: Option<Merchant>,

    /// Delivery program filters
    pub delivery_flags: Vec<DeliveryFlag>,
}

/// Offer, currency, language and pacing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalOptions {
    /// Number of offers to return per item
    pub offer_count: Option<u32>,

    /// ISO 4217 currency code for prices, e.g. "USD"
    pub currency_of_preference: Option<String>,

    /// Comma-separated preferred languages, e.g. "en_US, fr_FR"
    pub languages_of_preference: Option<String>,

    /// Delay in milliseconds between API requests
    pub request_delay_ms: u64,

    /// Whether to add random jitter to the delay
    pub jitter: bool,

    /// Upper bound for the random jitter in milliseconds
    pub max_jitter_ms: Option<u64>,
}

/// Item condition filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Any,
    Collectible,
    New,
    Refurbished,
    Used,
}

/// Seller filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Merchant {
    All,
    Amazon,
}

/// Stock availability filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    IncludeOutOfStock,
}

/// Delivery program filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryFlag {
    AmazonGlobal,
    FreeShipping,
    FulfilledByAmazon,
    Prime,
}

/// Result sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    AvgCustomerReviews,
    Featured,
    NewestArrivals,
    #[serde(rename = "Price:HighToLow")]
    PriceHighToLow,
    #[serde(rename = "Price:LowToHigh")]
    PriceLowToHigh,
    Relevance,
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avgcustomerreviews" => Ok(SortBy::AvgCustomerReviews),
            "featured" => Ok(SortBy::Featured),
            "newestarrivals" => Ok(SortBy::NewestArrivals),
            "price:hightolow" => Ok(SortBy::PriceHighToLow),
            "price:lowtohigh" => Ok(SortBy::PriceLowToHigh),
            "relevance" => Ok(SortBy::Relevance),
            _ => Err(AppError::validation(format!("Unknown sort order: {s}"))),
        }
    }
}
