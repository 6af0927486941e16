//! Wire-level request body for the `SearchItems` operation.

use serde::{Deserialize, Serialize};

use crate::models::options::{Availability, Condition, DeliveryFlag, Merchant, SortBy};

/// Partner type discriminator sent on every request.
pub const PARTNER_TYPE: &str = "Associates";

/// JSON body of a `SearchItems` call.
///
/// Unset fields must be absent from the serialized body entirely; the
/// API treats an absent field and an empty one differently, so omission
/// is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SearchItemsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_index: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_node_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_reviews_rating: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_saving_percent: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<Merchant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_flags: Option<Vec<DeliveryFlag>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_page: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_of_preference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages_of_preference: Option<Vec<String>>,

    /// Affiliate partner tag, resolved before construction
    pub partner_tag: String,

    /// Always "Associates"
    pub partner_type: String,

    /// Marketplace storefront host, e.g. "www.amazon.com"
    pub marketplace: String,
}
