//! Credential material and marketplace endpoints.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Supported marketplaces: storefront host, API endpoint host, AWS region.
const MARKETPLACES: &[(&str, &str, &str)] = &[
    ("www.amazon.com", "webservices.amazon.com", "us-east-1"),
    ("www.amazon.co.uk", "webservices.amazon.co.uk", "eu-west-1"),
    ("www.amazon.de", "webservices.amazon.de", "eu-west-1"),
    ("www.amazon.co.jp", "webservices.amazon.co.jp", "us-west-2"),
    ("www.amazon.ca", "webservices.amazon.ca", "us-east-1"),
    ("www.amazon.fr", "webservices.amazon.fr", "eu-west-1"),
    ("www.amazon.it", "webservices.amazon.it", "eu-west-1"),
    ("www.amazon.es", "webservices.amazon.es", "eu-west-1"),
    ("www.amazon.com.mx", "webservices.amazon.com.mx", "us-east-1"),
    ("www.amazon.com.br", "webservices.amazon.com.br", "us-east-1"),
    ("www.amazon.in", "webservices.amazon.in", "eu-west-1"),
    ("www.amazon.com.au", "webservices.amazon.com.au", "us-west-2"),
    ("www.amazon.cn", "webservices.amazon.cn", "us-west-2"),
];

/// API endpoint resolved from a marketplace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Endpoint hostname, e.g. "webservices.amazon.com"
    pub host: String,

    /// AWS region used for request signing
    pub region: &'static str,
}

/// Credentials for the Product Advertising API.
///
/// Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// API access key
    pub access_key: String,

    /// API secret key
    pub secret_key: String,

    /// Default partner tag, overridable per request
    #[serde(default)]
    pub partner_tag: String,

    /// Marketplace storefront host, e.g. "www.amazon.com"
    #[serde(default = "defaults::marketplace")]
    pub marketplace: String,
}

impl Credentials {
    /// Resolve the API endpoint for this credential's marketplace.
    pub fn endpoint(&self) -> Result<Endpoint> {
        MARKETPLACES
            .iter()
            .find(|(storefront, _, _)| *storefront == self.marketplace)
            .map(|(_, host, region)| Endpoint {
                host: (*host).to_string(),
                region: *region,
            })
            .ok_or_else(|| {
                AppError::config(format!("Unsupported marketplace: {}", self.marketplace))
            })
    }

    /// Validate credential values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.access_key.trim().is_empty() {
            return Err(AppError::validation("credentials.access_key is empty"));
        }
        if self.secret_key.trim().is_empty() {
            return Err(AppError::validation("credentials.secret_key is empty"));
        }
        self.endpoint()?;
        Ok(())
    }
}

mod defaults {
    pub fn marketplace() -> String {
        "www.amazon.com".into()
    }
}
