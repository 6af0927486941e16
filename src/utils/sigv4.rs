// src/utils/sigv4.rs

//! AWS Signature Version 4 request signing.
//!
//! The Product Advertising API authenticates every call with SigV4 over
//! a fixed header set. Only the POST-with-JSON-body shape used by this
//! application is supported here.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Signing service name for the Product Advertising API.
const SERVICE: &str = "ProductAdvertisingAPI";

/// Headers included in the signature, in canonical order.
const SIGNED_HEADERS: &str = "content-encoding;content-type;host;x-amz-date;x-amz-target";

/// Content-Encoding value the API expects.
pub const CONTENT_ENCODING: &str = "amz-1.0";

/// Content-Type value the API expects.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Inputs for signing one request.
#[derive(Debug)]
pub struct SigningRequest<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub target: &'a str,
    pub payload: &'a str,
}

/// Headers to attach to the outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub authorization: String,
    pub amz_date: String,
    pub target: String,
}

/// Sign a request at the current time.
pub fn sign(request: &SigningRequest<'_>) -> Result<SignedHeaders> {
    sign_at(request, Utc::now())
}

/// Sign a request for a fixed timestamp.
///
/// Split from `sign` so the canonicalization is testable without
/// depending on the wall clock.
pub fn sign_at(request: &SigningRequest<'_>, now: DateTime<Utc>) -> Result<SignedHeaders> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();

    let canonical_headers = format!(
        "content-encoding:{CONTENT_ENCODING}\ncontent-type:{CONTENT_TYPE}\nhost:{}\nx-amz-date:{}\nx-amz-target:{}\n",
        request.host, amz_date, request.target
    );

    let canonical_request = format!(
        "POST\n{}\n\n{}\n{}\n{}",
        request.path,
        canonical_headers,
        SIGNED_HEADERS,
        hex_sha256(request.payload.as_bytes())
    );

    let scope = format!("{date_stamp}/{}/{SERVICE}/aws4_request", request.region);
    let string_to_sign = format!(
        "AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{}",
        hex_sha256(canonical_request.as_bytes())
    );

    let key = derive_key(request.secret_key, &date_stamp, request.region)?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        authorization: format!(
            "AWS4-HMAC-SHA256 Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            request.access_key
        ),
        amz_date,
        target: request.target.to_string(),
    })
}

fn hex_sha256(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| AppError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// AWS4 key derivation chain: date, region, service, terminator.
fn derive_key(secret_key: &str, date_stamp: &str, region: &str) -> Result<Vec<u8>> {
    let k_date = hmac(format!("AWS4{secret_key}").as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, SERVICE.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}
