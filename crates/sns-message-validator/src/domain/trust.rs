//! # Trust Anchor
//!
//! Decides whether a `SigningCertURL` may be fetched at all. Only `https`
//! URLs on an SNS regional endpoint are accepted:
//!
//! - `sns.<region>.amazonaws.com` (AWS, including GovCloud)
//! - `sns.<region>.amazonaws.com.cn` (AWS China)
//!
//! Without this check an attacker could sign a forged message with their
//! own key and point `SigningCertURL` at a certificate they host.

use super::errors::ValidationError;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Hostnames allowed to serve signing certificates.
pub const TRUSTED_HOST_PATTERN: &str = r"^sns\.[a-zA-Z0-9\-]{3,}\.amazonaws\.com(\.cn)?$";

static TRUSTED_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(TRUSTED_HOST_PATTERN).expect("trusted host pattern is a valid regex")
});

/// Whether `host` is an SNS regional endpoint.
pub fn is_trusted_host(host: &str) -> bool {
    TRUSTED_HOST.is_match(host)
}

/// Host of `raw` exactly as written, without userinfo or port.
///
/// `Url` normalizes hosts to lowercase, so the allow-pattern is matched
/// against this instead.
fn raw_host(raw: &str) -> Option<&str> {
    let (_, rest) = raw.split_once("://")?;
    let authority = rest.split(['/', '?', '#', '\\']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    match host_port.rsplit_once(':') {
        Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => Some(host),
        _ => Some(host_port),
    }
}

/// Parse a signing certificate URL and enforce the trust anchor.
///
/// The host is matched case-sensitively as written in `raw`, and must name
/// the same host the parsed URL will connect to.
///
/// # Errors
/// `InvalidCert` if the URL does not parse, is not `https`, or names a host
/// outside the allow-pattern.
pub fn check_certificate_url(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::invalid_cert(e.to_string()))?;

    if url.scheme() != "https" {
        return Err(ValidationError::invalid_cert(
            "The certificate URL is using insecure HTTP scheme",
        ));
    }

    match (url.host_str(), raw_host(raw)) {
        (Some(parsed), Some(host))
            if is_trusted_host(host) && host.eq_ignore_ascii_case(parsed) =>
        {
            Ok(url)
        }
        _ => Err(ValidationError::invalid_cert(
            "The certificate URL belongs to an untrusted host",
        )),
    }
}
