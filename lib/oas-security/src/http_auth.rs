//! HTTP authentication scheme tokens.
//!
//! The `scheme` field of an `http` security scheme holds a token from the
//! [IANA HTTP Authentication Scheme Registry](https://www.iana.org/assignments/http-authschemes/http-authschemes.xhtml).
//! Tokens are case-insensitive, so [`HttpAuthScheme`] stores them lowercased.

use std::borrow::Cow;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A case-insensitive HTTP authentication scheme token.
///
/// The value is normalized to lowercase when it is built, including when it is
/// deserialized, so equality and hashing only ever see the normalized token.
/// The set of tokens is open: any text is accepted, and the associated
/// constants are only shortcuts for the commonly used ones.
///
/// # Example
///
/// ```rust
/// use oas_security::HttpAuthScheme;
///
/// let scheme = HttpAuthScheme::new("Bearer");
/// assert_eq!(scheme, HttpAuthScheme::BEARER);
/// assert_eq!(scheme.as_str(), "bearer");
///
/// // Unregistered tokens are fine too
/// let custom = HttpAuthScheme::new("AWS4-HMAC-SHA256");
/// assert_eq!(custom.to_string(), "aws4-hmac-sha256");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(from = "String", into = "String")]
pub struct HttpAuthScheme(Cow<'static, str>);

impl HttpAuthScheme {
    /// `Basic` authentication (RFC 7617).
    pub const BASIC: Self = Self::from_static("basic");
    /// `Bearer` token authentication (RFC 6750).
    pub const BEARER: Self = Self::from_static("bearer");
    /// `Digest` access authentication (RFC 7616).
    pub const DIGEST: Self = Self::from_static("digest");
    /// HTTP Origin-Bound Authentication (RFC 7486).
    pub const HOBA: Self = Self::from_static("hoba");
    /// Mutual authentication (RFC 8120).
    pub const MUTUAL: Self = Self::from_static("mutual");
    /// OAuth 1.0 (RFC 5849).
    pub const OAUTH: Self = Self::from_static("oauth");
    /// SCRAM with SHA-1 (RFC 7804).
    pub const SCRAM_SHA_1: Self = Self::from_static("scram-sha-1");
    /// SCRAM with SHA-256 (RFC 7804).
    pub const SCRAM_SHA_256: Self = Self::from_static("scram-sha-256");
    /// Voluntary Application Server Identification (RFC 8292).
    pub const VAPID: Self = Self::from_static("vapid");

    /// All the named constants of this type.
    pub const WELL_KNOWN: [Self; 9] = [
        Self::BASIC,
        Self::BEARER,
        Self::DIGEST,
        Self::HOBA,
        Self::MUTUAL,
        Self::OAUTH,
        Self::SCRAM_SHA_1,
        Self::SCRAM_SHA_256,
        Self::VAPID,
    ];

    /// Creates a scheme token, normalizing it to lowercase.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(Cow::Owned(token.as_ref().to_lowercase()))
    }

    // Only for tokens that are already lowercase.
    const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    /// Returns the normalized token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this token is one of the [`WELL_KNOWN`](Self::WELL_KNOWN) constants.
    #[must_use]
    pub fn is_well_known(&self) -> bool {
        Self::WELL_KNOWN.contains(self)
    }
}

impl AsRef<str> for HttpAuthScheme {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for HttpAuthScheme {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HttpAuthScheme {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<HttpAuthScheme> for String {
    fn from(value: HttpAuthScheme) -> Self {
        value.0.into_owned()
    }
}

impl FromStr for HttpAuthScheme {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(token))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("basic", HttpAuthScheme::BASIC)]
    #[case("BASIC", HttpAuthScheme::BASIC)]
    #[case("Bearer", HttpAuthScheme::BEARER)]
    #[case("Digest", HttpAuthScheme::DIGEST)]
    #[case("HOBA", HttpAuthScheme::HOBA)]
    #[case("Mutual", HttpAuthScheme::MUTUAL)]
    #[case("OAuth", HttpAuthScheme::OAUTH)]
    #[case("SCRAM-SHA-1", HttpAuthScheme::SCRAM_SHA_1)]
    #[case("SCRAM-SHA-256", HttpAuthScheme::SCRAM_SHA_256)]
    #[case("vapid", HttpAuthScheme::VAPID)]
    fn should_normalize_to_named_constant(#[case] raw: &str, #[case] expected: HttpAuthScheme) {
        assert_eq!(HttpAuthScheme::new(raw), expected);
    }

    #[rstest]
    #[case("Negotiate")]
    #[case("AWS4-HMAC-SHA256")]
    #[case("already-lower")]
    #[case("")]
    fn should_be_idempotent(#[case] raw: &str) {
        let once = HttpAuthScheme::new(raw);
        let twice = HttpAuthScheme::new(once.as_str());
        let round_cased = HttpAuthScheme::new(raw.to_uppercase().to_lowercase());

        assert_eq!(once, twice);
        assert_eq!(once, round_cased);
    }

    #[test]
    fn should_hash_by_normalized_value() {
        let schemes: HashSet<_> = ["Bearer", "BEARER", "bearer"]
            .into_iter()
            .map(HttpAuthScheme::from)
            .collect();

        assert_eq!(schemes.len(), 1);
        assert!(schemes.contains(&HttpAuthScheme::BEARER));
    }

    #[test]
    fn should_accept_unregistered_token() {
        let scheme: HttpAuthScheme = "Negotiate".parse().unwrap_or_else(|never| match never {});

        assert_eq!(scheme.as_str(), "negotiate");
        assert!(!scheme.is_well_known());
    }

    #[test]
    fn should_know_named_constants() {
        assert!(HttpAuthScheme::new("Scram-Sha-256").is_well_known());
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let json = serde_json::to_string(&HttpAuthScheme::new("Digest")).expect("should serialize");

        assert_eq!(json, r#""digest""#);
    }

    #[test]
    fn should_normalize_when_deserializing() {
        let scheme: HttpAuthScheme =
            serde_json::from_str(r#""BeArEr""#).expect("should deserialize");

        assert_eq!(scheme, HttpAuthScheme::BEARER);
        assert_eq!(scheme.to_string(), "bearer");
    }
}
