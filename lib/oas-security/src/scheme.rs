//! The OpenAPI Security Scheme Object.
//!
//! A [`SecurityScheme`] is a flat record: a [`SecuritySchemeType`] discriminator
//! plus every optional field any scheme type may use. The structure accepts
//! combinations that do not make sense for the chosen type, so that any
//! real-world document can be read back. Use [`SecurityScheme::validate`] to
//! check the combination.
//!
//! # Example
//!
//! ```rust
//! use oas_security::{ApiKeyLocation, SecurityScheme, SecuritySchemeType};
//!
//! let scheme = SecurityScheme::new(SecuritySchemeType::ApiKey)
//!     .with_name("X-API-Key")
//!     .with_location(ApiKeyLocation::Header)
//!     .with_description("Key issued from the developer portal");
//!
//! assert_eq!(scheme, SecurityScheme::api_key_in("X-API-Key", ApiKeyLocation::Header)
//!     .with_description("Key issued from the developer portal"));
//! ```
//!
//! # Document layout
//!
//! ```yaml
//! type: apiKey
//! description: Key issued from the developer portal
//! name: X-API-Key
//! in: header
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::flows::OAuthFlows;
use crate::http_auth::HttpAuthScheme;

/// Default name of the key used by [`SecurityScheme::api_key`].
pub const DEFAULT_API_KEY_NAME: &str = "api_key";

/// The type of a security scheme.
///
/// Tells which of the other [`SecurityScheme`] fields are meaningful.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum SecuritySchemeType {
    /// API key passed in a header, query parameter, or cookie.
    #[serde(rename = "apiKey")]
    #[display("apiKey")]
    ApiKey,
    /// HTTP authentication (`Authorization` header).
    #[serde(rename = "http")]
    #[display("http")]
    Http,
    /// Mutual TLS, client certificate authentication.
    #[serde(rename = "mutualTLS")]
    #[display("mutualTLS")]
    MutualTls,
    /// OAuth 2.0 flows.
    #[serde(rename = "oauth2")]
    #[display("oauth2")]
    OAuth2,
    /// OpenID Connect Discovery.
    #[serde(rename = "openIdConnect")]
    #[display("openIdConnect")]
    OpenIdConnect,
}

/// Location where an API key is passed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    /// API key in query parameter
    #[display("query")]
    Query,
    /// API key in HTTP header
    #[display("header")]
    Header,
    /// API key in cookie
    #[display("cookie")]
    Cookie,
}

/// OpenAPI Security Scheme Object.
///
/// Fields that do not apply to [`scheme_type`](Self::scheme_type) should be
/// left empty, but nothing prevents setting them.
///
/// | field | applies to |
/// |---|---|
/// | `description` | all types |
/// | `name`, `location` | [`SecuritySchemeType::ApiKey`] |
/// | `scheme` | [`SecuritySchemeType::Http`] |
/// | `bearer_format` | [`SecuritySchemeType::Http`] with the `bearer` scheme |
/// | `flows` | [`SecuritySchemeType::OAuth2`] |
/// | `open_id_connect_url` | [`SecuritySchemeType::OpenIdConnect`] |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    /// The discriminator, written as `type`
    #[serde(rename = "type")]
    pub scheme_type: SecuritySchemeType,

    /// Description for documentation, CommonMark may be used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Name of the header, query parameter, or cookie carrying the key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Where the API key is passed, written as `in`
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ApiKeyLocation>,

    /// HTTP authentication scheme used in the `Authorization` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<HttpAuthScheme>,

    /// Format hint for bearer tokens (e.g. "JWT"), documentation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,

    /// OAuth2 flows configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flows: Option<OAuthFlows>,

    /// OpenID Connect discovery URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_id_connect_url: Option<Url>,
}

impl SecurityScheme {
    /// Creates a security scheme of the given type with every other field unset.
    ///
    /// Combine with the `with_*` methods to fill in the fields.
    #[must_use]
    pub fn new(scheme_type: SecuritySchemeType) -> Self {
        Self {
            scheme_type,
            description: None,
            name: None,
            location: None,
            scheme: None,
            bearer_format: None,
            flows: None,
            open_id_connect_url: None,
        }
    }

    /// Creates an HTTP Basic authentication scheme (RFC 7617).
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::{HttpAuthScheme, SecurityScheme, SecuritySchemeType};
    ///
    /// let scheme = SecurityScheme::basic();
    /// assert_eq!(scheme.scheme_type, SecuritySchemeType::Http);
    /// assert_eq!(scheme.scheme, Some(HttpAuthScheme::new("BASIC")));
    /// ```
    #[must_use]
    pub fn basic() -> Self {
        Self::new(SecuritySchemeType::Http).with_scheme(HttpAuthScheme::BASIC)
    }

    /// Creates a simple HTTP Bearer authentication scheme (RFC 6750).
    #[must_use]
    pub fn bearer() -> Self {
        Self::new(SecuritySchemeType::Http).with_scheme(HttpAuthScheme::BEARER)
    }

    /// Creates an HTTP Bearer authentication scheme with a format hint.
    ///
    /// # Arguments
    ///
    /// * `format` - Format hint (e.g., "JWT" for JSON Web Tokens)
    pub fn bearer_with_format(format: impl Into<String>) -> Self {
        Self::bearer().with_bearer_format(format)
    }

    /// Creates an HTTP Bearer authentication scheme for JSON Web Tokens.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::{HttpAuthScheme, SecurityScheme};
    ///
    /// let scheme = SecurityScheme::bearer_jwt();
    /// assert_eq!(scheme.scheme, Some(HttpAuthScheme::new("Bearer")));
    /// assert_eq!(scheme.bearer_format.as_deref(), Some("JWT"));
    /// ```
    #[must_use]
    pub fn bearer_jwt() -> Self {
        Self::bearer_with_format("JWT")
    }

    /// Creates an API key scheme passed in the `api_key` header.
    ///
    /// See [`DEFAULT_API_KEY_NAME`].
    #[must_use]
    pub fn api_key() -> Self {
        Self::api_key_with_name(DEFAULT_API_KEY_NAME)
    }

    /// Creates an API key scheme passed in a header with the given name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::{ApiKeyLocation, SecurityScheme};
    ///
    /// let scheme = SecurityScheme::api_key_with_name("X-API-Key");
    /// assert_eq!(scheme.name.as_deref(), Some("X-API-Key"));
    /// assert_eq!(scheme.location, Some(ApiKeyLocation::Header));
    /// ```
    pub fn api_key_with_name(name: impl Into<String>) -> Self {
        Self::api_key_in(name, ApiKeyLocation::Header)
    }

    /// Creates an API key scheme.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the header, query parameter, or cookie
    /// * `location` - Where the API key is passed
    pub fn api_key_in(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self::new(SecuritySchemeType::ApiKey)
            .with_name(name)
            .with_location(location)
    }

    /// Creates an OAuth2 scheme using the implicit flow.
    ///
    /// # Arguments
    ///
    /// * `authorization_url` - URL of the authorization endpoint
    /// * `token_url` - Optional URL of the token endpoint
    /// * `scopes` - Scope names with their description, may be empty
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::SecurityScheme;
    /// use url::Url;
    ///
    /// # fn example() -> Result<(), url::ParseError> {
    /// let scheme = SecurityScheme::oauth(
    ///     Url::parse("https://auth.example.com/authorize")?,
    ///     None,
    ///     [("read:pets", "Read your pets")],
    /// );
    ///
    /// let implicit = scheme.flows.and_then(|flows| flows.implicit);
    /// assert!(implicit.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn oauth(
        authorization_url: Url,
        token_url: Option<Url>,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        let mut flows = OAuthFlows::implicit(authorization_url, scopes);
        if let Some(implicit) = &mut flows.implicit {
            implicit.token_url = token_url;
        }
        Self::oauth2(flows)
    }

    /// Creates an OAuth2 scheme with the given flows.
    #[must_use]
    pub fn oauth2(flows: OAuthFlows) -> Self {
        Self::new(SecuritySchemeType::OAuth2).with_flows(flows)
    }

    /// Creates an OpenID Connect scheme.
    ///
    /// # Arguments
    ///
    /// * `url` - OpenID Connect discovery URL
    #[must_use]
    pub fn open_id_connect(url: Url) -> Self {
        Self::new(SecuritySchemeType::OpenIdConnect).with_open_id_connect_url(url)
    }

    /// Creates a mutual TLS scheme.
    #[must_use]
    pub fn mutual_tls() -> Self {
        Self::new(SecuritySchemeType::MutualTls)
    }

    /// Adds a description to the security scheme.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::SecurityScheme;
    ///
    /// let scheme = SecurityScheme::bearer()
    ///     .with_description("JWT token obtained from /auth/login");
    /// ```
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the name of the API key.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets where the API key is passed.
    #[must_use]
    pub fn with_location(mut self, location: ApiKeyLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the HTTP authentication scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<HttpAuthScheme>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Sets the bearer format hint.
    #[must_use]
    pub fn with_bearer_format(mut self, format: impl Into<String>) -> Self {
        self.bearer_format = Some(format.into());
        self
    }

    /// Sets the OAuth2 flows.
    #[must_use]
    pub fn with_flows(mut self, flows: OAuthFlows) -> Self {
        self.flows = Some(flows);
        self
    }

    /// Sets the OpenID Connect discovery URL.
    #[must_use]
    pub fn with_open_id_connect_url(mut self, url: Url) -> Self {
        self.open_id_connect_url = Some(url);
        self
    }
}
