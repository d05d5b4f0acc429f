//! # OAS Security
//!
//! Typed [OpenAPI Security Scheme Object](https://spec.openapis.org/oas/v3.1.0#security-scheme-object)
//! with serde support and constructors for the common authentication patterns.
//!
//! ## Quick Start
//!
//! ```rust
//! use oas_security::{HttpAuthScheme, SecurityScheme, SecuritySchemeType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scheme = SecurityScheme::bearer_jwt()
//!     .with_description("Token obtained from /auth/login");
//!
//! let json = scheme.to_json()?;
//! assert_eq!(
//!     json,
//!     r#"{"type":"http","description":"Token obtained from /auth/login","scheme":"bearer","bearerFormat":"JWT"}"#
//! );
//!
//! let decoded = SecurityScheme::from_json(&json)?;
//! assert_eq!(decoded, scheme);
//! assert_eq!(decoded.scheme, Some(HttpAuthScheme::new("Bearer")));
//! # Ok(())
//! # }
//! ```
//!
//! ## Constructors
//!
//! | constructor | document |
//! |---|---|
//! | [`SecurityScheme::basic`] | `type: http`, `scheme: basic` |
//! | [`SecurityScheme::bearer_jwt`] | `type: http`, `scheme: bearer`, `bearerFormat: JWT` |
//! | [`SecurityScheme::api_key`] | `type: apiKey`, `name: api_key`, `in: header` |
//! | [`SecurityScheme::oauth`] | `type: oauth2` with an `implicit` flow |
//! | [`SecurityScheme::open_id_connect`] | `type: openIdConnect` |
//! | [`SecurityScheme::mutual_tls`] | `type: mutualTLS` |
//!
//! Any other combination can be built with [`SecurityScheme::new`] and the
//! `with_*` methods, or with a struct literal.
//!
//! ## Permissive structure
//!
//! The record does not prevent setting fields that make no sense for its
//! type, like a `bearerFormat` on an `apiKey` scheme. Such documents decode
//! fine; call [`SecurityScheme::validate`] to detect them.
//!
//! ```rust
//! use oas_security::{SchemeViolation, SecurityScheme, SecuritySchemeType};
//!
//! # fn main() -> Result<(), oas_security::CodecError> {
//! let scheme = SecurityScheme::from_json(r#"{"type": "apiKey", "name": "key", "in": "query", "bearerFormat": "JWT"}"#)?;
//!
//! assert_eq!(
//!     scheme.violations(),
//!     vec![SchemeViolation::UnexpectedField {
//!         scheme_type: SecuritySchemeType::ApiKey,
//!         field: "bearerFormat",
//!     }]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `yaml`: [`SecurityScheme::from_yaml`] and [`SecurityScheme::to_yaml`] using `serde-saphyr`.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod codec;
mod error;
mod flows;
mod http_auth;
mod scheme;
mod utoipa_interop;
mod validation;

pub use self::error::{CodecError, SchemeViolation, ValidationError};
pub use self::flows::{OAuthFlow, OAuthFlowKind, OAuthFlows};
pub use self::http_auth::HttpAuthScheme;
pub use self::scheme::{ApiKeyLocation, DEFAULT_API_KEY_NAME, SecurityScheme, SecuritySchemeType};
