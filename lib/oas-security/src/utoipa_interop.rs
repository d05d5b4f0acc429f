//! Conversion into [`utoipa`] OpenAPI types.
//!
//! Lets a [`SecurityScheme`] be registered on a utoipa `Components`:
//!
//! ```rust
//! use oas_security::SecurityScheme;
//! use utoipa::openapi::ComponentsBuilder;
//!
//! # fn example() -> Result<(), oas_security::ValidationError> {
//! let components = ComponentsBuilder::new()
//!     .security_scheme("bearerAuth", SecurityScheme::bearer_jwt().to_utoipa()?)
//!     .build();
//! # Ok(())
//! # }
//! ```

use tracing::warn;
use url::Url;
use utoipa::openapi::security::{
    ApiKey as UtoipaApiKey, ApiKeyValue, AuthorizationCode, ClientCredentials, Flow, Http,
    HttpAuthScheme as UtoipaHttpAuthScheme, Implicit, OAuth2 as UtoipaOAuth2,
    OpenIdConnect as UtoipaOpenIdConnect, Password, Scopes,
    SecurityScheme as UtoipaSecurityScheme,
};

use crate::error::{SchemeViolation, ValidationError};
use crate::flows::{OAuthFlowKind, OAuthFlows};
use crate::http_auth::HttpAuthScheme;
use crate::scheme::{ApiKeyLocation, SecurityScheme, SecuritySchemeType};

impl SecurityScheme {
    /// Converts this security scheme to a utoipa `SecurityScheme`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the scheme does not pass
    /// [`SecurityScheme::validate`], or if its HTTP scheme is not one utoipa knows.
    pub fn to_utoipa(&self) -> Result<UtoipaSecurityScheme, ValidationError> {
        self.validate()?;

        let description = self.description.clone();
        let scheme_type = self.scheme_type;
        let missing = |field: &'static str| {
            ValidationError::single(SchemeViolation::MissingField { scheme_type, field })
        };

        let result = match scheme_type {
            SecuritySchemeType::ApiKey => {
                let name = self.name.as_deref().ok_or_else(|| missing("name"))?;
                let location = self.location.ok_or_else(|| missing("in"))?;
                let value = match description {
                    Some(desc) => ApiKeyValue::with_description(name, desc.as_str()),
                    None => ApiKeyValue::new(name),
                };
                let api_key = match location {
                    ApiKeyLocation::Header => UtoipaApiKey::Header(value),
                    ApiKeyLocation::Query => UtoipaApiKey::Query(value),
                    ApiKeyLocation::Cookie => UtoipaApiKey::Cookie(value),
                };
                UtoipaSecurityScheme::ApiKey(api_key)
            }
            SecuritySchemeType::Http => {
                let scheme = self.scheme.as_ref().ok_or_else(|| missing("scheme"))?;
                let mut http = Http::new(to_utoipa_http_scheme(scheme)?);
                http.bearer_format.clone_from(&self.bearer_format);
                http.description = description;
                UtoipaSecurityScheme::Http(http)
            }
            SecuritySchemeType::MutualTls => {
                // utoipa only exposes this variant through its document form
                let document = serde_json::json!({
                    "type": SecuritySchemeType::MutualTls,
                    "description": description,
                });
                serde_json::from_value(document).map_err(|err| {
                    warn!(error = %err, "utoipa rejected mutualTLS security scheme");
                    ValidationError::single(SchemeViolation::Unrepresentable {
                        reason: err.to_string(),
                    })
                })?
            }
            SecuritySchemeType::OAuth2 => {
                let flows = self.flows.as_ref().ok_or_else(|| missing("flows"))?;
                let mut oauth2 = UtoipaOAuth2::new(to_utoipa_flows(flows)?);
                oauth2.description = description;
                UtoipaSecurityScheme::OAuth2(oauth2)
            }
            SecuritySchemeType::OpenIdConnect => {
                let url = self
                    .open_id_connect_url
                    .as_ref()
                    .ok_or_else(|| missing("openIdConnectUrl"))?;
                let mut oidc = UtoipaOpenIdConnect::new(url.as_str());
                oidc.description = description;
                UtoipaSecurityScheme::OpenIdConnect(oidc)
            }
        };

        Ok(result)
    }
}

impl TryFrom<&SecurityScheme> for UtoipaSecurityScheme {
    type Error = ValidationError;

    fn try_from(scheme: &SecurityScheme) -> Result<Self, Self::Error> {
        scheme.to_utoipa()
    }
}

impl TryFrom<SecurityScheme> for UtoipaSecurityScheme {
    type Error = ValidationError;

    fn try_from(scheme: SecurityScheme) -> Result<Self, Self::Error> {
        scheme.to_utoipa()
    }
}

fn to_utoipa_http_scheme(
    scheme: &HttpAuthScheme,
) -> Result<UtoipaHttpAuthScheme, ValidationError> {
    let result = match scheme.as_str() {
        "basic" => UtoipaHttpAuthScheme::Basic,
        "bearer" => UtoipaHttpAuthScheme::Bearer,
        "digest" => UtoipaHttpAuthScheme::Digest,
        "hoba" => UtoipaHttpAuthScheme::Hoba,
        "mutual" => UtoipaHttpAuthScheme::Mutual,
        "negotiate" => UtoipaHttpAuthScheme::Negotiate,
        "oauth" => UtoipaHttpAuthScheme::OAuth,
        "scram-sha-1" => UtoipaHttpAuthScheme::ScramSha1,
        "scram-sha-256" => UtoipaHttpAuthScheme::ScramSha256,
        "vapid" => UtoipaHttpAuthScheme::Vapid,
        other => {
            return Err(ValidationError::single(
                SchemeViolation::UnsupportedHttpScheme {
                    scheme: other.to_string(),
                },
            ));
        }
    };
    Ok(result)
}

fn require_flow_url<'a>(
    url: Option<&'a Url>,
    flow: OAuthFlowKind,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    url.map(Url::as_str)
        .ok_or_else(|| ValidationError::single(SchemeViolation::MissingFlowUrl { flow, field }))
}

fn to_utoipa_flows(flows: &OAuthFlows) -> Result<Vec<Flow>, ValidationError> {
    flows
        .iter()
        .map(|(flow, config)| {
            let scopes = Scopes::from_iter(config.scopes.clone());
            let refresh_url = config.refresh_url.as_ref().map(Url::as_str);
            let require_authorization_url =
                || require_flow_url(config.authorization_url.as_ref(), flow, "authorizationUrl");
            let require_token_url =
                || require_flow_url(config.token_url.as_ref(), flow, "tokenUrl");

            let result = match flow {
                OAuthFlowKind::Implicit => {
                    let auth_url = require_authorization_url()?;
                    Flow::Implicit(match refresh_url {
                        Some(refresh) => Implicit::with_refresh_url(auth_url, scopes, refresh),
                        None => Implicit::new(auth_url, scopes),
                    })
                }
                OAuthFlowKind::Password => {
                    let token_url = require_token_url()?;
                    Flow::Password(match refresh_url {
                        Some(refresh) => Password::with_refresh_url(token_url, scopes, refresh),
                        None => Password::new(token_url, scopes),
                    })
                }
                OAuthFlowKind::ClientCredentials => {
                    let token_url = require_token_url()?;
                    Flow::ClientCredentials(match refresh_url {
                        Some(refresh) => {
                            ClientCredentials::with_refresh_url(token_url, scopes, refresh)
                        }
                        None => ClientCredentials::new(token_url, scopes),
                    })
                }
                OAuthFlowKind::AuthorizationCode => {
                    let auth_url = require_authorization_url()?;
                    let token_url = require_token_url()?;
                    Flow::AuthorizationCode(match refresh_url {
                        Some(refresh) => AuthorizationCode::with_refresh_url(
                            auth_url, token_url, scopes, refresh,
                        ),
                        None => AuthorizationCode::new(auth_url, token_url, scopes),
                    })
                }
            };
            Ok(result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    fn assert_same_document(scheme: &SecurityScheme) {
        let utoipa = scheme.to_utoipa().expect("should convert");

        let expected = serde_json::to_value(scheme).expect("should serialize");
        let actual = serde_json::to_value(&utoipa).expect("should serialize");
        assert_eq!(actual, expected);
    }

    #[test]
    fn should_convert_bearer_jwt() {
        let scheme = SecurityScheme::bearer_jwt().with_description("JWT token");

        let utoipa = scheme.to_utoipa().expect("should convert");

        let UtoipaSecurityScheme::Http(http) = utoipa else {
            panic!("expected an HTTP security scheme");
        };
        assert_eq!(http.scheme, UtoipaHttpAuthScheme::Bearer);
        assert_eq!(http.bearer_format.as_deref(), Some("JWT"));
        assert_eq!(http.description.as_deref(), Some("JWT token"));
    }

    #[test]
    fn should_produce_same_documents() {
        assert_same_document(&SecurityScheme::basic());
        assert_same_document(&SecurityScheme::bearer_jwt());
        assert_same_document(&SecurityScheme::api_key().with_description("Portal key"));
        assert_same_document(&SecurityScheme::api_key_in("sid", ApiKeyLocation::Cookie));
        assert_same_document(&SecurityScheme::mutual_tls().with_description("Client certificate"));
        assert_same_document(&SecurityScheme::open_id_connect(url(
            "https://auth.example.com/.well-known/openid-configuration",
        )));
    }

    #[test]
    fn should_convert_oauth_flows() {
        let scheme = SecurityScheme::oauth2(OAuthFlows {
            client_credentials: Some(
                crate::OAuthFlow::new([("api:read", "Read access")])
                    .with_token_url(url("https://auth.example.com/token")),
            ),
            ..OAuthFlows::implicit(
                url("https://auth.example.com/authorize"),
                [("read:x", "Read X")],
            )
        });

        let utoipa = UtoipaSecurityScheme::try_from(&scheme).expect("should convert");

        assert!(matches!(utoipa, UtoipaSecurityScheme::OAuth2(_)));
        let document = serde_json::to_value(&utoipa).expect("should serialize");
        assert_eq!(
            document["flows"]["implicit"]["authorizationUrl"],
            json!("https://auth.example.com/authorize")
        );
        assert_eq!(
            document["flows"]["clientCredentials"]["scopes"],
            json!({ "api:read": "Read access" })
        );
    }

    #[test]
    fn should_reject_unknown_http_scheme() {
        let scheme = SecurityScheme::new(SecuritySchemeType::Http).with_scheme("AWS4-HMAC-SHA256");

        let error = scheme.to_utoipa().expect_err("should not convert");

        assert_eq!(
            error.violations,
            vec![SchemeViolation::UnsupportedHttpScheme {
                scheme: "aws4-hmac-sha256".to_string(),
            }]
        );
    }

    #[test]
    fn should_reject_invalid_scheme() {
        let scheme = SecurityScheme::new(SecuritySchemeType::OpenIdConnect);

        let error = UtoipaSecurityScheme::try_from(scheme).expect_err("should not convert");

        assert_eq!(
            error.violations,
            vec![SchemeViolation::MissingField {
                scheme_type: SecuritySchemeType::OpenIdConnect,
                field: "openIdConnectUrl",
            }]
        );
    }
}
