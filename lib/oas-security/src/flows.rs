//! OAuth 2.0 flows of an `oauth2` security scheme.
//!
//! ```yaml
//! flows:
//!   implicit:
//!     authorizationUrl: https://auth.example.com/authorize
//!     scopes:
//!       read:pets: Read your pets
//!   clientCredentials:
//!     tokenUrl: https://auth.example.com/token
//!     scopes: {}
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration of the OAuth2 flows supported by a security scheme.
///
/// Each flow is optional; absent flows are omitted from the document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    /// Implicit flow (deprecated in OAuth 2.1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    /// Resource Owner Password flow (deprecated in OAuth 2.1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    /// Client Credentials flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    /// Authorization Code flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
}

impl OAuthFlows {
    /// Creates flows with only the implicit flow configured.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::OAuthFlows;
    /// use url::Url;
    ///
    /// # fn example() -> Result<(), url::ParseError> {
    /// let flows = OAuthFlows::implicit(
    ///     Url::parse("https://auth.example.com/authorize")?,
    ///     [("read:pets", "Read your pets")],
    /// );
    /// assert!(flows.implicit.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn implicit(
        authorization_url: Url,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            implicit: Some(OAuthFlow::new(scopes).with_authorization_url(authorization_url)),
            ..Default::default()
        }
    }

    /// Creates flows with only the password flow configured.
    pub fn password(
        token_url: Url,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            password: Some(OAuthFlow::new(scopes).with_token_url(token_url)),
            ..Default::default()
        }
    }

    /// Creates flows with only the client credentials flow configured.
    pub fn client_credentials(
        token_url: Url,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            client_credentials: Some(OAuthFlow::new(scopes).with_token_url(token_url)),
            ..Default::default()
        }
    }

    /// Creates flows with only the authorization code flow configured.
    pub fn authorization_code(
        authorization_url: Url,
        token_url: Url,
        scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        Self {
            authorization_code: Some(
                OAuthFlow::new(scopes)
                    .with_authorization_url(authorization_url)
                    .with_token_url(token_url),
            ),
            ..Default::default()
        }
    }

    /// Returns `true` if no flow is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.implicit.is_none()
            && self.password.is_none()
            && self.client_credentials.is_none()
            && self.authorization_code.is_none()
    }

    /// Iterates over the configured flows with their kind.
    pub fn iter(&self) -> impl Iterator<Item = (OAuthFlowKind, &OAuthFlow)> {
        [
            (OAuthFlowKind::Implicit, self.implicit.as_ref()),
            (OAuthFlowKind::Password, self.password.as_ref()),
            (OAuthFlowKind::ClientCredentials, self.client_credentials.as_ref()),
            (OAuthFlowKind::AuthorizationCode, self.authorization_code.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, flow)| flow.map(|flow| (kind, flow)))
    }
}

/// The kind of an OAuth2 flow, displayed as its document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OAuthFlowKind {
    /// `implicit`
    #[display("implicit")]
    Implicit,
    /// `password`
    #[display("password")]
    Password,
    /// `clientCredentials`
    #[display("clientCredentials")]
    ClientCredentials,
    /// `authorizationCode`
    #[display("authorizationCode")]
    AuthorizationCode,
}

impl OAuthFlowKind {
    /// Returns whether this flow needs an `authorizationUrl` and a `tokenUrl`.
    #[must_use]
    pub fn required_urls(self) -> (bool, bool) {
        match self {
            Self::Implicit => (true, false),
            Self::Password | Self::ClientCredentials => (false, true),
            Self::AuthorizationCode => (true, true),
        }
    }
}

/// Configuration of a single OAuth2 flow.
///
/// Which URLs are required depends on the flow the object is attached to;
/// the structure itself keeps them all optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    /// Authorization URL (implicit and authorization code flows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<Url>,
    /// Token URL (password, client credentials and authorization code flows)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<Url>,
    /// URL for obtaining refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<Url>,
    /// Available scopes, from scope name to a short description
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

impl OAuthFlow {
    /// Creates a flow with the given scopes and no URL.
    pub fn new(scopes: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            authorization_url: None,
            token_url: None,
            refresh_url: None,
            scopes: scopes
                .into_iter()
                .map(|(name, description)| (name.into(), description.into()))
                .collect(),
        }
    }

    /// Sets the authorization URL.
    #[must_use]
    pub fn with_authorization_url(mut self, url: Url) -> Self {
        self.authorization_url = Some(url);
        self
    }

    /// Sets the token URL.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Sets the refresh URL.
    #[must_use]
    pub fn with_refresh_url(mut self, url: Url) -> Self {
        self.refresh_url = Some(url);
        self
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[test]
    fn should_create_implicit_flow() {
        let flows = OAuthFlows::implicit(
            url("https://auth.example.com/authorize"),
            [("read:users", "Read user data")],
        );

        let implicit = flows.implicit.as_ref().expect("implicit flow");
        assert_eq!(
            implicit.authorization_url,
            Some(url("https://auth.example.com/authorize"))
        );
        assert_eq!(implicit.token_url, None);
        assert_eq!(
            implicit.scopes.get("read:users").map(String::as_str),
            Some("Read user data")
        );
        assert!(flows.password.is_none());
        assert!(flows.client_credentials.is_none());
        assert!(flows.authorization_code.is_none());
    }

    #[test]
    fn should_create_authorization_code_flow() {
        let flows = OAuthFlows::authorization_code(
            url("https://auth.example.com/authorize"),
            url("https://auth.example.com/token"),
            [("write:users", "Modify user data")],
        );

        let flow = flows.authorization_code.expect("authorization code flow");
        assert!(flow.authorization_url.is_some());
        assert!(flow.token_url.is_some());
        assert!(flows.implicit.is_none());
    }

    #[test]
    fn should_report_empty_flows() {
        assert!(OAuthFlows::default().is_empty());
        assert!(
            !OAuthFlows::client_credentials(url("https://auth.example.com/token"), [("a", "b")])
                .is_empty()
        );
    }

    #[test]
    fn should_iterate_configured_flows_with_kind() {
        let flows = OAuthFlows {
            password: Some(OAuthFlow::new([("x", "y")])),
            authorization_code: Some(OAuthFlow::default()),
            ..Default::default()
        };

        let kinds: Vec<_> = flows.iter().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            [OAuthFlowKind::Password, OAuthFlowKind::AuthorizationCode]
        );
        assert_eq!(OAuthFlowKind::AuthorizationCode.to_string(), "authorizationCode");
    }

    #[test]
    fn should_serialize_with_camel_case_keys() {
        let flows = OAuthFlows::client_credentials(
            url("https://auth.example.com/token"),
            [("api:read", "Read access"), ("api:write", "Write access")],
        );
        let flows = OAuthFlows {
            client_credentials: flows
                .client_credentials
                .map(|flow| flow.with_refresh_url(url("https://auth.example.com/refresh"))),
            ..flows
        };

        let json = serde_json::to_string_pretty(&flows).expect("should serialize");

        assert_snapshot!(json, @r#"
        {
          "clientCredentials": {
            "tokenUrl": "https://auth.example.com/token",
            "refreshUrl": "https://auth.example.com/refresh",
            "scopes": {
              "api:read": "Read access",
              "api:write": "Write access"
            }
          }
        }
        "#);
    }

    #[test]
    fn should_default_missing_scopes_to_empty() {
        let flow: OAuthFlow =
            serde_json::from_str(r#"{"tokenUrl": "https://auth.example.com/token"}"#)
                .expect("should deserialize");

        assert!(flow.scopes.is_empty());
        assert!(flow.authorization_url.is_none());
    }
}
