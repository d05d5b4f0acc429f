//! Semantic checks of a security scheme.
//!
//! Decoding accepts any combination of fields; this optional pass reports the
//! ones that contradict the scheme type.

use tracing::debug;

use crate::error::{SchemeViolation, ValidationError};
use crate::flows::OAuthFlows;
use crate::http_auth::HttpAuthScheme;
use crate::scheme::{SecurityScheme, SecuritySchemeType};

impl SecurityScheme {
    /// Checks that the fields are consistent with the scheme type.
    ///
    /// Required fields must be present, fields that do not apply to the type
    /// must be absent, and each OAuth2 flow must carry the URLs it needs.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violation found.
    ///
    /// # Example
    ///
    /// ```rust
    /// use oas_security::{SecurityScheme, SecuritySchemeType};
    ///
    /// assert!(SecurityScheme::bearer_jwt().validate().is_ok());
    ///
    /// let incomplete = SecurityScheme::new(SecuritySchemeType::Http);
    /// assert!(incomplete.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations = self.violations();
        if violations.is_empty() {
            return Ok(());
        }

        debug!(
            scheme_type = %self.scheme_type,
            count = violations.len(),
            "security scheme has inconsistent fields"
        );
        Err(ValidationError { violations })
    }

    /// Lists every inconsistency of this scheme.
    #[must_use]
    pub fn violations(&self) -> Vec<SchemeViolation> {
        let scheme_type = self.scheme_type;
        let mut violations = Vec::new();
        let mut check = |field: &'static str, is_set: bool, expected: bool| {
            if is_set && !expected {
                violations.push(SchemeViolation::UnexpectedField { scheme_type, field });
            } else if !is_set && expected {
                violations.push(SchemeViolation::MissingField { scheme_type, field });
            }
        };

        let is_api_key = scheme_type == SecuritySchemeType::ApiKey;
        let is_http = scheme_type == SecuritySchemeType::Http;
        let is_oauth2 = scheme_type == SecuritySchemeType::OAuth2;
        let is_oidc = scheme_type == SecuritySchemeType::OpenIdConnect;

        check("name", self.name.is_some(), is_api_key);
        check("in", self.location.is_some(), is_api_key);
        check("scheme", self.scheme.is_some(), is_http);
        // bearerFormat is optional, only reject it outside of http
        if !is_http {
            check("bearerFormat", self.bearer_format.is_some(), false);
        }
        // an empty flows object does not satisfy oauth2, but is still unexpected elsewhere
        let has_flows = if is_oauth2 {
            self.flows.as_ref().is_some_and(|flows| !flows.is_empty())
        } else {
            self.flows.is_some()
        };
        check("flows", has_flows, is_oauth2);
        check("openIdConnectUrl", self.open_id_connect_url.is_some(), is_oidc);

        if is_http
            && self.bearer_format.is_some()
            && let Some(scheme) = self
                .scheme
                .as_ref()
                .filter(|scheme| **scheme != HttpAuthScheme::BEARER)
        {
            violations.push(SchemeViolation::BearerFormatWithoutBearer {
                scheme: scheme.to_string(),
            });
        }

        if is_oauth2 && let Some(flows) = &self.flows {
            violations.extend(flow_violations(flows));
        }

        violations
    }
}

fn flow_violations(flows: &OAuthFlows) -> impl Iterator<Item = SchemeViolation> + '_ {
    flows.iter().flat_map(|(flow, config)| {
        let (needs_authorization_url, needs_token_url) = flow.required_urls();
        let missing_authorization_url = (needs_authorization_url
            && config.authorization_url.is_none())
        .then_some(SchemeViolation::MissingFlowUrl {
            flow,
            field: "authorizationUrl",
        });
        let missing_token_url = (needs_token_url && config.token_url.is_none()).then_some(
            SchemeViolation::MissingFlowUrl {
                flow,
                field: "tokenUrl",
            },
        );
        missing_authorization_url.into_iter().chain(missing_token_url)
    })
}
