use crate::flows::OAuthFlowKind;
use crate::scheme::SecuritySchemeType;

/// Errors that can occur when reading or writing a security scheme document.
///
/// Decoding is the only operation that can fail on user input: building and
/// encoding a [`SecurityScheme`](crate::SecurityScheme) never fail in practice.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum CodecError {
    /// The document does not describe a valid security scheme.
    ///
    /// Occurs on malformed structure, a missing `type` field, or a `type`/`in`
    /// value outside of the allowed set. The `path` points to the offending field.
    #[display("Failed to decode security scheme at '{path}': {error}")]
    #[from(skip)]
    Decode {
        /// Dotted path of the offending field, `.` for the document root.
        path: String,
        /// The underlying decoding error.
        error: serde_json::Error,
    },

    /// The YAML document does not describe a valid security scheme.
    ///
    /// Covers YAML syntax errors and the same structural failures as
    /// [`CodecError::Decode`]; the error carries the location in the document.
    #[cfg(feature = "yaml")]
    #[display("Failed to decode YAML security scheme: {_0}")]
    #[from(skip)]
    Yaml(serde_saphyr::Error),

    /// JSON serialization error.
    ///
    /// Occurs when writing the security scheme as JSON.
    Encode(serde_json::Error),

    /// YAML serialization error.
    ///
    /// Occurs when writing the security scheme as YAML.
    #[cfg(feature = "yaml")]
    YamlEncode(serde_saphyr::ser_error::Error),
}

/// A security scheme that is structurally valid but semantically inconsistent.
///
/// Returned by [`SecurityScheme::validate`](crate::SecurityScheme::validate)
/// and by the conversion into utoipa types.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
#[display("Invalid security scheme: {}", display_violations(violations))]
pub struct ValidationError {
    /// Every problem found, in field order.
    #[error(not(source))]
    pub violations: Vec<SchemeViolation>,
}

impl ValidationError {
    pub(crate) fn single(violation: SchemeViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

fn display_violations(violations: &[SchemeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single inconsistency found in a security scheme.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SchemeViolation {
    /// A field required by the scheme type is absent.
    #[display("'{field}' is required for '{scheme_type}' security schemes")]
    MissingField {
        /// The scheme type.
        scheme_type: SecuritySchemeType,
        /// Document key of the missing field.
        field: &'static str,
    },

    /// A field that does not apply to the scheme type is set.
    #[display("'{field}' does not apply to '{scheme_type}' security schemes")]
    UnexpectedField {
        /// The scheme type.
        scheme_type: SecuritySchemeType,
        /// Document key of the unexpected field.
        field: &'static str,
    },

    /// `bearerFormat` is set while the HTTP scheme is not `bearer`.
    #[display("'bearerFormat' only applies to the 'bearer' scheme, got '{scheme}'")]
    BearerFormatWithoutBearer {
        /// The HTTP scheme actually used.
        scheme: String,
    },

    /// An OAuth2 flow lacks one of its required URLs.
    #[display("'{field}' is required for the '{flow}' OAuth2 flow")]
    MissingFlowUrl {
        /// The flow lacking the URL.
        flow: OAuthFlowKind,
        /// Document key of the missing URL.
        field: &'static str,
    },

    /// utoipa cannot represent the scheme.
    #[display("security scheme cannot be represented with utoipa: {reason}")]
    Unrepresentable {
        /// Why the conversion failed.
        reason: String,
    },

    /// The HTTP scheme has no utoipa equivalent.
    #[display("HTTP authentication scheme '{scheme}' is not supported by utoipa")]
    UnsupportedHttpScheme {
        /// The HTTP scheme token.
        scheme: String,
    },
}
