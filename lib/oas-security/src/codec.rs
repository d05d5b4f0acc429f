//! Reading and writing security scheme documents.
//!
//! Decoding tracks the path of the field being read, so a failure names the
//! offending key:
//!
//! ```rust
//! use oas_security::{CodecError, SecurityScheme};
//!
//! let error = SecurityScheme::from_json(r#"{"type": "kerberos"}"#).unwrap_err();
//! assert!(matches!(error, CodecError::Decode { ref path, .. } if path == "type"));
//! ```
//!
//! YAML support requires the `yaml` feature.

use tracing::{debug, warn};

use crate::error::CodecError;
use crate::scheme::SecurityScheme;

impl SecurityScheme {
    /// Reads a security scheme from a JSON document.
    ///
    /// Absent optional fields are left unset. Fields that do not apply to the
    /// scheme type are kept as they are, see [`SecurityScheme::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] if the document is malformed, lacks the
    /// `type` field, or holds an unknown `type` or `in` value.
    pub fn from_json(json: &str) -> Result<Self, CodecError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let scheme = decode(&mut deserializer)?;
        deserializer.end().map_err(|error| CodecError::Decode {
            path: ".".to_string(),
            error,
        })?;
        Ok(scheme)
    }

    /// Reads a security scheme from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`SecurityScheme::from_json`].
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, CodecError> {
        decode(value)
    }

    /// Writes this security scheme as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CodecError> {
        let json = serde_json::to_string(self)?;
        Ok(json)
    }

    /// Writes this security scheme as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }

    /// Reads a security scheme from a YAML document.
    ///
    /// Unquoted scalars are read as text where the field expects text, so
    /// `name: 123` gives the name `"123"`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Yaml`] if the text is not YAML, or for the same
    /// reasons as [`SecurityScheme::from_json`]; the error carries the location.
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, CodecError> {
        let scheme: Self = serde_saphyr::from_str(yaml).map_err(|err| {
            warn!(error = %err, "failed to decode YAML security scheme");
            CodecError::Yaml(err)
        })?;
        debug!(scheme_type = %scheme.scheme_type, "security scheme decoded");
        Ok(scheme)
    }

    /// Writes this security scheme as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::YamlEncode`] if serialization fails.
    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> Result<String, CodecError> {
        let yaml = serde_saphyr::to_string(self)?;
        Ok(yaml)
    }
}

fn decode<'de, D>(deserializer: D) -> Result<SecurityScheme, CodecError>
where
    D: serde::Deserializer<'de, Error = serde_json::Error>,
{
    let scheme: SecurityScheme = serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        warn!(%path, error = %err.inner(), "failed to decode security scheme");
        CodecError::Decode {
            path,
            error: err.into_inner(),
        }
    })?;
    debug!(scheme_type = %scheme.scheme_type, "security scheme decoded");
    Ok(scheme)
}
