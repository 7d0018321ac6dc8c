//! SAML login-redirect construction and assertion consumption.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use w3gate_core::config::idp::IdpConfig;
use w3gate_core::error::{AppError, ErrorKind};
use w3gate_core::result::AppResult;

/// The fixed identity record adapted from a validated provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAssertion {
    /// Principal identifier (the assertion's NameID).
    pub user_id: String,
    /// Provider-issued session index for this login.
    pub session_id: String,
    /// When the provider says this session ends.
    pub expires_at: DateTime<Utc>,
}

/// Builds login redirects and consumes provider assertions.
///
/// Holds the immutable provider configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct AssertionConsumer {
    config: IdpConfig,
}

impl AssertionConsumer {
    /// Create an adapter from the identity-provider configuration.
    pub fn new(config: IdpConfig) -> Self {
        Self { config }
    }

    /// Build the redirect URL that starts a login at the identity provider.
    ///
    /// Encodes a SAML AuthnRequest with the redirect binding
    /// (deflate + base64 + percent-encoding).
    pub fn login_redirect_url(&self) -> AppResult<String> {
        let request_id = format!("_id{}", uuid::Uuid::new_v4());
        let issue_instant = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let authn_request = format!(
            r#"<samlp:AuthnRequest xmlns:samlp="urn:oasis:names:tc:SAML:2.0:protocol"
                xmlns:saml="urn:oasis:names:tc:SAML:2.0:assertion"
                ID="{}"
                Version="2.0"
                IssueInstant="{}"
                Destination="{}"
                AssertionConsumerServiceURL="{}">
                <saml:Issuer>{}</saml:Issuer>
            </samlp:AuthnRequest>"#,
            request_id,
            issue_instant,
            self.config.login_url,
            self.config.acs_url,
            self.config.entity_id
        );

        let encoded = deflate_and_encode(&authn_request)?;

        let url = format!(
            "{}?SAMLRequest={}",
            self.config.login_url,
            urlencoding::encode(&encoded)
        );

        debug!(url = %url, "Created login-redirect URL");
        Ok(url)
    }

    /// Validate an inbound provider response and extract the identity.
    ///
    /// The specific failure cause is logged but never surfaced to the
    /// caller; every failure maps to the same opaque error.
    pub fn consume_response(&self, raw: &str, now: DateTime<Utc>) -> AppResult<IdentityAssertion> {
        match self.parse_response(raw, now) {
            Ok(assertion) => {
                info!(user_id = %assertion.user_id, "Provider assertion validated");
                Ok(assertion)
            }
            Err(err) => {
                warn!(error = %err, "Provider assertion validation failed");
                Err(AppError::external_service(
                    "Identity-provider assertion could not be validated",
                ))
            }
        }
    }

    fn parse_response(&self, raw: &str, now: DateTime<Utc>) -> AppResult<IdentityAssertion> {
        let response_xml = BASE64
            .decode(raw)
            .map_err(|e| validation("Failed to decode provider response", e))?;
        let response_str = String::from_utf8(response_xml)
            .map_err(|e| validation("Provider response is not valid UTF-8", e))?;

        let response: samael::schema::Response = response_str
            .parse()
            .map_err(|_| AppError::validation("Failed to parse provider response"))?;

        if let Some(ref status) = response.status {
            let status_value = status.status_code.value.as_deref();
            if status_value != Some("urn:oasis:names:tc:SAML:2.0:status:Success") {
                return Err(AppError::validation(format!(
                    "Provider reported non-success status: {}",
                    status_value.unwrap_or("unknown")
                )));
            }
        }

        let assertion = response
            .assertion
            .as_ref()
            .ok_or_else(|| AppError::validation("Provider response contains no assertion"))?;

        let skew = Duration::seconds(self.config.clock_skew_seconds);
        if let Some(ref conditions) = assertion.conditions {
            if let Some(not_before) = conditions.not_before {
                if now < not_before - skew {
                    return Err(AppError::validation("Assertion not yet valid"));
                }
            }
            if let Some(not_on_or_after) = conditions.not_on_or_after {
                if now >= not_on_or_after + skew {
                    return Err(AppError::validation("Assertion has expired"));
                }
            }
        }

        let subject = assertion
            .subject
            .as_ref()
            .ok_or_else(|| AppError::validation("Assertion missing subject"))?;
        let name_id = subject
            .name_id
            .as_ref()
            .ok_or_else(|| AppError::validation("Assertion missing NameID"))?;
        let user_id = name_id.value.clone();

        let authn_statement = assertion
            .authn_statements
            .as_ref()
            .and_then(|stmts| stmts.first());

        let session_id = authn_statement
            .and_then(|s| s.session_index.clone())
            .ok_or_else(|| AppError::validation("Assertion missing session index"))?;

        let expires_at = authn_statement
            .and_then(|s| s.session_not_on_or_after)
            .or_else(|| {
                assertion
                    .conditions
                    .as_ref()
                    .and_then(|c| c.not_on_or_after)
            })
            .ok_or_else(|| AppError::validation("Assertion carries no session expiration"))?;

        Ok(IdentityAssertion {
            user_id,
            session_id,
            expires_at,
        })
    }
}

fn validation(message: &str, source: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(ErrorKind::Validation, message, source)
}

/// Deflate and base64 encode for the SAML redirect binding.
fn deflate_and_encode(xml: &str) -> AppResult<String> {
    use std::io::Write;

    let mut encoder =
        flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(xml.as_bytes())
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode request", e))?;
    let compressed = encoder
        .finish()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to encode request", e))?;
    Ok(BASE64.encode(compressed))
}
