use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use contact_relay_core::error::{RelayError, UnexpectedFault};
use contact_relay_core::message::{MailRoute, OutboundEmail};
use contact_relay_core::submission::SubmissionInput;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::mail::MailTransport;
use crate::config::RelayConfig;

const COMPONENT: &str = "relay_handler";

pub const MISSING_FIELDS_ERROR: &str = "Missing required fields";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// API Gateway proxy response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Handles one API Gateway event end to end. Never fails: every fault is
/// logged here and mapped to a response.
pub fn handle_relay_event(
    event: Value,
    config: &RelayConfig,
    transport: &dyn MailTransport,
) -> RelayResponse {
    if is_preflight(&event) {
        tracing::debug!(component = COMPONENT, "preflight");
        return preflight_response();
    }

    match relay_submission(&event, &config.route, transport) {
        Ok(()) => {
            tracing::info!(component = COMPONENT, "email_sent");
            sent_response()
        }
        Err(RelayError::Client(error)) => {
            tracing::warn!(component = COMPONENT, reason = %error, "relay_rejected");
            error_response(400, json!({ "error": MISSING_FIELDS_ERROR }))
        }
        Err(RelayError::Fault(fault)) => {
            tracing::error!(component = COMPONENT, error = %fault, "relay_failed");
            error_response(
                500,
                json!({
                    "error": INTERNAL_ERROR,
                    "message": SEND_FAILED_MESSAGE,
                }),
            )
        }
    }
}

fn relay_submission(
    event: &Value,
    route: &MailRoute,
    transport: &dyn MailTransport,
) -> Result<(), RelayError> {
    let body = decode_body(event)?;
    let submission = SubmissionInput::from_body(&body)?;
    let email = OutboundEmail::for_submission(&submission, route);
    transport.send_email(&email)?;
    Ok(())
}

/// Extracts the JSON body of a proxy event. Object bodies come from direct
/// invocations and are taken as-is.
fn decode_body(event: &Value) -> Result<Value, UnexpectedFault> {
    let text = match event.get("body") {
        None | Some(Value::Null) => return Err(UnexpectedFault::MissingBody),
        Some(Value::String(text)) => text,
        Some(other) => return Ok(other.clone()),
    };

    let is_base64 = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if is_base64 {
        let bytes = BASE64
            .decode(text)
            .map_err(|error| UnexpectedFault::InvalidBase64(error.to_string()))?;
        let decoded = String::from_utf8(bytes).map_err(|_| UnexpectedFault::InvalidUtf8)?;
        parse_json(&decoded)
    } else {
        parse_json(text)
    }
}

fn parse_json(text: &str) -> Result<Value, UnexpectedFault> {
    serde_json::from_str(text).map_err(|error| UnexpectedFault::MalformedJson(error.to_string()))
}

/// REST (v1) events carry `httpMethod`, HTTP (v2) events nest it under
/// `requestContext.http.method`.
fn is_preflight(event: &Value) -> bool {
    event
        .get("httpMethod")
        .or_else(|| event.pointer("/requestContext/http/method"))
        .and_then(Value::as_str)
        .map(|method| method.eq_ignore_ascii_case("OPTIONS"))
        .unwrap_or(false)
}

pub fn response_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Headers": "Content-Type",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
    })
}

fn sent_response() -> RelayResponse {
    RelayResponse {
        status_code: 200,
        headers: response_headers(),
        body: json!({ "message": SENT_MESSAGE, "ok": true }).to_string(),
    }
}

fn preflight_response() -> RelayResponse {
    RelayResponse {
        status_code: 204,
        headers: response_headers(),
        body: String::new(),
    }
}

fn error_response(status_code: u16, payload: Value) -> RelayResponse {
    RelayResponse {
        status_code,
        headers: response_headers(),
        body: payload.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use contact_relay_core::error::MailTransportError;

    use super::*;

    struct CapturingTransport {
        emails: Mutex<Vec<OutboundEmail>>,
    }

    impl CapturingTransport {
        fn new() -> Self {
            Self {
                emails: Mutex::new(Vec::new()),
            }
        }

        fn emails(&self) -> Vec<OutboundEmail> {
            self.emails.lock().expect("poisoned mutex").clone()
        }
    }

    impl MailTransport for CapturingTransport {
        fn send_email(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
            self.emails
                .lock()
                .expect("poisoned mutex")
                .push(email.clone());
            Ok(())
        }
    }

    #[test]
    fn decodes_string_body() {
        let body = decode_body(&json!({"body": "{\"name\":\"Jo\"}"})).expect("body should parse");
        assert_eq!(body, json!({"name": "Jo"}));
    }

    #[test]
    fn decodes_base64_body() {
        let encoded = BASE64.encode("{\"name\":\"Jo\"}");
        let body = decode_body(&json!({"body": encoded, "isBase64Encoded": true}))
            .expect("body should decode");
        assert_eq!(body, json!({"name": "Jo"}));
    }

    #[test]
    fn rejects_bad_base64_and_missing_body() {
        assert!(matches!(
            decode_body(&json!({"body": "%%%", "isBase64Encoded": true})),
            Err(UnexpectedFault::InvalidBase64(_))
        ));
        assert_eq!(
            decode_body(&json!({"body": null})),
            Err(UnexpectedFault::MissingBody)
        );
        assert_eq!(
            decode_body(&json!({"httpMethod": "POST"})),
            Err(UnexpectedFault::MissingBody)
        );
    }

    #[test]
    fn accepts_object_body_from_direct_invocation() {
        let body = decode_body(&json!({"body": {"name": "Jo"}})).expect("object body");
        assert_eq!(body, json!({"name": "Jo"}));
    }

    #[test]
    fn detects_preflight_for_both_payload_versions() {
        assert!(is_preflight(&json!({"httpMethod": "OPTIONS"})));
        assert!(is_preflight(
            &json!({"requestContext": {"http": {"method": "options"}}})
        ));
        assert!(!is_preflight(&json!({"httpMethod": "POST"})));
        assert!(!is_preflight(&json!({})));
    }

    #[test]
    fn preflight_never_sends() {
        let transport = CapturingTransport::new();
        let response = handle_relay_event(
            json!({"httpMethod": "OPTIONS", "body": null}),
            &RelayConfig::default(),
            &transport,
        );

        assert_eq!(response.status_code, 204);
        assert!(response.body.is_empty());
        assert!(transport.emails().is_empty());
    }

    #[test]
    fn sends_to_configured_route() {
        let transport = CapturingTransport::new();
        let config = RelayConfig {
            route: MailRoute {
                sender: "relay@example.com".to_string(),
                recipient: "inbox@example.com".to_string(),
            },
            ..RelayConfig::default()
        };
        let response = handle_relay_event(
            json!({"body": "{\"name\":\"Jo\",\"email\":\"jo@x.com\",\"subject\":\"Hi\",\"message\":\"Test\"}"}),
            &config,
            &transport,
        );

        assert!(response.is_success());
        let emails = transport.emails();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].sender, "relay@example.com");
        assert_eq!(emails[0].recipient, "inbox@example.com");
        assert_eq!(emails[0].subject, "New Contact Form: Hi - Jo");
    }
}
