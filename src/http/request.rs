//! Forward request envelope parsing.
//!
//! # Responsibilities
//! - Parse the inbound JSON envelope
//! - Check every field against the fixed shape
//! - Produce a typed [`ForwardRequest`] or every field problem at once
//!
//! # Design Decisions
//! - Parse, don't validate: nothing downstream re-checks the envelope
//! - Unknown fields are ignored
//! - Runs before authentication

use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Verbs a caller may ask the relay to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl ForwardMethod {
    pub const ALL: [ForwardMethod; 5] = [
        ForwardMethod::Get,
        ForwardMethod::Post,
        ForwardMethod::Patch,
        ForwardMethod::Put,
        ForwardMethod::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ForwardMethod::Get => "GET",
            ForwardMethod::Post => "POST",
            ForwardMethod::Patch => "PATCH",
            ForwardMethod::Put => "PUT",
            ForwardMethod::Delete => "DELETE",
        }
    }

    /// Case-exact lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == raw)
    }

    pub fn to_method(self) -> Method {
        match self {
            ForwardMethod::Get => Method::GET,
            ForwardMethod::Post => Method::POST,
            ForwardMethod::Patch => Method::PATCH,
            ForwardMethod::Put => Method::PUT,
            ForwardMethod::Delete => Method::DELETE,
        }
    }
}

/// A validated description of the outbound call.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: ForwardMethod,
    pub url: Url,
    pub headers: HeaderMap,
    /// `None` means no payload at all.
    pub body: Option<String>,
    pub session_id: String,
}

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Every problem found in an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid forward request: {}", summary(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Field name used for problems with the envelope as a whole.
const ROOT: &str = "$";

impl ForwardRequest {
    /// Parse raw bytes into a request.
    pub fn from_json(raw: &[u8]) -> Result<Self, ValidationErrors> {
        let value: Value = serde_json::from_slice(raw).map_err(|e| {
            ValidationErrors(vec![FieldError::new(ROOT, format!("malformed JSON: {}", e))])
        })?;
        let Value::Object(object) = value else {
            return Err(ValidationErrors(vec![FieldError::new(
                ROOT,
                "expected a JSON object",
            )]));
        };
        Self::from_object(&object)
    }

    fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        let method = collect(&mut errors, parse_method(object.get("method")));
        let url = collect(&mut errors, parse_url(object.get("url")));
        let headers = match parse_headers(object.get("headers")) {
            Ok(h) => Some(h),
            Err(mut e) => {
                errors.append(&mut e);
                None
            }
        };
        let body = collect(&mut errors, parse_body(object.get("body")));
        let session_id = collect(&mut errors, parse_session_id(object.get("sessionId")));

        match (method, url, headers, body, session_id) {
            (Some(method), Some(url), Some(headers), Some(body), Some(session_id))
                if errors.is_empty() =>
            {
                Ok(ForwardRequest {
                    method,
                    url,
                    headers,
                    body,
                    session_id,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn collect<T>(errors: &mut Vec<FieldError>, result: Result<T, FieldError>) -> Option<T> {
    result.map_err(|e| errors.push(e)).ok()
}

fn required_str<'a>(field: &str, value: Option<&'a Value>) -> Result<&'a str, FieldError> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(FieldError::new(
            field,
            format!("expected string, received {}", kind(other)),
        )),
        None => Err(FieldError::new(field, "required")),
    }
}

fn parse_method(value: Option<&Value>) -> Result<ForwardMethod, FieldError> {
    let raw = required_str("method", value)?;
    ForwardMethod::parse(raw).ok_or_else(|| {
        let allowed: Vec<_> = ForwardMethod::ALL.iter().map(|m| m.as_str()).collect();
        FieldError::new(
            "method",
            format!("expected one of {}, received {:?}", allowed.join("|"), raw),
        )
    })
}

fn parse_url(value: Option<&Value>) -> Result<Url, FieldError> {
    let raw = required_str("url", value)?;
    let url = Url::parse(raw).map_err(|e| FieldError::new("url", format!("invalid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FieldError::new(
            "url",
            format!("unsupported scheme {:?}", url.scheme()),
        ));
    }
    if !url.has_host() {
        return Err(FieldError::new("url", "missing host"));
    }
    Ok(url)
}

fn parse_headers(value: Option<&Value>) -> Result<HeaderMap, Vec<FieldError>> {
    let object = match value {
        Some(Value::Object(object)) => object,
        Some(other) => {
            return Err(vec![FieldError::new(
                "headers",
                format!("expected object, received {}", kind(other)),
            )])
        }
        None => return Err(vec![FieldError::new("headers", "required")]),
    };

    let mut headers = HeaderMap::with_capacity(object.len());
    let mut errors = Vec::new();

    for (name, value) in object {
        let field = format!("headers.{}", name);
        let Value::String(value) = value else {
            errors.push(FieldError::new(
                field,
                format!("expected string, received {}", kind(value)),
            ));
            continue;
        };
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            errors.push(FieldError::new(field, "invalid header name"));
            continue;
        };
        let Ok(header_value) = HeaderValue::from_str(value) else {
            errors.push(FieldError::new(field, "invalid header value"));
            continue;
        };
        headers.insert(header_name, header_value);
    }

    if errors.is_empty() {
        Ok(headers)
    } else {
        Err(errors)
    }
}

fn parse_body(value: Option<&Value>) -> Result<Option<String>, FieldError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(FieldError::new(
            "body",
            format!("expected string or null, received {}", kind(other)),
        )),
    }
}

fn parse_session_id(value: Option<&Value>) -> Result<String, FieldError> {
    let raw = required_str("sessionId", value)?;
    if raw.is_empty() {
        return Err(FieldError::new("sessionId", "must not be empty"));
    }
    Ok(raw.to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
