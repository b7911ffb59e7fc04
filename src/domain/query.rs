/// Validated input for the `get-linear-tickets` tool
///
/// The MCP layer hands tools a loose map of JSON values. `TicketQuery` is the
/// typed form of that map; building one is the only validation step, and it
/// runs before any Linear client exists.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::domain::{DomainError, TicketLimit, TicketStatus};

/// A ticket query that has passed validation
#[derive(Clone, PartialEq, Eq)]
pub struct TicketQuery {
    /// Linear API key, non-blank
    pub api_key: String,
    /// Optional status bucket; `None` means every status
    pub status: Option<TicketStatus>,
    /// Page size
    pub limit: TicketLimit,
}

impl TicketQuery {
    /// Build a query from raw tool arguments
    ///
    /// `apiKey` is checked first so a request without credentials is always
    /// reported as such, whatever else is wrong with it. Explicit `null` for an
    /// optional field is treated the same as leaving it out.
    pub fn from_arguments(args: &HashMap<String, Value>) -> Result<Self, DomainError> {
        let api_key = match args.get("apiKey").and_then(|v| v.as_str()) {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => return Err(DomainError::MissingApiKey),
        };

        let status = match args.get("status") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(TicketStatus::parse(s)?),
            Some(other) => {
                return Err(DomainError::InvalidStatus(format!(
                    "Status must be a string, got {}",
                    other
                )))
            }
        };

        let limit = match args.get("limit") {
            None | Some(Value::Null) => TicketLimit::default(),
            Some(value) => TicketLimit::new(integer_value(value).ok_or_else(|| {
                DomainError::InvalidLimit(format!(
                    "Limit must be an integer between {} and {}, got {}",
                    TicketLimit::MIN,
                    TicketLimit::MAX,
                    value
                ))
            })?)?,
        };

        Ok(Self {
            api_key,
            status,
            limit,
        })
    }
}

/// Accept JSON integers, and floats with no fractional part (`5.0`)
fn integer_value(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Some(f as i64),
        _ => None,
    }
}

// The API key stays out of logs and panic messages.
impl fmt::Debug for TicketQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketQuery")
            .field("api_key", &"<redacted>")
            .field("status", &self.status)
            .field("limit", &self.limit)
            .finish()
    }
}
