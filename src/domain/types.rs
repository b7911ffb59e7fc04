/// Core types used when querying tickets
///
/// This module defines the status filter and page-size types that a ticket
/// query is built from. Both are validated on construction so the rest of the
/// server never sees an out-of-range value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::DomainError;

/// Status filter accepted by the `get-linear-tickets` tool
///
/// These are coarse buckets, not Linear workflow state names. The Linear
/// client decides which workflow state types each bucket covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Work that is not finished yet
    Active,
    /// Work that is done
    Completed,
    /// Work that was dropped
    Canceled,
}

impl TicketStatus {
    /// Every accepted status, in the order the tool schema advertises them
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Active,
        TicketStatus::Completed,
        TicketStatus::Canceled,
    ];

    /// Parse a status from its wire name
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "active" => Ok(TicketStatus::Active),
            "completed" => Ok(TicketStatus::Completed),
            "canceled" => Ok(TicketStatus::Canceled),
            other => Err(DomainError::InvalidStatus(format!(
                "Invalid status '{}'. Valid options: active, completed, canceled",
                other
            ))),
        }
    }

    /// Wire name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Active => "active",
            TicketStatus::Completed => "completed",
            TicketStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum number of tickets to fetch in one request
///
/// A single bounded page: always between [`TicketLimit::MIN`] and
/// [`TicketLimit::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TicketLimit(u8);

impl TicketLimit {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 50;
    pub const DEFAULT: u8 = 10;

    /// Create a limit, rejecting anything outside 1..=50
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < Self::MIN as i64 || value > Self::MAX as i64 {
            return Err(DomainError::InvalidLimit(format!(
                "Limit must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for TicketLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for TicketLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
