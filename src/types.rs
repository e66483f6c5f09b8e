//! Core data types for WHOIS lookups.
//!
//! This module defines the structures shared across the lookup pipeline:
//! the terminal report returned by `data()`, the typed field bag extracted
//! from reply text, and the per-lookup configuration.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Literal string surfaced when a connection cannot be established on any hop.
pub const MSG_CONNECTION_ERROR: &str = "Connection error!";

/// Literal string surfaced when the registry has no authority for the TLD.
pub const MSG_NO_SERVER: &str = "No whois server for this tld in list!";

/// Literal string surfaced when the domain fails the registrability check.
pub const MSG_INVALID_DOMAIN: &str = "Domain name isn't valid!";

/// Literal string surfaced when a `.com`/`.net` first hop carries no referral.
pub const MSG_NO_REFERRAL: &str = "No referral server found!";

/// Terminal classification of a lookup.
///
/// Serialized as its integer code: -1 exception, 0 error/no data,
/// 1 found, 2 not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus {
    /// An internal failure was caught during extraction.
    Exception,
    /// Default state: nothing could be extracted or classified.
    Error,
    /// The domain is registered and at least one field was extracted.
    Found,
    /// The registry's not-found signature matched the reply.
    NotFound,
}

impl LookupStatus {
    /// Numeric status code used in serialized reports.
    pub fn code(&self) -> i8 {
        match self {
            Self::Exception => -1,
            Self::Error => 0,
            Self::Found => 1,
            Self::NotFound => 2,
        }
    }

    /// Canonical message string paired with this status.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Exception => "exception",
            Self::Error => "error",
            Self::Found => "found",
            Self::NotFound => "not_found",
        }
    }
}

impl Serialize for LookupStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.code())
    }
}

impl<'de> Deserialize<'de> for LookupStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match i8::deserialize(deserializer)? {
            -1 => Ok(Self::Exception),
            0 => Ok(Self::Error),
            1 => Ok(Self::Found),
            2 => Ok(Self::NotFound),
            other => Err(D::Error::custom(format!(
                "invalid lookup status code: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Registrar sub-record extracted from a WHOIS reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrarInfo {
    /// Registrar display name ("Registrar:" line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// IANA-assigned registrar id ("Registrar IANA ID:" line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Structured fields extracted from a WHOIS reply.
///
/// Every known field is explicitly optional; absence means the marker never
/// appeared in the reply. Name servers preserve discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WhoisData {
    /// When the domain was first registered ("Creation Date:" line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,

    /// When the registration expires ("Registry Expiry Date:" line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,

    /// Last update of the record ("Updated Date:" line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_date: Option<String>,

    /// Registry-assigned domain id ("Registry Domain ID:" line)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_domain_id: Option<String>,

    /// Registrar sub-record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<RegistrarInfo>,

    /// Name servers in the order they appeared in the reply
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub name_servers: Vec<String>,
}

impl WhoisData {
    /// True if no field was captured from the reply.
    pub fn is_empty(&self) -> bool {
        self.creation_date.is_none()
            && self.expiration_date.is_none()
            && self.update_date.is_none()
            && self.registry_domain_id.is_none()
            && self.registrar.is_none()
            && self.name_servers.is_empty()
    }
}

/// Result of a `data()` call: a status, its message, and the extracted fields.
///
/// Built once per call, never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupReport {
    /// Terminal status (-1 exception, 0 error, 1 found, 2 not_found)
    pub status: LookupStatus,

    /// Message paired with the status
    pub message: String,

    /// Extracted fields (empty unless status is `Found`)
    pub data: WhoisData,
}

impl LookupReport {
    fn with_status(status: LookupStatus, data: WhoisData) -> Self {
        Self {
            status,
            message: status.message().to_string(),
            data,
        }
    }

    /// Default report: nothing extracted, nothing classified.
    pub fn error() -> Self {
        Self::with_status(LookupStatus::Error, WhoisData::default())
    }

    /// Report for a caught internal failure.
    pub fn exception() -> Self {
        Self::with_status(LookupStatus::Exception, WhoisData::default())
    }

    /// Report for a reply matching the registry's not-found signature.
    pub fn not_found() -> Self {
        Self::with_status(LookupStatus::NotFound, WhoisData::default())
    }

    /// Report for a registered domain with at least one extracted field.
    pub fn found(data: WhoisData) -> Self {
        Self::with_status(LookupStatus::Found, data)
    }

    /// Numeric status code, mirroring the serialized form.
    pub fn status_code(&self) -> i8 {
        self.status.code()
    }
}

/// Configuration options for a lookup.
///
/// Each network hop gets an explicit deadline; raw socket reads are never
/// unbounded.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Deadline for establishing a TCP connection to a WHOIS authority.
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Deadline for reading a full socket reply (peer-close terminated).
    /// Default: 30 seconds
    pub read_timeout: Duration,

    /// Total timeout for a WHOIS-over-HTTP exchange.
    /// Default: 60 seconds
    pub http_timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            http_timeout: Duration::from_secs(60),
        }
    }
}

impl LookupConfig {
    /// Set the TCP connect deadline.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the socket read deadline.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the HTTP exchange timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }
}
