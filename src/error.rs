//! Error handling for WHOIS lookup operations.
//!
//! This module defines the error type covering the different ways a lookup
//! can fail, from invalid input to network issues. Only domain syntax errors
//! are fatal at construction time; every later-stage failure is converted by
//! the orchestrator into a descriptive return value.

use std::fmt;
use std::time::Duration;

/// Main error type for WHOIS lookup operations.
#[derive(Debug, Clone)]
pub enum WhoisLookupError {
    /// The raw domain string does not match either accepted grammar.
    /// This is the only construction-time, fatal error.
    InvalidDomainSyntax { domain: String },

    /// The subdomain label fails the strict registrability check.
    InvalidDomain { domain: String, reason: String },

    /// The registry has no usable authority for this TLD.
    NoAuthority { tld: String },

    /// A connection could not be established or a transfer failed.
    /// Surfaced to callers as the literal `"Connection error!"`.
    ConnectionFailure { message: String },

    /// A `.com`/`.net` first-hop reply carried no `whois server` referral
    /// line, so there is no thick registry to query.
    NoReferral { tld: String },

    /// Timeout on a connect, read, or HTTP exchange.
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// Field extraction or availability classification failed.
    Extraction { message: String },

    /// The registry source could not be parsed.
    Registry { message: String },
}

impl WhoisLookupError {
    /// Create a new invalid-syntax error.
    pub fn invalid_syntax<D: Into<String>>(domain: D) -> Self {
        Self::InvalidDomainSyntax {
            domain: domain.into(),
        }
    }

    /// Create a new invalid-domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new no-authority error.
    pub fn no_authority<T: Into<String>>(tld: T) -> Self {
        Self::NoAuthority { tld: tld.into() }
    }

    /// Create a new connection failure.
    pub fn connection<M: Into<String>>(message: M) -> Self {
        Self::ConnectionFailure {
            message: message.into(),
        }
    }

    /// Create a new missing-referral error.
    pub fn no_referral<T: Into<String>>(tld: T) -> Self {
        Self::NoReferral { tld: tld.into() }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new extraction error.
    pub fn extraction<M: Into<String>>(message: M) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Create a new registry error.
    pub fn registry<M: Into<String>>(message: M) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Check if this error is a transport-level failure that the
    /// orchestrator surfaces as `"Connection error!"`.
    pub fn is_connection_failure(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailure { .. } | Self::Timeout { .. }
        )
    }
}

impl fmt::Display for WhoisLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomainSyntax { domain } => {
                write!(f, "Invalid domain syntax: '{}'", domain)
            }
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::NoAuthority { tld } => {
                write!(f, "No WHOIS authority for TLD '{}'", tld)
            }
            Self::ConnectionFailure { message } => {
                write!(f, "Connection failure: {}", message)
            }
            Self::NoReferral { tld } => {
                write!(f, "No referral server in first-hop reply for TLD '{}'", tld)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Extraction { message } => {
                write!(f, "Extraction error: {}", message)
            }
            Self::Registry { message } => {
                write!(f, "Registry error: {}", message)
            }
        }
    }
}

impl std::error::Error for WhoisLookupError {}

// Implement From conversions for common error types
impl From<std::io::Error> for WhoisLookupError {
    fn from(err: std::io::Error) -> Self {
        Self::connection(err.to_string())
    }
}

impl From<serde_json::Error> for WhoisLookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::registry(format!("JSON parsing failed: {}", err))
    }
}

impl From<regex::Error> for WhoisLookupError {
    fn from(err: regex::Error) -> Self {
        Self::extraction(format!("Pattern error: {}", err))
    }
}
