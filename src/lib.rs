//! # WHOIS Lookup Library
//!
//! A library for resolving registration metadata of a fully-qualified
//! domain name by querying the appropriate WHOIS (or WHOIS-over-HTTP)
//! authority and extracting structured facts from the unstructured reply.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use whois_lookup::{ServerRegistry, WhoisLookup};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lookup = WhoisLookup::new("example.com", ServerRegistry::builtin())?;
//!
//!     println!("available: {}", lookup.is_available().await);
//!     let report = lookup.data().await;
//!     println!("status: {} ({})", report.status_code(), report.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Parser → registry lookup → protocol client → normalizer →
//! extractor/classifier. Each stage's output is the next stage's sole
//! input; no stage keeps cross-call state. Every public operation re-runs
//! the full pipeline, so concurrency across lookups is entirely the
//! caller's business: instances are independent, and the injected
//! `ServerRegistry` is read-only and cheap to share.
//!
//! ## Failure policy
//!
//! Only domain syntax errors are fatal (at construction). Everything later
//! (missing authorities, refused connections, unparseable replies) is
//! converted into a descriptive return value, because callers treat this
//! as a best-effort informational lookup, not a transactional operation.

// Re-export main public API types and functions
pub use domain::ParsedDomain;
pub use error::WhoisLookupError;
pub use lookup::WhoisLookup;
pub use registry::{Authority, ServerRegistry};
pub use response::{detect_encoding, to_utf8, DetectedEncoding};
pub use types::{
    LookupConfig, LookupReport, LookupStatus, RegistrarInfo, WhoisData, MSG_CONNECTION_ERROR,
    MSG_INVALID_DOMAIN, MSG_NO_REFERRAL, MSG_NO_SERVER,
};

// Internal modules
mod domain;
mod error;
mod extract;
mod lookup;
mod protocols;
mod registry;
mod response;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, WhoisLookupError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
