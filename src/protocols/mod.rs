//! Protocol clients for talking to WHOIS authorities.
//!
//! Two wire modes exist, chosen by the authority's address prefix: classic
//! port-43 WHOIS over TCP (with referral chasing for thin-registry TLDs)
//! and WHOIS-over-HTTP for registries that only publish replies on the web.

/// Classic WHOIS-over-TCP client
pub mod whois;

/// WHOIS-over-HTTP client
pub mod http;

// Re-export commonly used types
pub use http::HttpWhoisClient;
pub use whois::WhoisClient;
