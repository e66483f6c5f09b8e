//! Lookup orchestrator.
//!
//! `WhoisLookup` wires the pipeline together: parse, registry lookup,
//! protocol exchange, normalization, extraction. One instance is one
//! domain; every public operation independently re-runs the full pipeline,
//! so there is no shared state between calls and no cache. Calling several
//! accessors issues several network round-trips by design.

use crate::domain::ParsedDomain;
use crate::error::WhoisLookupError;
use crate::extract;
use crate::protocols::{HttpWhoisClient, WhoisClient};
use crate::registry::{Authority, ServerRegistry};
use crate::response;
use crate::types::{
    LookupConfig, LookupReport, MSG_CONNECTION_ERROR, MSG_INVALID_DOMAIN, MSG_NO_REFERRAL,
    MSG_NO_SERVER,
};
use tracing::{debug, warn};

/// A single-domain WHOIS lookup session.
///
/// Construction is the only fatal step: a domain that matches neither
/// accepted grammar is rejected with `InvalidDomainSyntax` and no instance
/// exists. Every later failure is converted into a descriptive return value
/// because callers treat this as a best-effort informational lookup.
///
/// # Example
///
/// ```rust,no_run
/// use whois_lookup::{ServerRegistry, WhoisLookup};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let lookup = WhoisLookup::new("example.com", ServerRegistry::builtin())?;
///     println!("{}", lookup.info().await);
///     println!("available: {}", lookup.is_available().await);
///     Ok(())
/// }
/// ```
pub struct WhoisLookup {
    parsed: ParsedDomain,
    registry: ServerRegistry,
    config: LookupConfig,
}

impl WhoisLookup {
    /// Create a lookup session for a fully-qualified domain name
    /// (without trailing dot).
    ///
    /// # Errors
    ///
    /// `InvalidDomainSyntax` when the domain matches neither the Unicode
    /// nor the punycode grammar.
    pub fn new<D: AsRef<str>>(domain: D, registry: ServerRegistry) -> Result<Self, WhoisLookupError> {
        Self::with_config(domain, registry, LookupConfig::default())
    }

    /// Create a lookup session with custom network deadlines.
    pub fn with_config<D: AsRef<str>>(
        domain: D,
        registry: ServerRegistry,
        config: LookupConfig,
    ) -> Result<Self, WhoisLookupError> {
        let parsed = ParsedDomain::parse(domain.as_ref())?;
        Ok(Self {
            parsed,
            registry,
            config,
        })
    }

    /// Full lowercased domain name.
    pub fn domain(&self) -> &str {
        self.parsed.domain()
    }

    /// TLD suffix (dot-separated groups after the first label).
    pub fn tlds(&self) -> &str {
        self.parsed.tld()
    }

    /// Subdomain label (lowest-level label).
    pub fn sub_domain(&self) -> &str {
        self.parsed.sub_domain()
    }

    /// Whether a lookup may proceed at all: the subdomain label passes the
    /// strict registrability check AND the registry resolves the TLD to a
    /// non-trivial server address. No network I/O happens here.
    pub fn is_valid(&self) -> bool {
        match self.registry.lookup(self.parsed.tld()) {
            Some(authority) if authority.is_usable() => self.parsed.label_is_registrable(),
            _ => false,
        }
    }

    /// Raw (HTML-escaped) WHOIS reply text.
    ///
    /// Returns one of the literal sentinel strings instead when the lookup
    /// cannot produce reply text: `"Domain name isn't valid!"`,
    /// `"No whois server for this tld in list!"`, `"Connection error!"`,
    /// or `"No referral server found!"`.
    pub async fn info(&self) -> String {
        if !self.parsed.label_is_registrable() {
            return MSG_INVALID_DOMAIN.to_string();
        }

        let authority = match self.registry.lookup(self.parsed.tld()) {
            // Absent entry: the TLD is not recognized at all.
            None => return MSG_INVALID_DOMAIN.to_string(),
            // Known TLD with no authority on record.
            Some(authority) if !authority.has_server() => return MSG_NO_SERVER.to_string(),
            // A server string this short cannot name a real authority.
            Some(authority) if !authority.is_usable() => return MSG_INVALID_DOMAIN.to_string(),
            Some(authority) => authority.clone(),
        };

        match self.exchange(&authority).await {
            Ok(text) => response::escape_html(&text),
            Err(WhoisLookupError::NoReferral { .. }) => MSG_NO_REFERRAL.to_string(),
            Err(e) => {
                warn!(domain = self.parsed.domain(), error = %e, "lookup failed");
                MSG_CONNECTION_ERROR.to_string()
            }
        }
    }

    /// `info()` with `<br />` inserted before newlines for display.
    pub async fn html_info(&self) -> String {
        response::nl2br(&self.info().await)
    }

    /// Structured report: status, message, and extracted fields.
    ///
    /// Extraction runs only when the registry configures a not-found
    /// signature for the TLD and the signature did not match. Internal
    /// failures are caught and reported as the `exception` status, never
    /// propagated.
    pub async fn data(&self) -> LookupReport {
        match self.try_data().await {
            Ok(report) => report,
            Err(e) => {
                warn!(domain = self.parsed.domain(), error = %e, "data extraction failed");
                LookupReport::exception()
            }
        }
    }

    async fn try_data(&self) -> Result<LookupReport, WhoisLookupError> {
        let info = self.info().await;

        let not_found = self
            .registry
            .lookup(self.parsed.tld())
            .and_then(|authority| authority.not_found.clone());

        match not_found {
            Some(signature) => Ok(extract::extract(&info, &signature)),
            // Without a signature the reply cannot be classified.
            None => Ok(LookupReport::error()),
        }
    }

    /// Looser availability heuristic, independent of `data()`.
    ///
    /// Returns `false` when no not-found signature is configured for the
    /// TLD or when classification fails; an unknown state must never read
    /// as "available".
    pub async fn is_available(&self) -> bool {
        let info = self.info().await;

        let signature = match self
            .registry
            .lookup(self.parsed.tld())
            .and_then(|authority| authority.not_found.clone())
        {
            Some(signature) => signature,
            None => {
                warn!(
                    tld = self.parsed.tld(),
                    "no not-found signature configured; availability unknown"
                );
                return false;
            }
        };

        match extract::is_available(&info, self.parsed.domain(), &signature) {
            Ok(available) => available,
            Err(e) => {
                warn!(domain = self.parsed.domain(), error = %e, "availability check failed");
                false
            }
        }
    }

    /// One protocol exchange: HTTP or socket mode by address prefix.
    /// Returns decoded (not yet escaped) UTF-8 reply text.
    async fn exchange(&self, authority: &Authority) -> Result<String, WhoisLookupError> {
        if authority.is_http() {
            debug!(server = authority.server.as_str(), "HTTP mode exchange");
            let client = HttpWhoisClient::with_timeout(self.config.http_timeout)?;
            let body = client.fetch(&authority.server, self.parsed.domain()).await?;
            Ok(response::strip_tags(&response::to_utf8(&body)))
        } else {
            debug!(server = authority.server.as_str(), "socket mode exchange");
            let client = WhoisClient::with_config(self.config.clone());
            let reply = client
                .query(&authority.server, self.parsed.domain(), self.parsed.tld())
                .await?;
            Ok(response::to_utf8(&reply))
        }
    }
}
