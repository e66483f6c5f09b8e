//! TLD-to-authority registry.
//!
//! The registry maps a TLD suffix to the WHOIS authority responsible for it:
//! a server address (bare host for socket mode, `http(s)://` prefix for HTTP
//! mode, or empty when no authority is known) and an optional not-found
//! signature used by the classifier.
//!
//! The registry is an injected, read-only lookup capability: it performs no
//! network or disk access itself and can be substituted wholesale in tests.

use crate::error::WhoisLookupError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolved authority for one TLD suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    /// Server address: bare host (optionally `host:port`), an
    /// `http(s)://` URL prefix, or empty when no authority is known.
    pub server: String,

    /// Not-found signature: a substring/regex matched against reply text,
    /// or the sentinel `MAXCHARS:<n>` length threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_found: Option<String>,
}

impl Authority {
    /// Authority with a server address and no not-found signature.
    pub fn new<S: Into<String>>(server: S) -> Self {
        Self {
            server: server.into(),
            not_found: None,
        }
    }

    /// Authority with both a server address and a not-found signature.
    pub fn with_signature<S: Into<String>, N: Into<String>>(server: S, not_found: N) -> Self {
        Self {
            server: server.into(),
            not_found: Some(not_found.into()),
        }
    }

    /// True when replies are served over HTTP instead of port-43 WHOIS.
    pub fn is_http(&self) -> bool {
        let lower = self.server.to_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    /// True when any server address is configured at all.
    pub fn has_server(&self) -> bool {
        !self.server.is_empty()
    }

    /// True when the server address is non-trivial (length > 6); anything
    /// shorter cannot name a real authority and fails validation.
    pub fn is_usable(&self) -> bool {
        self.server.len() > 6
    }
}

/// Read-only TLD-keyed registry of WHOIS authorities.
///
/// Cheaply cloneable; the underlying table is shared. Safe to hand to many
/// concurrent lookups as long as nothing mutates it, which the API does not
/// allow after construction.
#[derive(Debug, Clone)]
pub struct ServerRegistry {
    entries: Arc<HashMap<String, Authority>>,
}

impl ServerRegistry {
    /// Build a registry from an already-loaded mapping.
    pub fn new(entries: HashMap<String, Authority>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Build a registry from the logical JSON shape of a server list file:
    /// an object mapping each TLD suffix to a 1-2 element array
    /// `[serverAddress]` or `[serverAddress, notFoundSignature]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use whois_lookup::ServerRegistry;
    ///
    /// let registry = ServerRegistry::from_json_str(
    ///     r#"{"com": ["whois.verisign-grs.com", "No match for"], "gr": [""]}"#,
    /// ).unwrap();
    /// assert!(registry.lookup("com").is_some());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, WhoisLookupError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (tld, mut fields) in raw {
            if fields.is_empty() {
                return Err(WhoisLookupError::registry(format!(
                    "entry for '{}' has no server address field",
                    tld
                )));
            }
            let not_found = if fields.len() > 1 {
                Some(fields.remove(1))
            } else {
                None
            };
            let server = fields.remove(0);
            entries.insert(
                tld.to_lowercase(),
                Authority { server, not_found },
            );
        }

        Ok(Self::new(entries))
    }

    /// Built-in default table covering common TLDs.
    ///
    /// Server addresses and not-found signatures follow the registries'
    /// published WHOIS behavior; callers needing broader coverage should
    /// load a full server list via `from_json_str`.
    pub fn builtin() -> Self {
        let entries = [
            ("com", "whois.verisign-grs.com", Some("No match for")),
            ("net", "whois.verisign-grs.com", Some("No match for")),
            ("org", "whois.pir.org", Some("NOT FOUND")),
            ("info", "whois.afilias.net", Some("NOT FOUND")),
            ("biz", "whois.nic.biz", Some("No Data Found")),
            ("us", "whois.nic.us", Some("No Data Found")),
            ("io", "whois.nic.io", Some("is available for purchase")),
            ("ai", "whois.nic.ai", Some("No Object Found")),
            ("co", "whois.nic.co", Some("No Data Found")),
            ("me", "whois.nic.me", Some("NOT FOUND")),
            ("dev", "whois.nic.google", Some("Domain not found")),
            ("app", "whois.nic.google", Some("Domain not found")),
            ("xyz", "whois.nic.xyz", Some("DOMAIN NOT FOUND")),
            ("tv", "tvwhois.verisign-grs.com", Some("No match for")),
            ("cc", "ccwhois.verisign-grs.com", Some("No match for")),
            ("uk", "whois.nic.uk", Some("No match for")),
            ("co.uk", "whois.nic.uk", Some("No match for")),
            ("de", "whois.denic.de", Some("Status: free")),
            ("fr", "whois.nic.fr", Some("No entries found")),
            ("nl", "whois.domain-registry.nl", Some("is free")),
            ("eu", "whois.eu", Some("Status: AVAILABLE")),
            ("it", "whois.nic.it", Some("Status: AVAILABLE")),
            ("ch", "whois.nic.ch", Some("We do not have an entry")),
            ("jp", "whois.jprs.jp", Some("No match!!")),
            ("vu", "vunic.vu", Some("MAXCHARS:200")),
            // No public WHOIS authority
            ("gr", "", None),
        ];

        let map = entries
            .into_iter()
            .map(|(tld, server, not_found)| {
                (
                    tld.to_string(),
                    Authority {
                        server: server.to_string(),
                        not_found: not_found.map(str::to_string),
                    },
                )
            })
            .collect();

        Self::new(map)
    }

    /// Look up the authority for a TLD suffix.
    ///
    /// Returns `None` for absent entries; an entry with an empty server
    /// address is still returned so callers can distinguish "no entry" from
    /// "entry without an authority".
    pub fn lookup(&self, tld: &str) -> Option<&Authority> {
        self.entries.get(&tld.to_lowercase())
    }

    /// Return a registry with one entry added or replaced. Intended for
    /// substituting authorities in tests.
    pub fn with_entry<T: Into<String>>(mut self, tld: T, authority: Authority) -> Self {
        Arc::make_mut(&mut self.entries).insert(tld.into().to_lowercase(), authority);
        self
    }

    /// Number of TLD entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
