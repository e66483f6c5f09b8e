//! Classic WHOIS protocol client (TCP port 43).
//!
//! One query is one connection: connect, write `domain\r\n`, read until the
//! peer closes. Thin-registry TLDs (`com`/`net`) answer the first hop with a
//! referral to the registrar's thick WHOIS server; the second hop's full
//! reply is the one that counts. Every hop runs under explicit connect and
//! read deadlines.

use crate::error::WhoisLookupError;
use crate::types::LookupConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

const WHOIS_PORT: u16 = 43;

/// TLD suffixes whose registry is thin and answers with a referral.
const THIN_REGISTRY_TLDS: [&str; 2] = ["com", "net"];

/// WHOIS client for querying an authority over TCP.
///
/// Opens exactly one or two outbound connections per query; no pooling,
/// no reuse, no retries.
#[derive(Debug, Clone, Default)]
pub struct WhoisClient {
    config: LookupConfig,
}

impl WhoisClient {
    /// Create a new client with custom deadlines.
    pub fn with_config(config: LookupConfig) -> Self {
        Self { config }
    }

    /// Query an authority for a fully-qualified domain, chasing the
    /// registrar referral for thin-registry TLDs.
    ///
    /// # Arguments
    ///
    /// * `server` - Authority host, optionally `host:port` (default port 43)
    /// * `domain` - Fully-qualified domain to query
    /// * `tld` - The domain's TLD suffix, used to decide referral chasing
    ///
    /// # Errors
    ///
    /// `ConnectionFailure`/`Timeout` when a hop cannot be established or
    /// read in time; `NoReferral` when a thin-registry first hop carries no
    /// `whois server` line.
    pub async fn query(
        &self,
        server: &str,
        domain: &str,
        tld: &str,
    ) -> Result<Vec<u8>, WhoisLookupError> {
        let first_hop = self.query_server(server, domain).await?;

        if !THIN_REGISTRY_TLDS.contains(&tld) {
            return Ok(first_hop);
        }

        // Thin registry: the first hop only points at the thick server.
        let referral = match find_referral(&first_hop) {
            Some(referral) => referral,
            None => {
                warn!(tld, server, "thin-registry reply carried no referral");
                return Err(WhoisLookupError::no_referral(tld));
            }
        };

        debug!(tld, referral = referral.as_str(), "chasing WHOIS referral");
        self.query_server(&referral, domain).await
    }

    /// Single hop: connect, send the query, read the full reply.
    async fn query_server(&self, server: &str, domain: &str) -> Result<Vec<u8>, WhoisLookupError> {
        let addr = host_with_port(server);
        debug!(addr = addr.as_str(), domain, "opening WHOIS connection");

        let mut stream = tokio::time::timeout(self.config.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| {
                WhoisLookupError::timeout(
                    format!("connect to {}", addr),
                    self.config.connect_timeout,
                )
            })?
            .map_err(|e| WhoisLookupError::connection(format!("{}: {}", addr, e)))?;

        stream
            .write_all(format!("{}\r\n", domain).as_bytes())
            .await?;

        let mut reply = Vec::new();
        tokio::time::timeout(self.config.read_timeout, stream.read_to_end(&mut reply))
            .await
            .map_err(|_| {
                WhoisLookupError::timeout(format!("read from {}", addr), self.config.read_timeout)
            })??;

        Ok(reply)
    }
}

/// Append the standard WHOIS port unless the address already carries one.
fn host_with_port(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{}:{}", server, WHOIS_PORT)
    }
}

/// Scan a first-hop reply for a referral line.
///
/// A referral line's first colon-delimited field equals `whois server`,
/// case-insensitively; the value after the colon is the thick server's
/// address.
pub fn find_referral(reply: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(reply);
    for line in text.lines() {
        let mut parts = line.splitn(2, ':');
        let key = parts.next().unwrap_or_default().trim();
        if key.eq_ignore_ascii_case("whois server") {
            if let Some(value) = parts.next() {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}
