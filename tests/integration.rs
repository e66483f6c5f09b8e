//! End-to-end tests for the lookup pipeline.
//!
//! Instead of hitting public WHOIS authorities, these tests run loopback
//! mock servers and point the injected registry at them. The mock speaks
//! just enough of the protocol: accept one connection, read the query line,
//! write a canned reply, close.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use whois_lookup::{
    Authority, LookupConfig, ServerRegistry, WhoisLookup, MSG_CONNECTION_ERROR,
    MSG_INVALID_DOMAIN, MSG_NO_REFERRAL,
};

/// Spawn a mock WHOIS server answering each connection with a fixed reply.
/// Returns its `host:port` address.
async fn spawn_mock_server(reply: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut query = [0u8; 256];
            let _ = socket.read(&mut query).await;
            let _ = socket.write_all(reply).await;
            // Dropping the socket closes the connection, ending the
            // client's read-to-end loop.
        }
    });

    addr
}

/// Spawn a mock web authority answering every request with a fixed HTML
/// body. Returns its `host:port` address.
async fn spawn_mock_http_server(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\n\
                 content-type: text/html; charset=utf-8\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    addr
}

fn fast_config() -> LookupConfig {
    LookupConfig::default()
        .with_connect_timeout(Duration::from_secs(2))
        .with_read_timeout(Duration::from_secs(2))
}

const REGISTERED_REPLY: &[u8] = b"   Domain Name: EXAMPLE.ORG\n\
   Registry Domain ID: D2328855-LROR\n\
   Creation Date: 1995-08-31T04:00:00Z\n\
   Registry Expiry Date: 2026-08-30T04:00:00Z\n\
   Updated Date: 2025-07-14T08:58:28Z\n\
   Registrar: ICANN\n\
   Registrar IANA ID: 9999\n\
   Name Server: A.IANA-SERVERS.NET\n\
   Name Server: B.IANA-SERVERS.NET\n";

#[tokio::test]
async fn registered_domain_is_found_with_fields_in_order() {
    let addr = spawn_mock_server(REGISTERED_REPLY).await;
    let registry =
        ServerRegistry::builtin().with_entry("org", Authority::with_signature(addr, "NOT FOUND"));

    let lookup = WhoisLookup::with_config("example.org", registry, fast_config()).unwrap();

    let info = lookup.info().await;
    assert!(info.contains("Registry Domain ID: D2328855-LROR"));

    let report = lookup.data().await;
    assert_eq!(report.status_code(), 1);
    assert_eq!(report.message, "found");
    assert_eq!(
        report.data.creation_date.as_deref(),
        Some("1995-08-31T04:00:00Z")
    );
    assert_eq!(
        report.data.name_servers,
        vec!["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"]
    );
    assert_eq!(
        report.data.registrar.as_ref().unwrap().id.as_deref(),
        Some("9999")
    );

    assert!(!lookup.is_available().await);
}

#[tokio::test]
async fn unregistered_domain_is_not_found_and_available() {
    let addr = spawn_mock_server(b"Domain surely-free.org NOT FOUND in the registry\n").await;
    let registry =
        ServerRegistry::builtin().with_entry("org", Authority::with_signature(addr, "NOT FOUND"));

    let lookup = WhoisLookup::with_config("surely-free.org", registry, fast_config()).unwrap();

    let report = lookup.data().await;
    assert_eq!(report.status_code(), 2);
    assert_eq!(report.message, "not_found");
    assert!(report.data.is_empty());

    assert!(lookup.is_available().await);
}

#[tokio::test]
async fn maxchars_signature_marks_short_reply_available() {
    let addr = spawn_mock_server(b"example.vu\r\n").await;
    let registry =
        ServerRegistry::builtin().with_entry("vu", Authority::with_signature(addr, "MAXCHARS:0"));

    let lookup = WhoisLookup::with_config("example.vu", registry, fast_config()).unwrap();
    assert!(lookup.is_available().await);
}

#[tokio::test]
async fn referral_is_chased_for_thin_registry_tlds() {
    let thick = spawn_mock_server(REGISTERED_REPLY).await;
    // The first hop only points at the thick server.
    let referral_reply: &'static [u8] = Box::leak(
        format!(
            "   Domain Name: EXAMPLE.COM\n   Whois Server: {}\n",
            thick
        )
        .into_bytes()
        .into_boxed_slice(),
    );
    let thin = spawn_mock_server(referral_reply).await;

    let registry = ServerRegistry::builtin()
        .with_entry("com", Authority::with_signature(thin, "No match for"));

    let lookup = WhoisLookup::with_config("example.com", registry, fast_config()).unwrap();

    // The final reply is the second hop's, not the referral stub.
    let info = lookup.info().await;
    assert!(info.contains("Creation Date: 1995-08-31T04:00:00Z"));
    assert!(!info.contains("Whois Server:"));

    let report = lookup.data().await;
    assert_eq!(report.message, "found");
}

#[tokio::test]
async fn missing_referral_yields_distinct_sentinel() {
    let thin = spawn_mock_server(b"Aggregated registry banner with no pointer\n").await;
    let registry = ServerRegistry::builtin()
        .with_entry("com", Authority::with_signature(thin, "No match for"));

    let lookup = WhoisLookup::with_config("example.com", registry, fast_config()).unwrap();
    assert_eq!(lookup.info().await, MSG_NO_REFERRAL);
}

#[tokio::test]
async fn connection_failure_on_primary_hop_is_sentinel_not_panic() {
    // Nothing listens on port 1.
    let registry = ServerRegistry::builtin()
        .with_entry("org", Authority::with_signature("127.0.0.1:1", "NOT FOUND"));

    let lookup = WhoisLookup::with_config("example.org", registry, fast_config()).unwrap();
    assert_eq!(lookup.info().await, MSG_CONNECTION_ERROR);

    // The classifier degrades instead of erroring out.
    let report = lookup.data().await;
    assert_eq!(report.status_code(), 0);
    assert!(!lookup.is_available().await);
}

#[tokio::test]
async fn connection_failure_on_referral_hop_is_sentinel() {
    let thin = spawn_mock_server(b"Whois Server: 127.0.0.1:1\n").await;
    let registry = ServerRegistry::builtin()
        .with_entry("com", Authority::with_signature(thin, "No match for"));

    let lookup = WhoisLookup::with_config("example.com", registry, fast_config()).unwrap();
    assert_eq!(lookup.info().await, MSG_CONNECTION_ERROR);
}

#[tokio::test]
async fn reply_markup_is_escaped_in_info() {
    let addr = spawn_mock_server(b"Registrar: Ackme <registrar> & \"Co\"\n").await;
    let registry =
        ServerRegistry::builtin().with_entry("org", Authority::with_signature(addr, "NOT FOUND"));

    let lookup = WhoisLookup::with_config("example.org", registry, fast_config()).unwrap();
    let info = lookup.info().await;
    assert!(info.contains("Ackme &lt;registrar&gt; &amp; &quot;Co&quot;"));
}

#[tokio::test]
async fn html_info_inserts_line_breaks() {
    let addr = spawn_mock_server(b"line one\nline two\n").await;
    let registry =
        ServerRegistry::builtin().with_entry("org", Authority::with_signature(addr, "NOT FOUND"));

    let lookup = WhoisLookup::with_config("example.org", registry, fast_config()).unwrap();
    assert_eq!(lookup.html_info().await, "line one<br />\nline two<br />\n");
}

#[tokio::test]
async fn latin1_reply_is_converted_to_utf8() {
    // 0xFC is u-umlaut in ISO-8859-1
    let addr = spawn_mock_server(b"Registrar: M\xFCller Registrar GmbH\n").await;
    let registry =
        ServerRegistry::builtin().with_entry("de", Authority::with_signature(addr, "Status: free"));

    let lookup = WhoisLookup::with_config("example.de", registry, fast_config()).unwrap();
    let info = lookup.info().await;
    assert!(info.contains("M\u{fc}ller Registrar GmbH"));
}

#[tokio::test]
async fn accessors_are_stable_and_independent_of_network_outcome() {
    let registry = ServerRegistry::builtin()
        .with_entry("org", Authority::with_signature("127.0.0.1:1", "NOT FOUND"));
    let lookup = WhoisLookup::with_config("example.org", registry, fast_config()).unwrap();

    let before = (
        lookup.domain().to_string(),
        lookup.tlds().to_string(),
        lookup.sub_domain().to_string(),
    );
    let _ = lookup.info().await; // fails with the connection sentinel
    let after = (
        lookup.domain().to_string(),
        lookup.tlds().to_string(),
        lookup.sub_domain().to_string(),
    );

    assert_eq!(before, after);
    assert_eq!(before.0, "example.org");
    assert_eq!(before.1, "org");
    assert_eq!(before.2, "example");
}

#[tokio::test]
async fn invalid_label_short_circuits_before_any_connection() {
    // Authority points at a closed port; a network attempt would surface
    // the connection sentinel instead of the validity sentinel.
    let registry = ServerRegistry::builtin()
        .with_entry("org", Authority::with_signature("127.0.0.1:1", "NOT FOUND"));
    let lookup = WhoisLookup::with_config("ab.org", registry, fast_config()).unwrap();

    assert!(!lookup.is_valid());
    assert_eq!(lookup.info().await, MSG_INVALID_DOMAIN);
}

#[tokio::test]
async fn each_operation_reruns_the_pipeline() {
    // The mock answers every connection, so two operations mean two
    // independent exchanges; both see consistent replies.
    let addr = spawn_mock_server(REGISTERED_REPLY).await;
    let registry =
        ServerRegistry::builtin().with_entry("org", Authority::with_signature(addr, "NOT FOUND"));
    let lookup = WhoisLookup::with_config("example.org", registry, fast_config()).unwrap();

    let first = lookup.info().await;
    let second = lookup.info().await;
    assert_eq!(first, second);
    assert_eq!(lookup.data().await.message, "found");
}

#[tokio::test]
async fn http_authority_body_is_stripped_and_classified() {
    let addr = spawn_mock_http_server(
        "<html><body>Domain <b>free-domain.gr</b> NOT FOUND</body></html>",
    )
    .await;
    let registry = ServerRegistry::builtin().with_entry(
        "gr",
        Authority::with_signature(format!("http://{}/whois?domain=", addr), "NOT FOUND"),
    );

    let lookup = WhoisLookup::with_config("free-domain.gr", registry, fast_config()).unwrap();

    // Markup is stripped before escaping, so no entities appear.
    let info = lookup.info().await;
    assert!(info.contains("Domain free-domain.gr NOT FOUND"));
    assert!(!info.contains("&lt;"));

    assert!(lookup.is_available().await);
    let report = lookup.data().await;
    assert_eq!(report.status_code(), 2);
    assert_eq!(report.message, "not_found");
}

#[tokio::test]
async fn http_authority_registered_reply_is_found() {
    let addr = spawn_mock_http_server(
        "<pre>Creation Date: 2001-03-09T12:00:00Z\nRegistrar: Hellenic Registry\n</pre>",
    )
    .await;
    let registry = ServerRegistry::builtin().with_entry(
        "gr",
        Authority::with_signature(format!("http://{}/whois?domain=", addr), "NOT FOUND"),
    );

    let lookup = WhoisLookup::with_config("taken-domain.gr", registry, fast_config()).unwrap();

    let report = lookup.data().await;
    assert_eq!(report.message, "found");
    assert_eq!(
        report.data.creation_date.as_deref(),
        Some("2001-03-09T12:00:00Z")
    );
    assert!(!lookup.is_available().await);
}

#[test]
fn encoding_helpers_are_part_of_the_public_api() {
    use whois_lookup::{detect_encoding, to_utf8, DetectedEncoding};

    assert_eq!(detect_encoding(b"plain ascii"), DetectedEncoding::Utf8);
    assert_eq!(detect_encoding(b"Z\xFCrich"), DetectedEncoding::Iso8859_1);
    assert_eq!(detect_encoding(b"\xA4 42"), DetectedEncoding::Iso8859_15);
    assert_eq!(DetectedEncoding::Iso8859_15.label(), "ISO-8859-15");
    assert_eq!(to_utf8(b"Z\xFCrich"), "Z\u{fc}rich");
}
