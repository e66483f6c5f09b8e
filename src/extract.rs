//! Field extraction and availability classification.
//!
//! Both consumers work on the normalized (escaped, UTF-8) info text.
//! Extraction is a per-line scan for known field markers; availability is a
//! looser whole-text heuristic driven by the registry's not-found
//! signature. Neither is guaranteed correct for every registry's reply
//! format; both degrade rather than fail.

use crate::error::WhoisLookupError;
use crate::types::{LookupReport, RegistrarInfo, WhoisData};
use lazy_static::lazy_static;
use regex::RegexBuilder;
use tracing::debug;

const MARKER_CREATION_DATE: &str = "Creation Date:";
const MARKER_EXPIRATION_DATE: &str = "Registry Expiry Date:";
const MARKER_UPDATE_DATE: &str = "Updated Date:";
const MARKER_REGISTRY_DOMAIN_ID: &str = "Registry Domain ID:";
const MARKER_REGISTRAR_NAME: &str = "Registrar:";
const MARKER_REGISTRAR_ID: &str = "Registrar IANA ID:";
const MARKER_NAME_SERVER: &str = "Name Server:";

/// Sentinel prefix turning a not-found signature into a length threshold.
const MAXCHARS_SENTINEL: &str = "MAXCHARS:";

lazy_static! {
    static ref WHITESPACE_RUN: regex::Regex =
        regex::Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Classify the info text and extract structured fields.
///
/// The signature check runs first: when the registry's not-found signature
/// appears as a substring, the report is `NotFound` and no extraction
/// happens. Otherwise every line is matched against the marker table; at
/// least one captured field makes the report `Found`, zero fields leave it
/// at the default `Error`.
pub fn extract(info: &str, not_found: &str) -> LookupReport {
    if info.contains(not_found) {
        return LookupReport::not_found();
    }

    let mut data = WhoisData::default();

    for line in info.split('\n') {
        if line.contains(MARKER_CREATION_DATE) {
            data.creation_date = Some(marker_value(line, MARKER_CREATION_DATE));
        }
        if line.contains(MARKER_EXPIRATION_DATE) {
            data.expiration_date = Some(marker_value(line, MARKER_EXPIRATION_DATE));
        }
        if line.contains(MARKER_UPDATE_DATE) {
            data.update_date = Some(marker_value(line, MARKER_UPDATE_DATE));
        }
        if line.contains(MARKER_REGISTRY_DOMAIN_ID) {
            data.registry_domain_id = Some(marker_value(line, MARKER_REGISTRY_DOMAIN_ID));
        }
        if line.contains(MARKER_REGISTRAR_NAME) {
            data.registrar.get_or_insert_with(RegistrarInfo::default).name =
                Some(marker_value(line, MARKER_REGISTRAR_NAME));
        }
        if line.contains(MARKER_REGISTRAR_ID) {
            data.registrar.get_or_insert_with(RegistrarInfo::default).id =
                Some(marker_value(line, MARKER_REGISTRAR_ID));
        }
        if line.contains(MARKER_NAME_SERVER) {
            data.name_servers.push(marker_value(line, MARKER_NAME_SERVER));
        }
    }

    if data.is_empty() {
        debug!("no field marker matched; leaving report at error state");
        LookupReport::error()
    } else {
        LookupReport::found(data)
    }
}

/// Decide availability from the info text and the not-found signature.
///
/// The `MAXCHARS:<n>` sentinel compares the length of the text with the
/// literal domain stripped out (whitespace collapsed and trimmed) against
/// the threshold. Any other signature is matched case-insensitively as a
/// regex against the whitespace-collapsed text.
pub fn is_available(
    info: &str,
    domain: &str,
    not_found: &str,
) -> Result<bool, WhoisLookupError> {
    if let Some(threshold) = not_found.strip_prefix(MAXCHARS_SENTINEL) {
        let limit: usize = threshold.trim().parse().map_err(|_| {
            WhoisLookupError::extraction(format!(
                "malformed MAXCHARS threshold: '{}'",
                threshold
            ))
        })?;
        let stripped = collapse_whitespace(&info.replace(domain, ""));
        return Ok(stripped.len() <= limit);
    }

    let signature = RegexBuilder::new(not_found)
        .case_insensitive(true)
        .build()?;
    Ok(signature.is_match(&collapse_whitespace(info)))
}

/// Everything on the line except the marker itself, trimmed.
fn marker_value(line: &str, marker: &str) -> String {
    line.replace(marker, "").trim().to_string()
}

/// Collapse whitespace runs to single spaces and trim the edges.
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
