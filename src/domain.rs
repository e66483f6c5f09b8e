//! Domain name parsing and validation.
//!
//! A raw domain string is lowercased and split into a subdomain label and a
//! TLD suffix against two alternative grammars: a Unicode-label form and a
//! punycode (`xn--`) form. Anything else is rejected at construction time.

use crate::error::WhoisLookupError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Grammar (a): `label.suffix` with Unicode letters, digits and hyphens
    /// in the label and one or more dot-separated letter/hyphen groups in
    /// the suffix.
    static ref UNICODE_FORM: Regex =
        Regex::new(r"^([\p{L}\d-]+)\.((?:[\p{L}-]+\.?)+)$").expect("valid domain grammar");

    /// Grammar (b): punycode form where both label and suffix begin with
    /// `xn--`.
    static ref PUNYCODE_FORM: Regex =
        Regex::new(r"^(xn--[\p{L}\d-]+)\.(xn--(?:[a-z\d-]+\.?)+)$")
            .expect("valid punycode grammar");

    /// Strict registrability pattern for the subdomain label.
    static ref REGISTRABLE_LABEL: Regex =
        Regex::new(r"^[a-z0-9-]{3,}$").expect("valid label pattern");
}

/// A validated, lowercased domain split into its subdomain label and TLD
/// suffix.
///
/// Invariant: `sub_domain + "." + tld == domain`, both parts non-empty.
/// Immutable once constructed; one instance lives for one lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDomain {
    domain: String,
    sub_domain: String,
    tld: String,
}

impl ParsedDomain {
    /// Parse and validate a raw domain string.
    ///
    /// The input is lowercased before matching. Fails with
    /// `InvalidDomainSyntax` when neither grammar matches; this is the only
    /// hard failure in the whole pipeline.
    ///
    /// # Examples
    ///
    /// ```
    /// use whois_lookup::ParsedDomain;
    ///
    /// let parsed = ParsedDomain::parse("Example.COM").unwrap();
    /// assert_eq!(parsed.sub_domain(), "example");
    /// assert_eq!(parsed.tld(), "com");
    /// assert_eq!(parsed.domain(), "example.com");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, WhoisLookupError> {
        let domain = raw.to_lowercase();

        let captures = UNICODE_FORM
            .captures(&domain)
            .or_else(|| PUNYCODE_FORM.captures(&domain))
            .ok_or_else(|| WhoisLookupError::invalid_syntax(&domain))?;

        let sub_domain = captures[1].to_string();
        let tld = captures[2].to_string();

        Ok(Self {
            domain,
            sub_domain,
            tld,
        })
    }

    /// Full lowercased domain name.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// TLD suffix (dot-separated groups after the first label).
    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// Subdomain label (lowest-level label).
    pub fn sub_domain(&self) -> &str {
        &self.sub_domain
    }

    /// Strict re-check of the subdomain label: alphanumeric/hyphen, at
    /// least 3 characters, not hyphen-leading or hyphen-trailing.
    ///
    /// The looser construction grammar accepts labels this check rejects;
    /// lookups for such labels short-circuit without network I/O.
    pub fn label_is_registrable(&self) -> bool {
        REGISTRABLE_LABEL.is_match(&self.sub_domain)
            && !self.sub_domain.starts_with('-')
            && !self.sub_domain.ends_with('-')
    }
}
