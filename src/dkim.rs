use std::collections::HashMap;

use super::config::{AssignmentMap, ParsedConfig};
use super::error::{Error, Result};
use super::sign_headers::{parse_sign_headers, SignHeader};

/// Label of the catch-all domain block.
pub const WILDCARD_DOMAIN: &str = "*";

/// Settings of the `dkim` module (`dkim.conf`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DkimConf {
    /// `None` when the file never mentions `enabled`.
    pub enabled: Option<bool>,
    pub sign_headers: String,
    sign_header_list: Vec<SignHeader>,
}

impl DkimConf {
    pub fn from_parsed(config: &ParsedConfig) -> Result<DkimConf> {
        let sign_headers = string_option(config.assignments(), "sign_headers");
        let sign_header_list = if sign_headers.is_empty() {
            vec![]
        } else {
            parse_sign_headers(&sign_headers)
        };
        Ok(DkimConf {
            enabled: bool_option(config.assignments(), "enabled")?,
            sign_headers,
            sign_header_list,
        })
    }

    /// Entries derived from `sign_headers`, in file order.
    pub fn sign_header_list(&self) -> &[SignHeader] {
        &self.sign_header_list
    }
}

/// Per-domain override from a `domain { name { ... } }` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainRule {
    pub selector: String,
    pub path: String,
}

impl DomainRule {
    fn from_block(block: &AssignmentMap) -> DomainRule {
        DomainRule {
            selector: string_option(block, "selector"),
            path: string_option(block, "path"),
        }
    }
}

/// Settings of the `dkim_signing` module (`dkim_signing.conf`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DkimSigningConf {
    pub enabled: Option<bool>,
    pub allow_username_mismatch: Option<bool>,
    pub sign_authenticated: Option<bool>,
    pub sign_local: Option<bool>,
    pub sign_inbound: Option<bool>,
    pub use_domain: String,
    pub use_domain_sign_local: String,
    pub use_domain_sign_networks: String,
    pub allow_hdrfrom_mismatch: Option<bool>,
    pub use_esld: Option<bool>,
    pub try_fallback: Option<bool>,
    pub path: String,
    pub selector: String,
    pub path_map: String,
    pub selector_map: String,
    pub domain: HashMap<String, DomainRule>,
}

impl DkimSigningConf {
    pub fn from_parsed(config: &ParsedConfig) -> Result<DkimSigningConf> {
        let options = config.assignments();
        let domain = config
            .domains()
            .iter()
            .map(|(label, block)| (label.clone(), DomainRule::from_block(block)))
            .collect();

        Ok(DkimSigningConf {
            enabled: bool_option(options, "enabled")?,
            allow_username_mismatch: bool_option(options, "allow_username_mismatch")?,
            sign_authenticated: bool_option(options, "sign_authenticated")?,
            sign_local: bool_option(options, "sign_local")?,
            sign_inbound: bool_option(options, "sign_inbound")?,
            use_domain: string_option(options, "use_domain"),
            use_domain_sign_local: string_option(options, "use_domain_sign_local"),
            use_domain_sign_networks: string_option(options, "use_domain_sign_networks"),
            allow_hdrfrom_mismatch: bool_option(options, "allow_hdrfrom_mismatch")?,
            use_esld: bool_option(options, "use_esld")?,
            try_fallback: bool_option(options, "try_fallback")?,
            path: string_option(options, "path"),
            selector: string_option(options, "selector"),
            path_map: string_option(options, "path_map"),
            selector_map: string_option(options, "selector_map"),
            domain,
        })
    }

    /// Rule for `domain`, falling back to the `*` block when there is no
    /// block with exactly that label.
    pub fn rule_for(&self, domain: &str) -> Option<&DomainRule> {
        self.domain
            .get(domain)
            .or_else(|| self.domain.get(WILDCARD_DOMAIN))
    }
}

fn string_option(options: &AssignmentMap, key: &str) -> String {
    options.get(key).cloned().unwrap_or_default()
}

fn bool_option(options: &AssignmentMap, key: &str) -> Result<Option<bool>> {
    match options.get(key) {
        Some(value) => parse_bool(key, value).map(Some),
        None => Ok(None),
    }
}

/// Case-insensitive `true`/`false`; anything else is a coercion error.
pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::Coercion {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
