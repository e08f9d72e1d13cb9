//! Parsers for Rspamd's DKIM configuration.
//!
//! Covers the brace/semicolon dialect of `dkim.conf` and
//! `dkim_signing.conf`, the `sign_headers` list syntax, and the two-column
//! map files (`dkim_selectors.map`, `dkim_paths.map`,
//! `signed_domains.map`). Every entry point reads from any
//! [`std::io::Read`] and returns fresh, owned values.
//!
//! ```
//! let conf = rspamd_dkim_config::parse_dkim_signing_conf(
//!     "selector = s1;\ndomain { \"a.com\" { path = \"/p\" } }".as_bytes(),
//! )
//! .unwrap();
//! assert_eq!(conf.selector, "s1");
//! assert_eq!(conf.domain["a.com"].path, "/p");
//! ```

use std::io::Read;

pub mod config;
pub mod dkim;
pub mod error;
pub mod lexer;
pub mod map_file;
pub mod parser;
pub mod sign_headers;

pub use config::{AssignmentMap, DomainBlockMap, ParsedConfig};
pub use dkim::{DkimConf, DkimSigningConf, DomainRule};
pub use error::{Error as ParseError, LexicalErrorKind, Result};
pub use map_file::{
    parse_map, parse_paths_map, parse_selectors_map, parse_signed_domains_map, MapFile,
};
pub use sign_headers::{parse_sign_headers, SignHeader};

/// Parses a configuration stream into its generic assignments and domain
/// blocks.
pub fn parse_config<R: Read>(mut reader: R) -> Result<ParsedConfig> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    parser::run(&data)
}

pub fn parse_dkim_conf<R: Read>(reader: R) -> Result<DkimConf> {
    DkimConf::from_parsed(&parse_config(reader)?)
}

pub fn parse_dkim_signing_conf<R: Read>(reader: R) -> Result<DkimSigningConf> {
    DkimSigningConf::from_parsed(&parse_config(reader)?)
}
