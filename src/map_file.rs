use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};

use log::debug;

use super::error::{Error, Result};

/// Domain to value mapping read from a two-column map file.
pub type MapFile = HashMap<String, String>;

/// Parses a map file made of `key value` lines.
///
/// Blank lines and lines starting with `#` are skipped. Every other line
/// must hold exactly two whitespace separated fields. Later keys replace
/// earlier ones.
pub fn parse_map<R: Read>(reader: R) -> Result<MapFile> {
    let mut map = MapFile::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let content = line.trim();
        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        let mut fields = content.split_whitespace();
        let (key, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => {
                return Err(Error::MapFormat {
                    line: index + 1,
                    content: line.clone(),
                })
            }
        };
        if let Some(previous) = map.insert(key.to_string(), value.to_string()) {
            debug!("map key '{}' overrides earlier value '{}'", key, previous);
        }
    }
    debug!("parsed map with {} entries", map.len());
    Ok(map)
}

/// `dkim_selectors.map`: domain to selector.
pub fn parse_selectors_map<R: Read>(reader: R) -> Result<MapFile> {
    parse_map(reader)
}

/// `dkim_paths.map`: domain to private key path.
pub fn parse_paths_map<R: Read>(reader: R) -> Result<MapFile> {
    parse_map(reader)
}

/// `signed_domains.map`: signed domain to private key path.
pub fn parse_signed_domains_map<R: Read>(reader: R) -> Result<MapFile> {
    parse_map(reader)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_two_columns() {
        let map = parse_map("foo.com   bar\n".as_bytes()).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["foo.com"], "bar");
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let map = parse_map(
            "# selectors\n\n   \n  # indented comment\nexample.com\tmail\r\n\ttest.com s1"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["example.com"], "mail");
        assert_eq!(map["test.com"], "s1");
    }

    #[test]
    fn test_later_keys_overwrite() {
        let map = parse_map("a.com s1\na.com s2\n".as_bytes()).unwrap();
        assert_eq!(map["a.com"], "s2");
    }

    #[test]
    fn test_single_field_line_is_an_error() {
        match parse_map("a.com s1\n\nlonely.com\n".as_bytes()) {
            Err(Error::MapFormat { line, content }) => {
                assert_eq!(line, 3);
                assert_eq!(content, "lonely.com");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_trailing_text_is_an_error() {
        assert!(matches!(
            parse_map("a.com s1 # note\n".as_bytes()),
            Err(Error::MapFormat { line: 1, .. })
        ));
        assert!(matches!(
            parse_map("a.com s1 extra\n".as_bytes()),
            Err(Error::MapFormat { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_map("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_io_error() {
        assert!(matches!(
            parse_map(&[0x66u8, 0x20, 0xff, 0xfe, 0x0a][..]),
            Err(Error::Io(_))
        ));
    }
}
