const OVERSIGN_MARKER: &str = "(o)";
const OPTIONAL_OVERSIGN_MARKER: &str = "(x)";

/// One entry of a `sign_headers` list.
///
/// At most one of `oversigned` and `optional_oversigned` is set; neither
/// means the header is signed normally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignHeader {
    pub name: String,
    pub oversigned: bool,
    pub optional_oversigned: bool,
}

impl SignHeader {
    pub fn new(name: &str) -> SignHeader {
        SignHeader {
            name: name.to_string(),
            ..SignHeader::default()
        }
    }

    pub fn oversigned(name: &str) -> SignHeader {
        SignHeader {
            oversigned: true,
            ..SignHeader::new(name)
        }
    }

    pub fn optional_oversigned(name: &str) -> SignHeader {
        SignHeader {
            optional_oversigned: true,
            ..SignHeader::new(name)
        }
    }
}

/// Parses a colon separated header list such as `(o)from:(x)date:subject`.
///
/// A `(o)` prefix marks the header as oversigned, `(x)` as oversigned only
/// when present. Empty segments are skipped and names keep their original
/// case. This never fails.
pub fn parse_sign_headers(raw: &str) -> Vec<SignHeader> {
    raw.split(':').filter_map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<SignHeader> {
    let segment = segment.trim();
    let header = if let Some(rest) = segment.strip_prefix(OVERSIGN_MARKER) {
        SignHeader::oversigned(rest.trim())
    } else if let Some(rest) = segment.strip_prefix(OPTIONAL_OVERSIGN_MARKER) {
        SignHeader::optional_oversigned(rest.trim())
    } else {
        SignHeader::new(segment)
    };
    if header.name.is_empty() {
        return None;
    }
    Some(header)
}
