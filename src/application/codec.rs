//! JSON encoding of willow trees and yew records.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::application::records::YewRecord;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Branch;

const BYTE_ORDER_MARK: char = '\u{feff}';

pub const WILLOW_FORMAT: &str = "willow";
pub const YEW_FORMAT: &str = "yew";

fn decode<T: DeserializeOwned>(
    content: &str,
    format: &'static str,
    origin: &Path,
) -> ApplicationResult<T> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
    serde_json::from_str(content).map_err(|source| ApplicationError::Parse {
        format,
        path: origin.to_path_buf(),
        source,
    })
}

/// Parses a willow proof tree. A leading byte-order mark is ignored.
///
/// serde_json stops at 128 nested JSON containers, and every branch level takes
/// two (the branch object and its `children` array). Trees deeper than about 64
/// branch levels are reported as a parse error instead of exhausting the stack.
pub fn decode_willow(content: &str, origin: &Path) -> ApplicationResult<Branch> {
    decode(content, WILLOW_FORMAT, origin)
}

/// Parses yew node records. A leading byte-order mark is ignored.
pub fn decode_yew(content: &str, origin: &Path) -> ApplicationResult<Vec<YewRecord>> {
    decode(content, YEW_FORMAT, origin)
}

/// Serializes records with `indent` spaces per level; `0` writes a single line.
pub fn encode_yew(records: &[YewRecord], indent: usize) -> ApplicationResult<String> {
    encode(&records, indent).map_err(ApplicationError::Serialize)
}

fn encode<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, serde_json::Error> {
    if indent == 0 {
        return serde_json::to_string(value);
    }
    let spaces = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&spaces));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_decode_willow_skips_byte_order_mark() {
        let content = "\u{feff}{\"statements\": [\"P\"], \"children\": []}";
        let tree = decode_willow(content, &PathBuf::from("bom.willow")).unwrap();
        assert_eq!(tree.statements[0].text, "P");
    }

    #[test]
    fn test_decode_willow_reports_path() {
        let err = decode_willow("{not json", &PathBuf::from("broken.willow")).unwrap_err();
        assert!(err.to_string().contains("broken.willow"));
        assert!(matches!(err, ApplicationError::Parse { format: "willow", .. }));
    }

    fn chain(levels: usize) -> String {
        let mut json = String::from(r#"{"statements": ["leaf"], "children": []}"#);
        for _ in 1..levels {
            json = format!(r#"{{"statements": ["s"], "children": [{}]}}"#, json);
        }
        json
    }

    #[test]
    fn test_decode_willow_nesting_limit() {
        let shallow = decode_willow(&chain(40), &PathBuf::from("shallow.willow")).unwrap();
        assert_eq!(shallow.depth(), 40);

        let err = decode_willow(&chain(80), &PathBuf::from("deep.willow")).unwrap_err();
        assert!(matches!(err, ApplicationError::Parse { format: "willow", .. }));
        assert!(err.to_string().contains("recursion limit"));
    }

    #[test]
    fn test_encode_yew_indentation() {
        let records = vec![YewRecord {
            id: 0,
            text: "P".to_string(),
            children: vec![],
            decomposition: vec![],
            premise: true,
            parent: None,
            antecedent: None,
        }];

        let pretty = encode_yew(&records, 4).unwrap();
        assert!(pretty.contains("\n        \"id\": 0"));

        let compact = encode_yew(&records, 0).unwrap();
        assert_eq!(
            compact,
            r#"[{"id":0,"text":"P","children":[],"decomposition":[],"premise":true}]"#
        );
    }
}
