//! Minimal source map (revision 3) representation.

use serde::{Deserialize, Serialize};

/// A source map object, serialized as the `.map` sidecar payload.
///
/// Only the fields consumers require to recognize a valid map are
/// carried; processing steps that compute real mappings fill them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// An empty map referencing a single source identifier.
    pub fn for_source(from: Option<&str>) -> Self {
        Self {
            version: 3,
            file: None,
            sources: from.map(|s| vec![s.to_string()]).unwrap_or_default(),
            names: Vec::new(),
            mappings: String::new(),
        }
    }

    /// Serialize to the JSON sidecar payload.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"version":3}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_source_records_identifier() {
        let map = SourceMap::for_source(Some("src/app.css"));
        assert_eq!(map.version, 3);
        assert_eq!(map.sources, vec!["src/app.css".to_string()]);
        assert!(map.mappings.is_empty());
    }

    #[test]
    fn test_json_round_trips() {
        let map = SourceMap::for_source(Some("a.css"));
        let parsed: SourceMap = serde_json::from_str(&map.to_json()).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_json_is_camel_case_v3() {
        let json = SourceMap::for_source(None).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], 3);
        assert!(value["mappings"].is_string());
    }
}
