//! Raw source maps.
//!
//! The emitter records one raw segment per emitted item and statement, in
//! generation order. Segments keep plain integers; VLQ/base64 encoding into
//! the `mappings` string format is a downstream concern, so `mappings`
//! serializes as an array of `[generated_index, 0, source_line, source_col]`
//! tuples (zero-based, source-map convention).

use serde::Serialize;

use tsgo_ir::SourceLocation;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceMap {
    pub version: u32,
    pub sources: Vec<String>,
    pub names: Vec<String>,
    pub mappings: Vec<[u32; 4]>,
    #[serde(rename = "sourcesContent")]
    pub sources_content: Vec<String>,
}

impl SourceMap {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Debug)]
pub struct SourceMapBuilder {
    source: String,
    entries: Vec<[u32; 4]>,
    next_index: u32,
}

impl SourceMapBuilder {
    pub fn new(source: &str) -> Self {
        SourceMapBuilder {
            source: source.to_string(),
            entries: Vec::new(),
            next_index: 0,
        }
    }

    /// Records one mapping for the next generated item.
    pub fn add(&mut self, loc: SourceLocation) {
        if loc.is_synthesized() {
            return;
        }
        self.entries.push([
            self.next_index,
            0,
            loc.line.saturating_sub(1),
            loc.col.saturating_sub(1),
        ]);
        self.next_index += 1;
    }

    pub fn start_item(&mut self, loc: SourceLocation) {
        self.add(loc);
    }

    pub fn build(self, _generated: &str) -> SourceMap {
        SourceMap {
            version: 3,
            sources: vec![self.source],
            names: Vec::new(),
            mappings: self.entries,
            sources_content: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_skips_synthesized_locations() {
        let mut b = SourceMapBuilder::new("a.ts");
        b.add(SourceLocation::synthesized());
        b.add(SourceLocation {
            line: 3,
            col: 5,
            ..Default::default()
        });
        let map = b.build("");
        assert_eq!(map.version, 3);
        assert_eq!(map.sources, vec!["a.ts"]);
        assert_eq!(map.mappings, vec![[0, 0, 2, 4]]);
    }

    #[test]
    fn serializes_with_version_and_sources_content_keys() {
        let map = SourceMap {
            version: 3,
            sources: vec!["a.ts".into()],
            names: Vec::new(),
            mappings: Vec::new(),
            sources_content: vec!["const x = 1;".into()],
        };
        let json = map.to_json();
        assert!(json.contains("\"version\": 3"));
        assert!(json.contains("sourcesContent"));
    }
}
