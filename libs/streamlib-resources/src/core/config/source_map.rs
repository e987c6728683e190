// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Line/column lookup for block-style YAML.
//!
//! `serde_yaml` does not keep spans for deserialized values, so lint
//! positions are recovered from the source text by walking indentation.
//! Flow-style collections (`[ ... ]`, `{ ... }`) fall back to the position
//! of the enclosing key.

use std::ops::Range;

use serde::Serialize;

/// 1-based position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };
}

pub(crate) struct SourceMap<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceMap<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect(),
        }
    }

    /// Position of the `label` key of item `index` in the top-level sequence
    /// under `field`.
    pub(crate) fn sequence_item_label(&self, field: &str, index: usize) -> Position {
        let Some(key) = self.top_level_key(field) else {
            return Position::START;
        };

        let block = self.block(key);
        let items = self.sequence_items(block.clone());
        let Some(&item) = items.get(index) else {
            return self.position(key);
        };
        let item_end = items.get(index + 1).copied().unwrap_or(block.end);

        if let Some(column) = self.key_column(item, "label") {
            return Position { line: item + 1, column };
        }

        // Keys of the item itself sit at its content column; deeper lines
        // belong to nested components.
        let Some(content_indent) = self.item_content_indent(item, item_end) else {
            return self.position(item);
        };
        (item + 1..item_end)
            .find(|&idx| {
                let line = self.lines[idx];
                is_content(line)
                    && indent(line) == content_indent
                    && key_name(line.trim_start()) == Some("label")
            })
            .map(|idx| Position {
                line: idx + 1,
                column: content_indent + 1,
            })
            .unwrap_or_else(|| self.position(item))
    }

    /// Indentation of the keys of the sequence item starting on line `item`:
    /// the column after `- `, or the first content line when the dash
    /// stands alone.
    fn item_content_indent(&self, item: usize, item_end: usize) -> Option<usize> {
        let line = self.lines[item];
        let after_dash = line.trim_start().strip_prefix('-')?;
        let rest = after_dash.trim_start();
        if !rest.is_empty() {
            return Some(line.len() - rest.len());
        }
        self.first_content(item + 1..item_end)
            .map(|idx| indent(self.lines[idx]))
    }

    /// Position of `label` used as a key under `parent.child`.
    pub(crate) fn nested_map_key(&self, parent: &str, child: &str, label: &str) -> Position {
        let Some(parent_idx) = self.top_level_key(parent) else {
            return Position::START;
        };

        let parent_block = self.block(parent_idx);
        let Some(child_idx) = self.direct_child_key(parent_block, child) else {
            return self.position(parent_idx);
        };

        let child_block = self.block(child_idx);
        let Some(entry_indent) = self
            .first_content(child_block.clone())
            .map(|idx| indent(self.lines[idx]))
        else {
            return self.position(child_idx);
        };

        child_block
            .filter(|&idx| is_content(self.lines[idx]) && indent(self.lines[idx]) == entry_indent)
            .find(|&idx| key_name(self.lines[idx].trim_start()) == Some(label))
            .map(|idx| self.position(idx))
            .unwrap_or_else(|| self.position(child_idx))
    }

    fn top_level_key(&self, key: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| indent(line) == 0 && key_name(line) == Some(key))
    }

    fn direct_child_key(&self, block: Range<usize>, key: &str) -> Option<usize> {
        let child_indent = indent(self.lines[self.first_content(block.clone())?]);
        block
            .filter(|&idx| is_content(self.lines[idx]) && indent(self.lines[idx]) == child_indent)
            .find(|&idx| key_name(self.lines[idx].trim_start()) == Some(key))
    }

    /// Lines belonging to the value of the key on line `start`.
    fn block(&self, start: usize) -> Range<usize> {
        let key_indent = indent(self.lines[start]);
        let end = (start + 1..self.lines.len())
            .find(|&idx| {
                let line = self.lines[idx];
                if !is_content(line) {
                    return false;
                }
                let line_indent = indent(line);
                // A sequence may sit at the same indentation as its key.
                line_indent < key_indent
                    || (line_indent == key_indent && !line.trim_start().starts_with('-'))
            })
            .unwrap_or(self.lines.len());
        start + 1..end
    }

    fn sequence_items(&self, block: Range<usize>) -> Vec<usize> {
        let Some(first) = self.first_content(block.clone()) else {
            return Vec::new();
        };
        if !is_item(self.lines[first]) {
            return Vec::new();
        }

        let item_indent = indent(self.lines[first]);
        block
            .filter(|&idx| indent(self.lines[idx]) == item_indent && is_item(self.lines[idx]))
            .collect()
    }

    fn first_content(&self, block: Range<usize>) -> Option<usize> {
        block.into_iter().find(|&idx| is_content(self.lines[idx]))
    }

    /// 1-based column of `key:` on line `idx`, also when the key follows a
    /// sequence dash.
    fn key_column(&self, idx: usize, key: &str) -> Option<usize> {
        let line = self.lines[idx];
        let mut rest = line.trim_start();
        if let Some(after_dash) = rest.strip_prefix('-') {
            rest = after_dash.trim_start();
        }
        if key_name(rest) == Some(key) {
            Some(line.len() - rest.len() + 1)
        } else {
            None
        }
    }

    fn position(&self, idx: usize) -> Position {
        Position {
            line: idx + 1,
            column: indent(self.lines[idx]) + 1,
        }
    }
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_content(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

fn is_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed == "-" || trimmed.starts_with("- ")
}

/// Key of a `key: value` line, with surrounding quotes removed.
fn key_name(line: &str) -> Option<&str> {
    let (key, _) = line.split_once(':')?;
    let key = key.trim_end();
    let unquoted = key
        .strip_prefix('"')
        .and_then(|k| k.strip_suffix('"'))
        .or_else(|| key.strip_prefix('\'').and_then(|k| k.strip_suffix('\'')))
        .unwrap_or(key);
    Some(unquoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "\
input:
  resource: foo

input_resources:
  - label: foo
    kafka: {}
  # comment
  - kafka: {}
    label: bar
cache_resources:
- label: c1
  memory: {}
- memory: {}
resources:
  inputs:
    legacy:
      http_server: {}
    \"quoted\": {}
";

    #[test]
    fn test_sequence_label_on_dash_line() {
        let map = SourceMap::new(SOURCE);
        assert_eq!(
            map.sequence_item_label("input_resources", 0),
            Position { line: 5, column: 5 }
        );
    }

    #[test]
    fn test_sequence_label_after_type() {
        let map = SourceMap::new(SOURCE);
        assert_eq!(
            map.sequence_item_label("input_resources", 1),
            Position { line: 9, column: 5 }
        );
    }

    #[test]
    fn test_sequence_at_key_indentation() {
        let map = SourceMap::new(SOURCE);
        assert_eq!(
            map.sequence_item_label("cache_resources", 0),
            Position { line: 11, column: 3 }
        );
        // No label key: the item itself.
        assert_eq!(
            map.sequence_item_label("cache_resources", 1),
            Position { line: 13, column: 1 }
        );
    }

    #[test]
    fn test_nested_labels_belong_to_children() {
        let source = "\
input_resources:
  - broker:
      inputs:
        - label: inner
          stdin: {}
  - broker:
      inputs:
        - label: inner2
          stdin: {}
    label: outer
  -
    kafka: {}
    label: bare_dash
";
        let map = SourceMap::new(source);
        assert_eq!(
            map.sequence_item_label("input_resources", 0),
            Position { line: 2, column: 3 }
        );
        assert_eq!(
            map.sequence_item_label("input_resources", 1),
            Position { line: 10, column: 5 }
        );
        assert_eq!(
            map.sequence_item_label("input_resources", 2),
            Position { line: 13, column: 5 }
        );
    }

    #[test]
    fn test_missing_entries_fall_back() {
        let map = SourceMap::new(SOURCE);
        assert_eq!(
            map.sequence_item_label("input_resources", 7),
            Position { line: 4, column: 1 }
        );
        assert_eq!(map.sequence_item_label("output_resources", 0), Position::START);
    }

    #[test]
    fn test_nested_map_key() {
        let map = SourceMap::new(SOURCE);
        assert_eq!(
            map.nested_map_key("resources", "inputs", "legacy"),
            Position { line: 16, column: 5 }
        );
        assert_eq!(
            map.nested_map_key("resources", "inputs", "quoted"),
            Position { line: 18, column: 5 }
        );
        assert_eq!(
            map.nested_map_key("resources", "caches", "x"),
            Position { line: 14, column: 1 }
        );
    }
}
