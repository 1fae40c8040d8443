use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::node::{Mark, Node, TableCell, TableRow};

/// Build a node tree from a parsed ADF value.
///
/// Missing or malformed optional fields fall back to their defaults. Values
/// that are not objects become childless unknown nodes.
pub fn parse(value: &Value, max_depth: usize) -> Result<Node> {
    TreeBuilder { max_depth }.node(value, 1)
}

struct TreeBuilder {
    max_depth: usize,
}

impl TreeBuilder {
    fn enter(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::TooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn node(&self, value: &Value, depth: usize) -> Result<Node> {
        self.enter(depth)?;

        let Some(object) = value.as_object() else {
            return Ok(Node::Unknown {
                node_type: None,
                content: None,
            });
        };

        let node_type = object.get("type").and_then(Value::as_str);
        let node = match node_type {
            Some("doc") => Node::Document {
                content: self.children(object, depth)?,
            },
            Some("heading") => Node::Heading {
                level: heading_level(attr(object, "level")),
                content: self.children(object, depth)?,
            },
            Some("paragraph") => Node::Paragraph {
                content: self.children(object, depth)?,
            },
            Some("text") => Node::Text {
                text: object
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                marks: marks(object),
            },
            Some("codeBlock") => Node::CodeBlock {
                language: attr(object, "language")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                content: self.children(object, depth)?,
            },
            Some("bulletList") => Node::BulletList {
                items: self.optional_children(object, depth)?,
            },
            Some("orderedList") => Node::OrderedList {
                items: self.optional_children(object, depth)?,
            },
            Some("listItem") => Node::ListItem {
                content: self.children(object, depth)?,
            },
            Some("table") => Node::Table {
                rows: self.rows(object, depth)?,
            },
            Some("hardBreak") => Node::HardBreak,
            other => Node::Unknown {
                node_type: other.map(str::to_string),
                content: self.optional_children(object, depth)?,
            },
        };

        Ok(node)
    }

    fn children(&self, object: &Map<String, Value>, depth: usize) -> Result<Vec<Node>> {
        match content(object) {
            Some(items) => self.nodes(items, depth),
            None => Ok(Vec::new()),
        }
    }

    fn optional_children(
        &self,
        object: &Map<String, Value>,
        depth: usize,
    ) -> Result<Option<Vec<Node>>> {
        content(object)
            .map(|items| self.nodes(items, depth))
            .transpose()
    }

    fn nodes(&self, items: &[Value], depth: usize) -> Result<Vec<Node>> {
        items
            .iter()
            .map(|item| self.node(item, depth + 1))
            .collect()
    }

    /// Keep only `tableRow` children; anything else is dropped.
    fn rows(&self, table: &Map<String, Value>, depth: usize) -> Result<Vec<TableRow>> {
        let Some(items) = content(table) else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        for item in items {
            let Some(row) = item.as_object() else {
                continue;
            };
            if row.get("type").and_then(Value::as_str) != Some("tableRow") {
                tracing::debug!(node_type = ?row.get("type"), "dropping non-row table child");
                continue;
            }
            self.enter(depth + 1)?;
            let cells = match content(row) {
                Some(cells) => cells
                    .iter()
                    .map(|cell| self.cell(cell, depth + 2))
                    .collect::<Result<Vec<_>>>()?,
                None => Vec::new(),
            };
            rows.push(TableRow { cells });
        }
        Ok(rows)
    }

    fn cell(&self, value: &Value, depth: usize) -> Result<TableCell> {
        self.enter(depth)?;
        let Some(cell) = value.as_object() else {
            return Ok(TableCell {
                is_header: false,
                content: Vec::new(),
            });
        };
        Ok(TableCell {
            is_header: cell.get("type").and_then(Value::as_str) == Some("tableHeader"),
            content: self.children(cell, depth)?,
        })
    }
}

fn content(object: &Map<String, Value>) -> Option<&[Value]> {
    object
        .get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

fn attr<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get("attrs").and_then(|attrs| attrs.get(name))
}

/// Resolve a heading level the way a loosely typed `level || 1` would.
///
/// Falsy values (absent, null, `false`, zero, empty string) become 1. Any
/// other value is coerced to an integer and truncated toward zero, so `0.5`,
/// `"0"` and `"abc"` all give 0. Non-finite or huge values saturate to
/// `i64::MAX`/`i64::MIN` and are rejected later by the renderer.
fn heading_level(value: Option<&Value>) -> i64 {
    let level = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return 1,
        Some(Value::Bool(true)) => 1,
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => return 1,
            Some(level) => level,
            None => match n.as_f64() {
                Some(f) if f == 0.0 => return 1,
                // 0.5 truncates to 0 but is not falsy
                Some(f) => f.trunc() as i64,
                None => 0,
            },
        },
        Some(Value::String(s)) if s.is_empty() => return 1,
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0
            } else {
                // NaN casts to 0, infinities saturate
                s.parse::<f64>().map_or(0, |f| f.trunc() as i64)
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => 0,
    };
    level
}

fn marks(object: &Map<String, Value>) -> Vec<Mark> {
    let Some(marks) = object.get("marks").and_then(Value::as_array) else {
        return Vec::new();
    };
    marks
        .iter()
        .filter_map(|mark| {
            let mark_type = mark.get("type").and_then(Value::as_str)?;
            let parsed = Mark::from_type(mark_type);
            if parsed.is_none() {
                tracing::debug!(mark_type, "ignoring unsupported mark");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(value: Value) -> Node {
        parse(&value, 64).unwrap()
    }

    #[test]
    fn heading_level_defaults() {
        let level = |attrs: Value| match build(json!({"type": "heading", "attrs": attrs})) {
            Node::Heading { level, .. } => level,
            other => panic!("expected heading, got {other:?}"),
        };
        assert_eq!(level(json!({})), 1);
        assert_eq!(level(json!({"level": 0})), 1);
        assert_eq!(level(json!({"level": null})), 1);
        assert_eq!(level(json!({"level": 3})), 3);
        assert_eq!(level(json!({"level": 2.9})), 2);
        assert_eq!(level(json!({"level": "4"})), 4);
        assert_eq!(level(json!({"level": 9})), 9);
        assert_eq!(level(json!({"level": -2})), -2);
        assert_eq!(level(json!({"level": 0.0})), 1);
        assert_eq!(level(json!({"level": ""})), 1);
        assert_eq!(level(json!({"level": false})), 1);

        match build(json!({"type": "heading"})) {
            Node::Heading { level, content } => {
                assert_eq!(level, 1);
                assert!(content.is_empty());
            }
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn truthy_heading_levels_coerce_toward_zero() {
        let level = |raw: Value| match build(json!({"type": "heading", "attrs": {"level": raw}})) {
            Node::Heading { level, .. } => level,
            other => panic!("expected heading, got {other:?}"),
        };
        assert_eq!(level(json!(0.5)), 0);
        assert_eq!(level(json!("0")), 0);
        assert_eq!(level(json!("abc")), 0);
        assert_eq!(level(json!(" ")), 0);
        assert_eq!(level(json!([3])), 0);
        assert_eq!(level(json!(true)), 1);
    }

    #[test]
    fn extreme_heading_levels_saturate() {
        let level = |raw: Value| match build(json!({"type": "heading", "attrs": {"level": raw}})) {
            Node::Heading { level, .. } => level,
            other => panic!("expected heading, got {other:?}"),
        };
        assert_eq!(level(json!(1e300)), i64::MAX);
        assert_eq!(level(json!(-1e300)), i64::MIN);
        assert_eq!(level(json!(u64::MAX)), i64::MAX);
        assert_eq!(level(json!("Infinity")), i64::MAX);
        assert_eq!(level(json!(i64::MAX)), i64::MAX);
    }

    #[test]
    fn list_content_absence_is_kept() {
        assert_eq!(
            build(json!({"type": "bulletList"})),
            Node::BulletList { items: None }
        );
        assert_eq!(
            build(json!({"type": "orderedList", "content": []})),
            Node::OrderedList {
                items: Some(vec![])
            }
        );
    }

    #[test]
    fn text_marks_keep_order_and_skip_unknown() {
        let node = build(json!({
            "type": "text",
            "text": "t",
            "marks": [{"type": "em"}, {"type": "link", "attrs": {"href": "x"}}, {"type": "strong"}, {"type": "code"}]
        }));
        assert_eq!(
            node,
            Node::Text {
                text: "t".to_string(),
                marks: vec![Mark::Emphasis, Mark::Strong, Mark::Code],
            }
        );
    }

    #[test]
    fn text_without_payload_is_empty() {
        assert_eq!(build(json!({"type": "text"})), Node::text(""));
    }

    #[test]
    fn code_block_language_defaults_to_empty() {
        match build(json!({"type": "codeBlock", "content": [{"type": "text", "text": "x"}]})) {
            Node::CodeBlock { language, content } => {
                assert_eq!(language, "");
                assert_eq!(content, vec![Node::text("x")]);
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn table_keeps_only_rows() {
        let node = build(json!({
            "type": "table",
            "content": [
                {"type": "paragraph"},
                {"type": "tableRow", "content": [
                    {"type": "tableHeader", "content": [{"type": "text", "text": "A"}]},
                    {"type": "tableCell"}
                ]},
                null,
                {"type": "tableRow"}
            ]
        }));
        let Node::Table { rows } = node else {
            panic!("expected table");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells.len(), 2);
        assert!(rows[0].cells[0].is_header);
        assert!(!rows[0].cells[1].is_header);
        assert!(rows[1].cells.is_empty());
    }

    #[test]
    fn unknown_types_keep_their_tag_and_children() {
        let node = build(json!({"type": "panel", "content": [{"type": "text", "text": "z"}]}));
        assert_eq!(node.type_name(), Some("panel"));
        assert_eq!(
            node,
            Node::Unknown {
                node_type: Some("panel".to_string()),
                content: Some(vec![Node::text("z")]),
            }
        );

        let bare = build(json!({"type": "rule"}));
        assert_eq!(
            bare,
            Node::Unknown {
                node_type: Some("rule".to_string()),
                content: None,
            }
        );
    }

    #[test]
    fn non_objects_become_empty_unknowns() {
        for value in [json!(null), json!(3), json!("doc"), json!([1, 2])] {
            assert_eq!(
                build(value),
                Node::Unknown {
                    node_type: None,
                    content: None,
                }
            );
        }
    }

    #[test]
    fn non_array_content_is_ignored() {
        assert_eq!(
            build(json!({"type": "paragraph", "content": "oops"})),
            Node::Paragraph { content: vec![] }
        );
    }

    #[test]
    fn depth_limit_is_enforced() {
        let doc = json!({"type": "doc", "content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "x"}]}
        ]});
        assert!(parse(&doc, 3).is_ok());
        assert!(matches!(parse(&doc, 2), Err(Error::TooDeep { limit: 2 })));
    }

    #[test]
    fn table_rows_and_cells_count_toward_depth() {
        let table = json!({"type": "table", "content": [
            {"type": "tableRow", "content": [
                {"type": "tableCell", "content": [{"type": "text", "text": "x"}]}
            ]}
        ]});
        assert!(parse(&table, 4).is_ok());
        assert!(matches!(parse(&table, 3), Err(Error::TooDeep { .. })));
    }
}
