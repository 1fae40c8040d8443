use crate::config::Config;
use crate::error::{Error, Result};
use crate::node::{Mark, Node, TableRow};

/// Convert a node tree to Markdown
pub fn node_to_markdown(node: &Node, config: &Config) -> Result<String> {
    let renderer = Renderer { config };
    let mut out = String::new();
    renderer.emit(node, Context::default(), &mut out)?;
    Ok(out)
}

struct Renderer<'a> {
    config: &'a Config,
}

#[derive(Clone, Copy, Default)]
struct Context {
    in_table: bool,
    depth: usize,
}

impl Context {
    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn table_cell(self) -> Self {
        Self {
            in_table: true,
            depth: self.depth + 1,
        }
    }
}

impl Renderer<'_> {
    fn emit(&self, node: &Node, ctx: Context, out: &mut String) -> Result<()> {
        let limit = self.config.limits.max_depth;
        if ctx.depth >= limit {
            return Err(Error::TooDeep { limit });
        }

        match node {
            Node::Document { content } => {
                for (i, child) in content.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    self.emit(child, ctx.child(), out)?;
                }
            }
            Node::Heading { level, content } => {
                let level = self.heading_level(*level)?;
                out.push_str(&"#".repeat(level));
                out.push(' ');
                self.emit_all(content, ctx, out)?;
                out.push('\n');
            }
            Node::Paragraph { content } => {
                self.emit_all(content, ctx, out)?;
                out.push('\n');
            }
            Node::Text { text, marks } => {
                let mut text = if ctx.in_table && self.config.markdown.escape_table_pipes {
                    text.replace('|', "\\|")
                } else {
                    text.clone()
                };
                // Each mark wraps everything applied before it
                for mark in marks {
                    text = match mark {
                        Mark::Strong => format!("**{text}**"),
                        Mark::Emphasis => format!("*{text}*"),
                        Mark::Code => format!("`{text}`"),
                    };
                }
                out.push_str(&text);
            }
            Node::CodeBlock { language, content } => {
                out.push_str("```");
                out.push_str(language);
                out.push('\n');
                self.emit_all(content, ctx, out)?;
                out.push_str("\n```\n");
            }
            Node::BulletList { items } => {
                if let Some(items) = items {
                    self.emit_list(items, false, ctx, out)?;
                }
            }
            Node::OrderedList { items } => {
                if let Some(items) = items {
                    self.emit_list(items, true, ctx, out)?;
                }
            }
            Node::ListItem { content } => {
                out.push_str(self.inline(content, ctx)?.trim());
            }
            Node::Table { rows } => self.emit_table(rows, ctx, out)?,
            Node::HardBreak => out.push('\n'),
            Node::Unknown { content, .. } => {
                tracing::debug!(
                    node_type = ?node.type_name(),
                    "rendering unknown node as a container"
                );
                if let Some(content) = content {
                    self.emit_all(content, ctx, out)?;
                }
            }
        }

        Ok(())
    }

    fn emit_all(&self, nodes: &[Node], ctx: Context, out: &mut String) -> Result<()> {
        for node in nodes {
            self.emit(node, ctx.child(), out)?;
        }
        Ok(())
    }

    fn inline(&self, nodes: &[Node], ctx: Context) -> Result<String> {
        let mut out = String::new();
        self.emit_all(nodes, ctx, &mut out)?;
        Ok(out)
    }

    fn heading_level(&self, level: i64) -> Result<usize> {
        if self.config.markdown.clamp_heading_levels {
            return Ok(level.clamp(1, 6) as usize);
        }
        match usize::try_from(level) {
            Ok(n) if n <= self.config.limits.max_heading_level => Ok(n),
            _ => Err(Error::InvalidHeadingLevel(level)),
        }
    }

    /// An empty item list still emits the trailing newline.
    fn emit_list(&self, items: &[Node], ordered: bool, ctx: Context, out: &mut String) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let mut text = String::new();
            self.emit(item, ctx.child(), &mut text)?;
            if ordered {
                out.push_str(&format!("{}. ", i + 1));
            } else {
                out.push_str("- ");
            }
            out.push_str(text.trim());
        }
        out.push('\n');
        Ok(())
    }

    /// Header detection looks at the first row only, so header cells in
    /// later rows never produce a separator.
    fn emit_table(&self, rows: &[TableRow], ctx: Context, out: &mut String) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let dashes = "-".repeat(self.config.markdown.table_separator_width);
        for (i, row) in rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(row.cells.len());
            for cell in &row.cells {
                let text = self.inline(&cell.content, ctx.child().table_cell())?;
                cells.push(text.trim().to_string());
            }

            out.push_str("| ");
            out.push_str(&cells.join(" | "));
            out.push_str(" |\n");

            if i == 0 && row.cells.iter().any(|cell| cell.is_header) {
                out.push('|');
                out.push_str(&vec![dashes.as_str(); row.cells.len()].join("|"));
                out.push_str("|\n");
            }
        }
        out.push('\n');
        Ok(())
    }
}
