//! Convert Atlassian Document Format (ADF) documents to Markdown.
//!
//! ```
//! let adf = r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"hi"}]}]}"#;
//! assert_eq!(adf2md::convert(adf).unwrap(), "hi\n");
//! assert_eq!(adf2md::convert("hello world").unwrap(), "hello world");
//! ```

mod config;
mod error;
mod markdown;
mod node;
mod parser;

pub use config::{Config, LimitsConfig, MarkdownConfig, OutputConfig};
pub use error::{Error, Result};
pub use node::{Mark, Node, TableCell, TableRow};

use serde_json::Value;

/// Parse an ADF value into a node tree.
pub fn parse(value: &Value, config: &Config) -> Result<Node> {
    parser::parse(value, config.limits.max_depth)
}

/// Convert ADF JSON text to Markdown using default config.
///
/// Text that is not valid JSON is returned unchanged.
pub fn convert(input: &str) -> Result<String> {
    convert_with_config(input, &Config::compiled_default())
}

/// Convert ADF JSON text to Markdown with custom config.
pub fn convert_with_config(input: &str, config: &Config) -> Result<String> {
    let value: Value = match serde_json::from_str(input) {
        Ok(value) => value,
        // serde_json 1.x exposes no public code for this; its message for
        // nesting past 128 levels starts with this text.
        Err(e) if e.to_string().starts_with("recursion limit exceeded") => {
            return Err(Error::JsonTooDeep);
        }
        Err(e) => {
            tracing::debug!("input is not JSON ({e}), passing it through");
            return Ok(input.to_string());
        }
    };
    convert_value_with_config(&value, config)
}

/// Convert an already parsed ADF value using default config.
pub fn convert_value(value: &Value) -> Result<String> {
    convert_value_with_config(value, &Config::compiled_default())
}

/// Convert an already parsed ADF value with custom config.
pub fn convert_value_with_config(value: &Value, config: &Config) -> Result<String> {
    let node = parse(value, config)?;
    convert_node_with_config(&node, config)
}

/// Render a node tree using default config.
pub fn convert_node(node: &Node) -> Result<String> {
    convert_node_with_config(node, &Config::compiled_default())
}

/// Render a node tree with custom config.
pub fn convert_node_with_config(node: &Node, config: &Config) -> Result<String> {
    markdown::node_to_markdown(node, config)
}
