/// Inline formatting attached to a text node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Strong,
    Emphasis,
    Code,
}

impl Mark {
    /// Map an ADF mark `type` to a supported mark.
    pub fn from_type(mark_type: &str) -> Option<Self> {
        match mark_type {
            "strong" => Some(Self::Strong),
            "em" => Some(Self::Emphasis),
            "code" => Some(Self::Code),
            _ => None,
        }
    }
}

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// `tableHeader` cells are headers, everything else is a data cell
    pub is_header: bool,
    pub content: Vec<Node>,
}

/// A table row (`tableRow`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// Document nodes parsed from ADF
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document {
        content: Vec<Node>,
    },
    Heading {
        /// Already defaulted: falsy values (absent, null, zero, empty string)
        /// become 1; other values are coerced to an integer.
        level: i64,
        content: Vec<Node>,
    },
    Paragraph {
        content: Vec<Node>,
    },
    Text {
        text: String,
        marks: Vec<Mark>,
    },
    CodeBlock {
        /// Empty when the source has no language.
        language: String,
        content: Vec<Node>,
    },
    /// `None` when the source has no `content`; an empty list still
    /// renders its trailing newline.
    BulletList {
        items: Option<Vec<Node>>,
    },
    OrderedList {
        items: Option<Vec<Node>>,
    },
    ListItem {
        content: Vec<Node>,
    },
    /// Only `tableRow` children survive parsing.
    Table {
        rows: Vec<TableRow>,
    },
    HardBreak,
    /// Any other `type`, rendered as a plain container.
    Unknown {
        node_type: Option<String>,
        content: Option<Vec<Node>>,
    },
}

impl Node {
    /// Plain text node with no marks.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// The ADF `type` tag this node was parsed from.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Node::Document { .. } => Some("doc"),
            Node::Heading { .. } => Some("heading"),
            Node::Paragraph { .. } => Some("paragraph"),
            Node::Text { .. } => Some("text"),
            Node::CodeBlock { .. } => Some("codeBlock"),
            Node::BulletList { .. } => Some("bulletList"),
            Node::OrderedList { .. } => Some("orderedList"),
            Node::ListItem { .. } => Some("listItem"),
            Node::Table { .. } => Some("table"),
            Node::HardBreak => Some("hardBreak"),
            Node::Unknown { node_type, .. } => node_type.as_deref(),
        }
    }
}
