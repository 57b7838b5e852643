use crate::types::ImageRef;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Named text styles resolved against a [`super::StyleSheet`] at render time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    Heading,
    Subheading,
    #[default]
    Paragraph,
    Small,
}

/// One node of the renderable layout tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// The centered document title.
    Title { text: String },
    /// A heading followed by the blocks it introduces.
    HeadingStack {
        heading: String,
        style: TextStyle,
        children: Vec<Block>,
    },
    Paragraph {
        text: String,
        style: TextStyle,
        align: Alignment,
    },
    BulletList { items: Vec<String> },
    Image {
        image: ImageRef,
        width: f32,
        align: Alignment,
    },
    TwoColumn { left: Box<Block>, right: Box<Block> },
    /// A labelled blank line to sign or fill in by hand, drawn centered.
    SignatureLine { label: String },
    Stack { children: Vec<Block> },
    Spacer { height: f32 },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::Paragraph, Alignment::Left)
    }

    pub fn styled(text: impl Into<String>, style: TextStyle, align: Alignment) -> Self {
        Block::Paragraph {
            text: text.into(),
            style,
            align,
        }
    }

    pub fn heading_stack(heading: impl Into<String>, style: TextStyle, children: Vec<Block>) -> Self {
        Block::HeadingStack {
            heading: heading.into(),
            style,
            children,
        }
    }

    pub fn signature_line(label: impl Into<String>) -> Self {
        Block::SignatureLine {
            label: label.into(),
        }
    }

    /// The text of a `Paragraph`, `Title` or heading, for inspection.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Title { text } | Block::Paragraph { text, .. } => Some(text),
            Block::HeadingStack { heading, .. } => Some(heading),
            _ => None,
        }
    }

    /// Direct children of `HeadingStack` and `Stack`; empty for leaves.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::HeadingStack { children, .. } | Block::Stack { children } => children,
            _ => &[],
        }
    }
}
