use super::TextStyle;
use serde::{Deserialize, Serialize};

/// Font size in points, weight, and `[left, top, right, bottom]` margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub font_size: f32,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub margin: [f32; 4],
}

impl Style {
    pub const fn new(font_size: f32, bold: bool, margin: [f32; 4]) -> Self {
        Self {
            font_size,
            bold,
            margin,
        }
    }

    pub fn margin_top(&self) -> f32 {
        self.margin[1]
    }

    pub fn margin_bottom(&self) -> f32 {
        self.margin[3]
    }
}

/// The named styles a renderer draws text with. Any style may be overridden
/// from configuration; omitted ones keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub title: Style,
    pub heading: Style,
    pub subheading: Style,
    pub paragraph: Style,
    pub small: Style,
    /// `[left, top, right, bottom]` in points.
    pub page_margins: [f32; 4],
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            title: Style::new(16.0, true, [0.0, 0.0, 0.0, 10.0]),
            heading: Style::new(14.0, true, [0.0, 10.0, 0.0, 5.0]),
            subheading: Style::new(12.0, true, [0.0, 5.0, 0.0, 3.0]),
            paragraph: Style::new(10.0, false, [0.0, 5.0, 0.0, 5.0]),
            small: Style::new(8.0, false, [0.0, 0.0, 0.0, 0.0]),
            page_margins: [40.0, 40.0, 40.0, 40.0],
        }
    }
}

impl StyleSheet {
    pub fn style(&self, text_style: TextStyle) -> &Style {
        match text_style {
            TextStyle::Title => &self.title,
            TextStyle::Heading => &self.heading,
            TextStyle::Subheading => &self.subheading,
            TextStyle::Paragraph => &self.paragraph,
            TextStyle::Small => &self.small,
        }
    }
}
