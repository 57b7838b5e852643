//! # Section Segmenter
//!
//! A single forward pass over the lines of normalized text that groups them
//! into titled sections of paragraphs and bullet runs.

use crate::constants::BULLET_MARKERS;
use serde::Serialize;
use std::mem;

/// Headings must be longer than this many characters.
const MIN_HEADING_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContentItem {
    Text(String),
    Bullets(Vec<String>),
}

/// A titled run of content. The untitled leading section has an empty title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub content: Vec<ContentItem>,
}

/// A line is a heading when it is entirely uppercase and longer than ten characters.
pub fn is_heading(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.chars().count() > MIN_HEADING_CHARS && trimmed.to_uppercase() == trimmed
}

/// The item text of a bullet line, or `None` when the line is not a bullet.
pub fn bullet_text(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(&BULLET_MARKERS[..])
        .map(str::trim_start)
}

pub fn segment(text: &str) -> Vec<Section> {
    let mut segmenter = Segmenter::default();
    for line in text.lines() {
        segmenter.feed(line);
    }
    segmenter.finish()
}

#[derive(Default)]
struct Segmenter {
    sections: Vec<Section>,
    title: Option<String>,
    content: Vec<ContentItem>,
    bullets: Vec<String>,
}

impl Segmenter {
    fn feed(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.flush_bullets();
            return;
        }

        if is_heading(trimmed) {
            self.close_section();
            self.title = Some(trimmed.to_string());
        } else if let Some(item) = bullet_text(trimmed) {
            self.bullets.push(item.to_string());
        } else {
            self.flush_bullets();
            self.content.push(ContentItem::Text(trimmed.to_string()));
        }
    }

    fn flush_bullets(&mut self) {
        if !self.bullets.is_empty() {
            let items = mem::take(&mut self.bullets);
            self.content.push(ContentItem::Bullets(items));
        }
    }

    fn close_section(&mut self) {
        self.flush_bullets();
        let content = mem::take(&mut self.content);
        match self.title.take() {
            Some(title) => self.sections.push(Section { title, content }),
            None if !content.is_empty() => self.sections.push(Section {
                title: String::new(),
                content,
            }),
            None => {}
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.close_section();
        self.sections
    }
}
