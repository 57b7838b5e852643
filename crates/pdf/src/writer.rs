//! Top-to-bottom flow layout of [`Block`]s onto A4 pages.
//!
//! Positions are tracked as a distance from the top edge and flipped into PDF
//! coordinates only when an operation is emitted.

use crate::text::{line_height, text_width, wrap};
use crate::{Fonts, LoadedImages};
use draftsmith::layout::Style;
use draftsmith::{Alignment, Block, StyleSheet, TextStyle};
use printpdf::{
    LayerInternalId, Op, Pt, TextItem, TextMatrix, TextRenderingMode, XObjectTransform,
};
use std::mem;

const BULLET: &str = "\u{2022}";
const BULLET_INDENT: f32 = 12.0;
const BULLET_SPACING: f32 = 2.0;
const STACK_GAP: f32 = 10.0;
const COLUMN_GAP: f32 = 20.0;
const IMAGE_GAP: f32 = 5.0;
const MISSING_IMAGE_HEIGHT: f32 = 40.0;
const SIGNATURE_BLANK: &str = "____________________";

/// Horizontal band blocks are laid into.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Region {
    pub left: f32,
    pub width: f32,
}

impl Region {
    fn split(self) -> (Region, Region) {
        let width = (self.width - COLUMN_GAP) / 2.0;
        (
            Region {
                left: self.left,
                width,
            },
            Region {
                left: self.left + width + COLUMN_GAP,
                width,
            },
        )
    }
}

pub(crate) struct PageWriter<'a> {
    fonts: &'a Fonts,
    images: &'a LoadedImages,
    styles: &'a StyleSheet,
    layer: LayerInternalId,
    page_height: f32,
    pages: Vec<Vec<Op>>,
    ops: Vec<Op>,
    cursor: f32,
    /// Suppresses page breaks while a unit that must stay together is drawn.
    keep_together: bool,
}

impl<'a> PageWriter<'a> {
    pub fn new(
        fonts: &'a Fonts,
        images: &'a LoadedImages,
        styles: &'a StyleSheet,
        layer: LayerInternalId,
        page_height: f32,
    ) -> Self {
        Self {
            fonts,
            images,
            styles,
            ops: vec![Op::BeginLayer {
                layer_id: layer.clone(),
            }],
            layer,
            page_height,
            pages: Vec::new(),
            cursor: styles.page_margins[1],
            keep_together: false,
        }
    }

    /// Closes the last page and returns the operations of every page.
    pub fn finish(mut self) -> Vec<Vec<Op>> {
        self.ops.push(Op::EndLayer {
            layer_id: self.layer.clone(),
        });
        self.pages.push(self.ops);
        self.pages
    }

    fn top(&self) -> f32 {
        self.styles.page_margins[1]
    }

    fn bottom(&self) -> f32 {
        self.page_height - self.styles.page_margins[3]
    }

    fn new_page(&mut self) {
        self.ops.push(Op::EndLayer {
            layer_id: self.layer.clone(),
        });
        let finished = mem::replace(
            &mut self.ops,
            vec![Op::BeginLayer {
                layer_id: self.layer.clone(),
            }],
        );
        self.pages.push(finished);
        self.cursor = self.top();
    }

    /// Starts a new page unless `height` still fits on this one. A unit taller
    /// than a whole page is drawn from the top of the current page.
    fn ensure(&mut self, height: f32) {
        if !self.keep_together && self.cursor + height > self.bottom() && self.cursor > self.top() {
            self.new_page();
        }
    }

    // --- Drawing ---

    pub fn block(&mut self, block: &Block, region: Region) {
        let styles = self.styles;
        match block {
            Block::Title { text } => {
                let style = styles.style(TextStyle::Title);
                self.text(text, style, Alignment::Center, region);
            }
            Block::HeadingStack {
                heading,
                style,
                children,
            } => {
                let style = styles.style(*style);
                // Keep the heading on the same page as its first child.
                let lead = self.text_height(heading, style, region.width)
                    + children
                        .first()
                        .map_or(0.0, |child| self.measure(child, region));
                self.ensure(lead);
                self.text(heading, style, Alignment::Left, region);
                for child in children {
                    self.block(child, region);
                }
            }
            Block::Paragraph { text, style, align } => {
                let style = styles.style(*style);
                self.text(text, style, *align, region);
            }
            Block::BulletList { items } => self.bullets(items, region),
            Block::Image {
                image,
                width,
                align,
            } => self.image(image.as_str(), *width, *align, region),
            Block::TwoColumn { left, right } => {
                let (left_region, right_region) = region.split();
                let height = self
                    .measure(left, left_region)
                    .max(self.measure(right, right_region));
                self.ensure(height);

                let start = self.cursor;
                let keep = mem::replace(&mut self.keep_together, true);
                self.block(left, left_region);
                self.cursor = start;
                self.block(right, right_region);
                self.keep_together = keep;
                self.cursor = start + height;
            }
            Block::SignatureLine { label } => {
                let style = styles.style(TextStyle::Paragraph);
                let line = format!("{label}: {SIGNATURE_BLANK}");
                self.text(&line, style, Alignment::Center, region);
            }
            Block::Stack { children } => {
                let height = self.measure(block, region);
                self.ensure(height);
                for child in children {
                    self.block(child, region);
                }
                self.cursor += STACK_GAP;
            }
            Block::Spacer { height } => {
                self.ensure(*height);
                self.cursor += height;
            }
        }
    }

    fn text(&mut self, text: &str, style: &Style, align: Alignment, region: Region) {
        self.cursor += style.margin_top();
        let inset_left = style.margin[0];
        let width = (region.width - inset_left - style.margin[2]).max(1.0);
        let lh = line_height(style.font_size);
        for line in wrap(text, width, style.font_size, style.bold) {
            self.ensure(lh);
            let line_width = text_width(&line, style.font_size, style.bold);
            let x = match align {
                Alignment::Left => region.left + inset_left,
                Alignment::Center => region.left + inset_left + (width - line_width) / 2.0,
                Alignment::Right => region.left + inset_left + width - line_width,
            }
            .max(region.left);
            self.write_line(&line, x, style.font_size, style.bold);
            self.cursor += lh;
        }
        self.cursor += style.margin_bottom();
    }

    fn bullets(&mut self, items: &[String], region: Region) {
        let style = *self.styles.style(TextStyle::Paragraph);
        let lh = line_height(style.font_size);
        let width = (region.width - BULLET_INDENT).max(1.0);
        self.cursor += style.margin_top();
        for item in items {
            for (i, line) in wrap(item, width, style.font_size, false)
                .into_iter()
                .enumerate()
            {
                self.ensure(lh);
                if i == 0 {
                    self.write_line(BULLET, region.left, style.font_size, false);
                }
                self.write_line(&line, region.left + BULLET_INDENT, style.font_size, false);
                self.cursor += lh;
            }
            self.cursor += BULLET_SPACING;
        }
        self.cursor += style.margin_bottom();
    }

    fn image(&mut self, image: &str, width: f32, align: Alignment, region: Region) {
        let images = self.images;
        let Some(loaded) = images.get(image) else {
            self.ensure(MISSING_IMAGE_HEIGHT);
            self.cursor += MISSING_IMAGE_HEIGHT;
            return;
        };

        let width = width.min(region.width);
        let height = loaded.height_for(width);
        self.ensure(height);
        let x = match align {
            Alignment::Left => region.left,
            Alignment::Center => region.left + (region.width - width) / 2.0,
            Alignment::Right => region.left + region.width - width,
        };
        let scale = width / loaded.pixel_width;
        self.ops.push(Op::UseXobject {
            id: loaded.id.clone(),
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(self.page_height - self.cursor - height)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(72.0),
                ..Default::default()
            },
        });
        self.cursor += height + IMAGE_GAP;
    }

    fn write_line(&mut self, text: &str, x: f32, font_size: f32, bold: bool) {
        let font = self.fonts.pick(bold).clone();
        let baseline = self.page_height - self.cursor - font_size;
        self.ops.extend([
            Op::SetFontSize {
                size: Pt(font_size),
                font: font.clone(),
            },
            Op::StartTextSection,
            Op::SetTextMatrix {
                matrix: TextMatrix::Translate(Pt(x), Pt(baseline)),
            },
            Op::SetTextRenderingMode {
                mode: TextRenderingMode::Fill,
            },
            Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font,
            },
            Op::EndTextSection,
        ]);
    }

    // --- Measurement ---

    fn text_height(&self, text: &str, style: &Style, region_width: f32) -> f32 {
        let width = (region_width - style.margin[0] - style.margin[2]).max(1.0);
        let lines = wrap(text, width, style.font_size, style.bold).len() as f32;
        style.margin_top() + lines * line_height(style.font_size) + style.margin_bottom()
    }

    /// Height `block` occupies when drawn into `region`, ignoring page breaks.
    fn measure(&self, block: &Block, region: Region) -> f32 {
        match block {
            Block::Title { text } => {
                self.text_height(text, self.styles.style(TextStyle::Title), region.width)
            }
            Block::HeadingStack {
                heading,
                style,
                children,
            } => {
                self.text_height(heading, self.styles.style(*style), region.width)
                    + children
                        .iter()
                        .map(|child| self.measure(child, region))
                        .sum::<f32>()
            }
            Block::Paragraph { text, style, .. } => {
                self.text_height(text, self.styles.style(*style), region.width)
            }
            Block::BulletList { items } => {
                let style = self.styles.style(TextStyle::Paragraph);
                let width = (region.width - BULLET_INDENT).max(1.0);
                let lines: usize = items
                    .iter()
                    .map(|item| wrap(item, width, style.font_size, false).len())
                    .sum();
                style.margin_top()
                    + lines as f32 * line_height(style.font_size)
                    + items.len() as f32 * BULLET_SPACING
                    + style.margin_bottom()
            }
            Block::Image { image, width, .. } => match self.images.get(image.as_str()) {
                Some(loaded) => loaded.height_for(width.min(region.width)) + IMAGE_GAP,
                None => MISSING_IMAGE_HEIGHT,
            },
            Block::TwoColumn { left, right } => {
                let (left_region, right_region) = region.split();
                self.measure(left, left_region)
                    .max(self.measure(right, right_region))
            }
            Block::SignatureLine { label } => self.text_height(
                &format!("{label}: {SIGNATURE_BLANK}"),
                self.styles.style(TextStyle::Paragraph),
                region.width,
            ),
            Block::Stack { children } => {
                children
                    .iter()
                    .map(|child| self.measure(child, region))
                    .sum::<f32>()
                    + STACK_GAP
            }
            Block::Spacer { height } => *height,
        }
    }
}
