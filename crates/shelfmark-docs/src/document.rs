//! # Layout Document
//!
//! The output of every renderer: fixed-size pages of absolutely positioned
//! elements, measured in PDF points from the top-left corner.
//!
//! ```text
//! Document
//! ├── kind, title, page_size (A4 = 595 × 842 pt)
//! ├── images[]   each embedded once, referenced by id
//! └── pages[]
//!     └── elements[]  text | line | rect | image
//! ```
//!
//! Written out as PDF by [`Document::to_bytes`].

use crate::encoder::Bitmap;
use crate::error::DocResult;
use crate::pdf;

/// MIME type of [`Document::to_bytes`] output.
pub const DOCUMENT_CONTENT_TYPE: &str = "application/pdf";

// =============================================================================
// Page Geometry
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

pub const A4: PageSize = PageSize {
    width: 595.0,
    height: 842.0,
};

// =============================================================================
// Elements
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Invoice,
    LabelSheet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Muted,
}

/// A run of text inside a box `width` points wide starting at `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub align: Align,
    pub size: f32,
    pub weight: Weight,
    pub tone: Tone,
    pub content: String,
}

impl TextRun {
    /// Left-aligned, 10pt regular text.
    pub fn new(x: f32, y: f32, width: f32, content: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            align: Align::Left,
            size: 10.0,
            weight: Weight::Regular,
            tone: Tone::Normal,
            content: content.into(),
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    pub fn muted(mut self) -> Self {
        self.tone = Tone::Muted;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn center(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Light background fill.
        filled: bool,
        /// Border thickness, 0 for none.
        border: f32,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Id into [`Document::images`].
        image: String,
    },
}

// =============================================================================
// Pages & Document
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based.
    pub number: u32,
    pub elements: Vec<Element>,
}

impl Page {
    pub fn text(&mut self, run: TextRun) {
        self.elements.push(Element::Text(run));
    }

    pub fn hline(&mut self, x: f32, y: f32, width: f32, thickness: f32) {
        self.elements.push(Element::Line {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y,
            thickness,
        });
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, filled: bool, border: f32) {
        self.elements.push(Element::Rect {
            x,
            y,
            width,
            height,
            filled,
            border,
        });
    }

    pub fn image(&mut self, x: f32, y: f32, width: f32, height: f32, image: &str) {
        self.elements.push(Element::Image {
            x,
            y,
            width,
            height,
            image: image.to_string(),
        });
    }

    /// All text content on the page, in placement order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text(run) => Some(run.content.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    pub id: String,
    pub bitmap: Bitmap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: DocumentKind,
    pub title: String,
    pub page_size: PageSize,
    pub images: Vec<ImageResource>,
    pub pages: Vec<Page>,
}

impl Document {
    /// An A4 document with no pages yet.
    pub fn new(kind: DocumentKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            page_size: A4,
            images: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Starts a new page and returns it.
    pub fn add_page(&mut self) -> &mut Page {
        let number = self.pages.len() as u32 + 1;
        self.pages.push(Page {
            number,
            elements: Vec::new(),
        });
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// The page being drawn on, started if there is none yet.
    pub fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.add_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Embeds an image and returns its id (`img-1`, `img-2`, ...).
    pub fn add_image(&mut self, bitmap: Bitmap) -> String {
        let id = format!("img-{}", self.images.len() + 1);
        self.images.push(ImageResource {
            id: id.clone(),
            bitmap,
        });
        id
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The printable PDF handed to clients.
    pub fn to_bytes(&self) -> DocResult<Vec<u8>> {
        pdf::write(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_numbered() {
        let mut doc = Document::new(DocumentKind::Invoice, "INV-1");
        doc.add_page().text(TextRun::new(0.0, 0.0, 100.0, "one"));
        doc.add_page();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[1].number, 2);
        assert_eq!(doc.pages[0].texts().collect::<Vec<_>>(), vec!["one"]);
    }

    #[test]
    fn test_images_get_sequential_ids() {
        let mut doc = Document::new(DocumentKind::LabelSheet, "Labels");
        let strip = |modules: &[u8]| Bitmap::from_modules(modules, 0).unwrap();

        assert_eq!(doc.add_image(strip(&[1, 0])), "img-1");
        assert_eq!(doc.add_image(strip(&[1, 1, 0])), "img-2");
        assert_eq!(doc.images[1].bitmap.width(), 3);
    }
}
