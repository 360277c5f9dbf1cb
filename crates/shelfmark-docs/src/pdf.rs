//! # PDF Writer
//!
//! Turns a layout [`Document`] into PDF bytes with `lopdf`.
//!
//! ```text
//! Catalog ─► Pages (MediaBox, shared Resources)
//!              ├── Font    F1 Helvetica, F2 Helvetica-Bold (WinAnsiEncoding)
//!              ├── XObject img-N  DeviceGray 8-bit, one per Document image
//!              └── Kids    Page ─► content stream (one q…Q block per element)
//! ```
//!
//! Layout coordinates are top-left based; PDF user space is bottom-left, so
//! every `y` is flipped against the page height. The output carries no
//! timestamps and no file ID, so the same document always yields the same
//! bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream, StringFormat};

use crate::document::{Align, Document, Element, TextRun, Tone, Weight};
use crate::error::{DocError, DocResult};

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

/// Baseline offset below the top of a text box, as a fraction of font size.
const ASCENT: f32 = 0.8;
const MUTED_GRAY: f32 = 0.4;
const FILL_GRAY: f32 = 0.94;

/// Serializes `doc` as a PDF 1.5 file.
pub fn write(doc: &Document) -> DocResult<Vec<u8>> {
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let regular = pdf.add_object(font("Helvetica"));
    let bold = pdf.add_object(font("Helvetica-Bold"));

    let mut xobjects = Dictionary::new();
    for image in &doc.images {
        let bitmap = &image.bitmap;
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(bitmap.width()),
                "Height" => i64::from(bitmap.height()),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8_i64,
            },
            bitmap.pixels().to_vec(),
        );
        xobjects.set(image.id.as_bytes().to_vec(), pdf.add_object(stream));
    }

    let resources = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
        "XObject" => xobjects,
    });

    let height = doc.page_size.height;
    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let operations: Vec<Operation> = page
            .elements
            .iter()
            .flat_map(|element| draw(element, height))
            .collect();
        let content = Content { operations }
            .encode()
            .map_err(|e| DocError::Pdf(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content));

        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(doc.page_size.width),
                Object::Real(height),
            ],
        }),
    );

    let catalog = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info = pdf.add_object(dictionary! {
        "Title" => Object::String(win_ansi(&doc.title), StringFormat::Literal),
        "Producer" => Object::String(b"Shelfmark".to_vec(), StringFormat::Literal),
    });
    pdf.trailer.set("Root", catalog);
    pdf.trailer.set("Info", info);

    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| DocError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

/// Operations for one element, wrapped in a save/restore pair.
fn draw(element: &Element, page_height: f32) -> Vec<Operation> {
    let mut ops = vec![op("q", vec![])];

    match element {
        Element::Text(run) => ops.extend(draw_text(run, page_height)),
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            thickness,
        } => {
            ops.push(op("w", vec![real(*thickness)]));
            ops.push(op("m", vec![real(*x1), real(page_height - y1)]));
            ops.push(op("l", vec![real(*x2), real(page_height - y2)]));
            ops.push(op("S", vec![]));
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            filled,
            border,
        } => {
            let rect = vec![real(*x), real(page_height - y - height), real(*width), real(*height)];
            if *filled {
                ops.push(op("g", vec![real(FILL_GRAY)]));
                ops.push(op("re", rect.clone()));
                ops.push(op("f", vec![]));
            }
            if *border > 0.0 {
                ops.push(op("w", vec![real(*border)]));
                ops.push(op("re", rect));
                ops.push(op("S", vec![]));
            }
        }
        Element::Image {
            x,
            y,
            width,
            height,
            image,
        } => {
            ops.push(op(
                "cm",
                vec![
                    real(*width),
                    real(0.0),
                    real(0.0),
                    real(*height),
                    real(*x),
                    real(page_height - y - height),
                ],
            ));
            ops.push(op("Do", vec![Object::Name(image.as_bytes().to_vec())]));
        }
    }

    ops.push(op("Q", vec![]));
    ops
}

fn draw_text(run: &TextRun, page_height: f32) -> Vec<Operation> {
    let bytes = win_ansi(&run.content);
    let advance = text_width(&bytes, run.weight, run.size);
    let x = match run.align {
        Align::Left => run.x,
        Align::Center => run.x + (run.width - advance) / 2.0,
        Align::Right => run.x + run.width - advance,
    };
    let baseline = page_height - run.y - run.size * ASCENT;
    let font = match run.weight {
        Weight::Regular => REGULAR_FONT,
        Weight::Bold => BOLD_FONT,
    };
    let gray = match run.tone {
        Tone::Normal => 0.0,
        Tone::Muted => MUTED_GRAY,
    };

    vec![
        op("g", vec![real(gray)]),
        op("BT", vec![]),
        op("Tf", vec![Object::Name(font.to_vec()), real(run.size)]),
        op("Td", vec![real(x), real(baseline)]),
        op("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
        op("ET", vec![]),
    ]
}

/// Text in the standard fonts' WinAnsi encoding. The rupee sign has no
/// slot and is spelled out; other unmapped characters become `?`.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '₹' => out.extend_from_slice(b"Rs."),
            ' '..='~' | '\u{a0}'..='\u{ff}' => out.push(c as u8),
            _ => out.push(match c {
                '€' => 0x80,
                '‚' => 0x82,
                '…' => 0x85,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '™' => 0x99,
                _ => b'?',
            }),
        }
    }
    out
}

/// Advance width in points, from the Helvetica AFM metrics.
fn text_width(bytes: &[u8], weight: Weight, size: f32) -> f32 {
    let table = match weight {
        Weight::Regular => &HELVETICA,
        Weight::Bold => &HELVETICA_BOLD,
    };
    let units: u32 = bytes
        .iter()
        .map(|&b| match b {
            32..=126 => u32::from(table[usize::from(b - 32)]),
            _ => 556,
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Glyph widths for bytes 32..=126, 1/1000 em.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::document::DocumentKind;
    use crate::encoder::Bitmap;

    /// Loads `bytes` back and returns its page count and every `Tj` string.
    pub(crate) fn read_back(bytes: &[u8]) -> (usize, Vec<String>) {
        let mut pdf = lopdf::Document::load_mem(bytes).unwrap();
        pdf.decompress();
        let mut texts: Vec<String> = Vec::new();
        for page_id in pdf.get_pages().values() {
            let content = Content::decode(&pdf.get_page_content(*page_id).unwrap()).unwrap();
            for operation in content.operations {
                if operation.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = operation.operands.first() {
                        texts.push(bytes.iter().map(|&b| b as char).collect());
                    }
                }
            }
        }
        (pdf.get_pages().len(), texts)
    }

    /// Number of `Do` image draws across all pages.
    pub(crate) fn image_draws(bytes: &[u8]) -> usize {
        let mut pdf = lopdf::Document::load_mem(bytes).unwrap();
        pdf.decompress();
        pdf.get_pages()
            .values()
            .map(|id| {
                Content::decode(&pdf.get_page_content(*id).unwrap())
                    .unwrap()
                    .operations
                    .iter()
                    .filter(|o| o.operator == "Do")
                    .count()
            })
            .sum()
    }

    fn sample() -> Document {
        let mut doc = Document::new(DocumentKind::LabelSheet, "Labels");
        let id = doc.add_image(Bitmap::from_modules(&[1, 0, 1], 1).unwrap());
        let page = doc.add_page();
        page.rect(10.0, 10.0, 100.0, 50.0, true, 1.0);
        page.image(20.0, 20.0, 60.0, 20.0, &id);
        page.text(TextRun::new(10.0, 70.0, 100.0, "₹ 499.00").bold().center());
        page.hline(10.0, 90.0, 100.0, 0.5);
        doc.add_page().text(TextRun::new(0.0, 0.0, 50.0, "second").muted());
        doc
    }

    #[test]
    fn test_writes_readable_pdf() {
        let bytes = write(&sample()).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let (pages, texts) = read_back(&bytes);
        assert_eq!(pages, 2);
        assert_eq!(texts, vec!["Rs. 499.00", "second"]);
        assert_eq!(image_draws(&bytes), 1);
    }

    #[test]
    fn test_image_is_embedded_once_as_gray() {
        let mut doc = sample();
        let id = doc.images[0].id.clone();
        doc.pages[1].image(0.0, 0.0, 10.0, 10.0, &id);
        let bytes = write(&doc).unwrap();

        let mut pdf = lopdf::Document::load_mem(&bytes).unwrap();
        pdf.decompress();
        let images: Vec<&Stream> = pdf
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| matches!(s.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image"))
            .collect();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].dict.get(b"Width").unwrap().as_i64().unwrap(), 5);
        assert_eq!(images[0].content, vec![255, 0, 255, 0, 255]);
        assert_eq!(image_draws(&bytes), 2);
    }

    #[test]
    fn test_output_is_byte_stable() {
        assert_eq!(write(&sample()).unwrap(), write(&sample()).unwrap());
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(win_ansi("Café – ₹5"), b"Caf\xe9 \x96 Rs.5".to_vec());
        assert_eq!(win_ansi("साड़ी"), b"?????".to_vec());
    }

    #[test]
    fn test_alignment_uses_glyph_widths() {
        // "ab" in Helvetica 10pt is 11.12pt wide
        let run = TextRun::new(100.0, 0.0, 50.0, "ab").right();
        let ops = draw_text(&run, 842.0);
        let td = ops.iter().find(|o| o.operator == "Td").unwrap();
        let x = td.operands[0].as_float().unwrap();
        assert!((x - 138.88).abs() < 0.01, "{x}");
        assert_eq!(td.operands[1].as_float().unwrap(), 834.0);
    }
}
