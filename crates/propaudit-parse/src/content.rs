//! Text-only content stream interpretation.
//!
//! Walks a page's decoded operations tracking the graphics and text
//! matrices, and emits positioned [`Word`]s in top-left page coordinates.
//! Painting, clipping, and XObject operators are ignored: the audit engine
//! only needs word boxes and reading text, and best-effort extraction must
//! not fail on operators it does not understand.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use propaudit_core::{BBox, StatementPage, Word, cluster_rows};

use crate::error::BackendError;
use crate::fonts;

/// Tolerance when grouping words into plain-text lines.
const LINE_TOLERANCE: f64 = 3.0;

/// Row-vector affine transform `[a, b, c, d, e, f]`.
type Matrix = [f64; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `a` applied first, then `b`.
fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

fn translate(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

fn apply(m: &Matrix, x: f64, y: f64) -> (f64, f64) {
    (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(f64::from(*f)),
        _ => None,
    }
}

/// Follow a reference one level; plain objects pass through.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Width metrics and decoding handle for one page font resource.
struct FontInfo<'a> {
    dict: &'a Dictionary,
    builtin: Option<&'static fonts::BuiltinFont>,
    /// First character code covered by `widths`.
    first_char: i64,
    /// Explicit /Widths entries in 1/1000 em units; empty when absent.
    widths: Vec<f64>,
}

impl<'a> FontInfo<'a> {
    fn from_dict(doc: &'a Document, dict: &'a Dictionary) -> FontInfo<'a> {
        let builtin = dict
            .get(b"BaseFont")
            .ok()
            .and_then(|obj| obj.as_name().ok())
            .map(|name| String::from_utf8_lossy(name).to_string())
            .and_then(|name| {
                // Strip subset prefixes like "ABCDEF+Helvetica".
                let base = name.rsplit_once('+').map(|(_, b)| b).unwrap_or(&name);
                fonts::lookup(base)
            });

        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0);
        let widths = dict
            .get(b"Widths")
            .ok()
            .map(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_array().ok())
            .map(|array| {
                array
                    .iter()
                    .map(|obj| object_to_f64(resolve(doc, obj)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        FontInfo {
            dict,
            builtin,
            first_char,
            widths,
        }
    }

    /// Glyph width for a character code, in 1/1000 em units.
    fn width_units(&self, code: u8) -> f64 {
        let idx = i64::from(code) - self.first_char;
        if idx >= 0 {
            if let Some(&w) = self.widths.get(idx as usize) {
                if w > 0.0 {
                    return w;
                }
            }
        }
        match self.builtin {
            Some(font) => {
                let w = f64::from(font.widths[code as usize]);
                if w > 0.0 { w } else { f64::from(fonts::DEFAULT_WIDTH) }
            }
            None => f64::from(fonts::DEFAULT_WIDTH),
        }
    }

    fn ascent(&self) -> f64 {
        self.builtin.map(|f| f.ascent()).unwrap_or(0.8)
    }

    fn descent(&self) -> f64 {
        self.builtin.map(|f| f.descent()).unwrap_or(-0.2)
    }
}

/// Decode a content-stream string through the font's encoding, falling
/// back to UTF-16BE (BOM-marked) and then Latin-1.
fn decode_string(doc: &Document, font_dict: Option<&Dictionary>, bytes: &[u8]) -> String {
    if let Some(dict) = font_dict {
        if let Ok(encoding) = dict.get_font_encoding(doc) {
            if let Ok(text) = Document::decode_text(&encoding, bytes) {
                return text;
            }
        }
    }
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Decoded characters paired with the byte codes that produced them, for
/// width lookup. When decoding changes the length (multi-byte encodings),
/// ASCII characters keep their own code and the rest fall back to the
/// average width.
fn decode_chars(doc: &Document, font: Option<&FontInfo>, bytes: &[u8]) -> Vec<(char, u8)> {
    let text = decode_string(doc, font.map(|f| f.dict), bytes);
    let chars: Vec<char> = text.chars().collect();
    if chars.len() == bytes.len() {
        chars.into_iter().zip(bytes.iter().copied()).collect()
    } else {
        chars
            .into_iter()
            .map(|ch| (ch, if ch.is_ascii() { ch as u8 } else { 0 }))
            .collect()
    }
}

/// One element of a text-showing operation.
enum ShowItem<'a> {
    Text(&'a [u8]),
    /// TJ position adjustment in 1/1000 em units.
    Adjust(f64),
}

struct Interpreter<'a> {
    doc: &'a Document,
    fonts: BTreeMap<Vec<u8>, FontInfo<'a>>,
    /// MediaBox left edge, subtracted from device x.
    page_x0: f64,
    /// MediaBox top edge in PDF coordinates, used for the y-flip.
    page_top: f64,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    font_name: Vec<u8>,
    font_size: f64,
    char_spacing: f64,
    word_spacing: f64,
    leading: f64,
    words: Vec<Word>,
}

impl<'a> Interpreter<'a> {
    fn new(doc: &'a Document, fonts: BTreeMap<Vec<u8>, FontInfo<'a>>, media: [f64; 4]) -> Self {
        Self {
            doc,
            fonts,
            page_x0: media[0],
            page_top: media[3],
            ctm: IDENTITY,
            ctm_stack: Vec::new(),
            tm: IDENTITY,
            tlm: IDENTITY,
            font_name: Vec::new(),
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            leading: 0.0,
            words: Vec::new(),
        }
    }

    fn next_line(&mut self, tx: f64, ty: f64) {
        self.tlm = multiply(&translate(tx, ty), &self.tlm);
        self.tm = self.tlm;
    }

    fn run(&mut self, content: &Content) {
        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => self.ctm_stack.push(self.ctm),
                "Q" => {
                    if let Some(ctm) = self.ctm_stack.pop() {
                        self.ctm = ctm;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operands(operands) {
                        self.ctm = multiply(&m, &self.ctm);
                    }
                }
                "BT" => {
                    self.tm = IDENTITY;
                    self.tlm = IDENTITY;
                }
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Ok(name) = operands[0].as_name() {
                            self.font_name = name.to_vec();
                        }
                        if let Some(size) = object_to_f64(&operands[1]) {
                            self.font_size = size;
                        }
                    }
                }
                "Tc" => {
                    if let Some(v) = operands.first().and_then(object_to_f64) {
                        self.char_spacing = v;
                    }
                }
                "Tw" => {
                    if let Some(v) = operands.first().and_then(object_to_f64) {
                        self.word_spacing = v;
                    }
                }
                "TL" => {
                    if let Some(v) = operands.first().and_then(object_to_f64) {
                        self.leading = v;
                    }
                }
                "Td" => {
                    if let (Some(tx), Some(ty)) = numeric_pair(operands) {
                        self.next_line(tx, ty);
                    }
                }
                "TD" => {
                    if let (Some(tx), Some(ty)) = numeric_pair(operands) {
                        self.leading = -ty;
                        self.next_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operands(operands) {
                        self.tm = m;
                        self.tlm = m;
                    }
                }
                "T*" => self.next_line(0.0, -self.leading),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        self.show(&[ShowItem::Text(bytes)]);
                    }
                }
                "TJ" => {
                    if let Some(Ok(array)) = operands.first().map(|obj| obj.as_array()) {
                        let items: Vec<ShowItem> = array
                            .iter()
                            .filter_map(|obj| match obj {
                                Object::String(bytes, _) => Some(ShowItem::Text(bytes)),
                                other => object_to_f64(other).map(ShowItem::Adjust),
                            })
                            .collect();
                        self.show(&items);
                    }
                }
                "'" => {
                    self.next_line(0.0, -self.leading);
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        self.show(&[ShowItem::Text(bytes)]);
                    }
                }
                "\"" => {
                    if operands.len() >= 3 {
                        if let Some(aw) = object_to_f64(&operands[0]) {
                            self.word_spacing = aw;
                        }
                        if let Some(ac) = object_to_f64(&operands[1]) {
                            self.char_spacing = ac;
                        }
                        self.next_line(0.0, -self.leading);
                        if let Object::String(bytes, _) = &operands[2] {
                            self.show(&[ShowItem::Text(bytes)]);
                        }
                    }
                }
                // Painting, path, color, and XObject operators carry no text.
                _ => {}
            }
        }
    }

    /// Execute one text-showing operation: build words from non-whitespace
    /// runs, advance the pen by glyph widths and spacing, then advance the
    /// text matrix by the total displacement.
    fn show(&mut self, items: &[ShowItem]) {
        let font = self.fonts.get(&self.font_name);
        let size = self.font_size;
        let ascent = font.map(|f| f.ascent()).unwrap_or(0.8) * size;
        let descent = font.map(|f| f.descent()).unwrap_or(-0.2) * size;
        let trm = multiply(&self.tm, &self.ctm);

        let mut pen = 0.0_f64;
        let mut word_text = String::new();
        let mut word_start = 0.0_f64;
        let mut finished: Vec<(String, f64, f64)> = Vec::new();

        for item in items {
            match item {
                ShowItem::Adjust(amount) => {
                    pen -= amount / 1000.0 * size;
                }
                ShowItem::Text(bytes) => {
                    for (ch, code) in decode_chars(self.doc, font, bytes) {
                        let advance = font
                            .map(|f| f.width_units(code))
                            .unwrap_or(f64::from(fonts::DEFAULT_WIDTH))
                            / 1000.0
                            * size
                            + self.char_spacing
                            + if code == b' ' { self.word_spacing } else { 0.0 };
                        if ch.is_whitespace() {
                            if !word_text.is_empty() {
                                finished.push((std::mem::take(&mut word_text), word_start, pen));
                            }
                        } else {
                            if word_text.is_empty() {
                                word_start = pen;
                            }
                            word_text.push(ch);
                        }
                        pen += advance;
                    }
                }
            }
        }
        if !word_text.is_empty() {
            finished.push((word_text, word_start, pen));
        }

        for (text, x_start, x_end) in finished {
            let word = self.make_word(text, x_start, x_end, ascent, descent, &trm);
            self.words.push(word);
        }

        self.tm = multiply(&translate(pen, 0.0), &self.tm);
    }

    /// Transform a word's text-space extent into a top-left page box.
    fn make_word(
        &self,
        text: String,
        x_start: f64,
        x_end: f64,
        ascent: f64,
        descent: f64,
        trm: &Matrix,
    ) -> Word {
        let corners = [
            apply(trm, x_start, descent),
            apply(trm, x_start, ascent),
            apply(trm, x_end, descent),
            apply(trm, x_end, ascent),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
        let max_y = corners.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

        Word::new(
            text,
            BBox::new(
                min_x - self.page_x0,
                self.page_top - max_y,
                max_x - self.page_x0,
                self.page_top - min_y,
            ),
        )
    }
}

fn matrix_operands(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY;
    for (slot, obj) in m.iter_mut().zip(operands) {
        *slot = object_to_f64(obj)?;
    }
    Some(m)
}

fn numeric_pair(operands: &[Object]) -> (Option<f64>, Option<f64>) {
    (
        operands.first().and_then(object_to_f64),
        operands.get(1).and_then(object_to_f64),
    )
}

/// Assemble the plain-text reading view from positioned words: cluster
/// into visual lines, join each line's words with single spaces, and join
/// lines top to bottom.
fn assemble_text(words: &[Word]) -> String {
    cluster_rows(words, LINE_TOLERANCE)
        .iter()
        .map(|row| row.text())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Look up a key on the page dictionary, walking /Parent links for
/// inheritable attributes like /MediaBox.
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current_id = page_id;
    loop {
        let dict = doc.get_object(current_id).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current_id = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
}

/// US Letter, used when a page carries no resolvable MediaBox.
const FALLBACK_MEDIA: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

fn media_box(doc: &Document, page_id: ObjectId) -> [f64; 4] {
    let Some(array) = resolve_inherited(doc, page_id, b"MediaBox")
        .map(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_array().ok())
    else {
        return FALLBACK_MEDIA;
    };
    if array.len() != 4 {
        return FALLBACK_MEDIA;
    }
    let mut media = FALLBACK_MEDIA;
    for (slot, obj) in media.iter_mut().zip(array) {
        match object_to_f64(resolve(doc, obj)) {
            Some(v) => *slot = v,
            None => return FALLBACK_MEDIA,
        }
    }
    media
}

/// Decode one page into plain text and positioned words.
pub fn extract_page(doc: &Document, page_id: ObjectId) -> Result<StatementPage, BackendError> {
    let content_data = doc
        .get_page_content(page_id)
        .map_err(|e| BackendError::Content(e.to_string()))?;
    let content =
        Content::decode(&content_data).map_err(|e| BackendError::Content(e.to_string()))?;

    let fonts: BTreeMap<Vec<u8>, FontInfo> = doc
        .get_page_fonts(page_id)
        .unwrap_or_default()
        .into_iter()
        .map(|(name, dict)| (name, FontInfo::from_dict(doc, dict)))
        .collect();

    let mut interpreter = Interpreter::new(doc, fonts, media_box(doc, page_id));
    interpreter.run(&content);

    let text = assemble_text(&interpreter.words);
    Ok(StatementPage::new(text, interpreter.words))
}
