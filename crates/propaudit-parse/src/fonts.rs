//! Built-in Type1 font width tables.
//!
//! Provides glyph width data (in 1/1000 em-square units) for the standard
//! fonts that property statements actually use. Widths are used as a
//! fallback when a font dictionary lacks an explicit /Widths array. Width
//! data is sourced from Adobe AFM specifications and indexed by
//! WinAnsiEncoding character codes.

/// Width and vertical-extent data for a built-in font.
#[derive(Debug, Clone)]
pub struct BuiltinFont {
    /// Glyph widths indexed by character code (0-255), in 1/1000 em units.
    pub widths: [u16; 256],
    /// Font bounding box [llx, lly, urx, ury] in 1/1000 em units.
    pub font_bbox: [i16; 4],
}

impl BuiltinFont {
    /// Ascent above the baseline as a fraction of the em square.
    pub fn ascent(&self) -> f64 {
        f64::from(self.font_bbox[3]) / 1000.0
    }

    /// Descent below the baseline as a (negative) fraction of the em square.
    pub fn descent(&self) -> f64 {
        f64::from(self.font_bbox[1]) / 1000.0
    }
}

/// Glyph width used when no width data is available at all.
pub const DEFAULT_WIDTH: u16 = 500;

/// Look up built-in font data by BaseFont name.
///
/// Subset prefixes ("ABCDEF+Helvetica") are stripped by the caller.
/// Returns `None` for unknown font names; callers then fall back to the
/// font dictionary's /Widths array or [`DEFAULT_WIDTH`].
pub fn lookup(name: &str) -> Option<&'static BuiltinFont> {
    match name {
        "Courier" | "Courier-Bold" | "Courier-Oblique" | "Courier-BoldOblique" => Some(&COURIER),
        "Helvetica" | "Helvetica-Oblique" | "Arial" | "ArialMT" => Some(&HELVETICA),
        "Helvetica-Bold" | "Helvetica-BoldOblique" | "Arial-BoldMT" => Some(&HELVETICA_BOLD),
        _ => None,
    }
}

// Courier: monospaced, all widths 600.
static COURIER: BuiltinFont = BuiltinFont {
    widths: [600; 256],
    font_bbox: [-23, -250, 715, 805],
};

// Helvetica (also used for Helvetica-Oblique and the Arial aliases).
#[rustfmt::skip]
static HELVETICA: BuiltinFont = BuiltinFont {
    widths: [
        // 0-31: control characters
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        // 32-47: space ! " # $ % & ' ( ) * + , - . /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 48-63: 0 1 2 3 4 5 6 7 8 9 : ; < = > ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        // 64-79: @ A B C D E F G H I J K L M N O
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        // 80-95: P Q R S T U V W X Y Z [ \ ] ^ _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        // 96-111: ` a b c d e f g h i j k l m n o
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        // 112-127: p q r s t u v w x y z { | } ~ DEL
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
        // 128-159: WinAnsi punctuation/extension block
        556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
        0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
        // 160-191: Latin-1 supplement punctuation
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // 192-223: accented capitals
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // 224-255: accented lowercase
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    font_bbox: [-166, -225, 1000, 931],
};

// Helvetica-Bold (also used for Helvetica-BoldOblique).
#[rustfmt::skip]
static HELVETICA_BOLD: BuiltinFont = BuiltinFont {
    widths: [
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        // 32-47: space ! " # $ % & ' ( ) * + , - . /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 48-63: 0 1 2 3 4 5 6 7 8 9 : ; < = > ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        // 64-79: @ A B C D E F G H I J K L M N O
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        // 80-95: P Q R S T U V W X Y Z [ \ ] ^ _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        // 96-111: ` a b c d e f g h i j k l m n o
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        // 112-127: p q r s t u v w x y z { | } ~ DEL
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0,
        // 128-159: WinAnsi punctuation/extension block
        556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
        0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
        // 160-191: Latin-1 supplement punctuation
        278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // 192-223: accented capitals
        722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // 224-255: accented lowercase
        556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
        611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
    ],
    font_bbox: [-170, -228, 1003, 962],
};
