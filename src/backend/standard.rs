//! The 14 standard Type-1 fonts: name resolution, WinAnsi text encoding,
//! and AFM-derived glyph metrics so text can be measured without any
//! embedded font programs.

/// The font names every backend must resolve.
pub const STANDARD_FONT_NAMES: [&str; 14] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Symbol",
    "ZapfDingbats",
];

/// Glyph widths for the printable ASCII range (0x20..=0x7E), in font
/// units per 1000 em. Characters outside the range measure at the font's
/// default width.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StandardFont {
    pub(crate) name: &'static str,
    widths: &'static [u16; 95],
    default_width: u16,
}

impl StandardFont {
    pub(crate) fn by_name(name: &str) -> Option<StandardFont> {
        let (widths, default_width): (&'static [u16; 95], u16) = match name {
            // the oblique cuts share their upright widths
            "Helvetica" | "Helvetica-Oblique" => (&HELVETICA, 556),
            "Helvetica-Bold" | "Helvetica-BoldOblique" => (&HELVETICA_BOLD, 556),
            "Times-Roman" => (&TIMES_ROMAN, 500),
            "Times-Bold" => (&TIMES_BOLD, 500),
            "Times-Italic" => (&TIMES_ITALIC, 500),
            "Times-BoldItalic" => (&TIMES_BOLD_ITALIC, 500),
            "Courier" | "Courier-Bold" | "Courier-Oblique" | "Courier-BoldOblique" => {
                (&COURIER, 600)
            }
            "Symbol" => (&SYMBOL, 600),
            "ZapfDingbats" => (&ZAPF_DINGBATS, 788),
            _ => return None,
        };
        Some(StandardFont {
            name: STANDARD_FONT_NAMES
                .iter()
                .find(|&&n| n == name)
                .copied()?,
            widths,
            default_width,
        })
    }

    pub(crate) fn string_width(&self, text: &str) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .map(|&b| {
                if (0x20..=0x7E).contains(&b) {
                    self.widths[(b - 0x20) as usize] as f32
                } else {
                    self.default_width as f32
                }
            })
            .sum()
    }

    pub(crate) fn space_width(&self) -> f32 {
        self.widths[0] as f32
    }
}

/// Map text to WinAnsiEncoding bytes, dropping characters the encoding
/// cannot represent.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
static TIMES_ITALIC: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[rustfmt::skip]
static TIMES_BOLD_ITALIC: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

// all Courier cuts are monospaced at 600
static COURIER: [u16; 95] = [600; 95];

// the symbolic fonts never carry body text here; a flat approximation of
// their average advance keeps measurement defined for them
static SYMBOL: [u16; 95] = [600; 95];
static ZAPF_DINGBATS: [u16; 95] = [788; 95];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_all_fourteen_names() {
        for name in STANDARD_FONT_NAMES {
            let font = StandardFont::by_name(name).unwrap();
            assert_eq!(font.name, name);
        }
        assert!(StandardFont::by_name("Comic-Sans").is_none());
    }

    #[test]
    fn helvetica_widths() {
        let helv = StandardFont::by_name("Helvetica").unwrap();
        assert_eq!(helv.space_width(), 278.0);
        assert_eq!(helv.string_width("Hi"), 722.0 + 222.0);
        // oblique shares the metrics
        let oblique = StandardFont::by_name("Helvetica-Oblique").unwrap();
        assert_eq!(oblique.string_width("Hi"), helv.string_width("Hi"));
    }

    #[test]
    fn courier_is_monospaced() {
        let courier = StandardFont::by_name("Courier-Bold").unwrap();
        assert_eq!(courier.string_width("iW"), 1200.0);
    }

    #[test]
    fn winansi_maps_typographic_characters() {
        assert_eq!(to_winansi_bytes("a•b"), vec![b'a', 0x95, b'b']);
        assert_eq!(to_winansi_bytes("\u{2014}"), vec![0x97]);
        // unmappable characters are dropped, not replaced
        assert_eq!(to_winansi_bytes("a\u{4e2d}b"), vec![b'a', b'b']);
    }
}
