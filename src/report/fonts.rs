//! Advance widths for the base-14 Helvetica faces.
//!
//! Values are the Adobe AFM widths in 1/1000 em for the printable ASCII range
//! (0x20..=0x7E) plus the common WinAnsi punctuation. Accented Latin-1 letters
//! are measured as their base letter; anything else gets the average width.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

const FALLBACK_WIDTH: u16 = 556;

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

impl Font {
    fn table(self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        }
    }

    fn glyph_width(self, c: char) -> u16 {
        let bold = self == Font::HelveticaBold;
        match c {
            ' '..='~' => self.table()[c as usize - 0x20],
            '\u{00A0}' => 278,
            '\u{2018}' | '\u{2019}' | '\u{201A}' => if bold { 278 } else { 222 },
            '\u{201C}' | '\u{201D}' | '\u{201E}' => if bold { 500 } else { 333 },
            '\u{2013}' | '\u{20AC}' => 556,
            '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
            '\u{2022}' => 350,
            '\u{00B0}' => 400,
            '\u{00B5}' => if bold { 611 } else { 556 },
            '\u{00D7}' => 584,
            '\u{00BD}' | '\u{00BC}' | '\u{00BE}' => 834,
            'ì'..='ï' => 278,
            _ => match fold_accent(c) {
                Some(base) => self.table()[base as usize - 0x20],
                None => FALLBACK_WIDTH,
            },
        }
    }
}

fn fold_accent(c: char) -> Option<char> {
    Some(match c {
        'à'..='å' => 'a',
        'À'..='Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è'..='ë' => 'e',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò'..='ö' => 'o',
        'Ò'..='Ö' => 'O',
        'ù'..='ü' => 'u',
        'Ù'..='Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => return None,
    })
}

/// Replaces bullet glyphs that the builtin-font encoder cannot express with `-`.
pub fn encodable(text: &str) -> Cow<'_, str> {
    const BULLETS: [char; 4] = ['\u{2022}', '\u{25CF}', '\u{25E6}', '\u{25AA}'];
    if text.contains(BULLETS) {
        Cow::Owned(text.replace(BULLETS, "-"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Rendered width of `text` in points at `size`.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(font.glyph_width(c))).sum();
    units as f32 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_width() {
        assert_eq!(text_width("", Font::Helvetica, 12.0), 0.0);
    }

    #[test]
    fn test_known_glyph_widths() {
        // 'H' is 722 units in both faces, 'i' is 222 regular and 278 bold.
        assert!((text_width("H", Font::Helvetica, 10.0) - 7.22).abs() < 1e-4);
        assert!((text_width("i", Font::Helvetica, 10.0) - 2.22).abs() < 1e-4);
        assert!((text_width("i", Font::HelveticaBold, 10.0) - 2.78).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_not_narrower() {
        let text = "Medicine Recommendation: Paracetamol 500mg";
        assert!(
            text_width(text, Font::HelveticaBold, 12.0) >= text_width(text, Font::Helvetica, 12.0)
        );
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width("Hydrate", Font::Helvetica, 12.0);
        let large = text_width("Hydrate", Font::Helvetica, 24.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_unknown_glyph_uses_fallback_width() {
        let w = text_width("世", Font::Helvetica, 1000.0);
        assert_eq!(w, f32::from(FALLBACK_WIDTH));
    }

    #[test]
    fn test_winansi_punctuation_widths() {
        assert_eq!(text_width("\u{2014}", Font::Helvetica, 1000.0), 1000.0);
        assert_eq!(text_width("\u{2026}", Font::HelveticaBold, 1000.0), 1000.0);
        assert_eq!(text_width("\u{2019}", Font::Helvetica, 1000.0), 222.0);
        assert_eq!(text_width("\u{2019}", Font::HelveticaBold, 1000.0), 278.0);
        assert_eq!(text_width("\u{2013}", Font::Helvetica, 1000.0), 556.0);
    }

    #[test]
    fn test_accented_letters_measure_as_base_letter() {
        assert_eq!(
            text_width("Café", Font::Helvetica, 12.0),
            text_width("Cafe", Font::Helvetica, 12.0)
        );
        assert_eq!(
            text_width("Ñ", Font::HelveticaBold, 12.0),
            text_width("N", Font::HelveticaBold, 12.0)
        );
        assert_eq!(text_width("í", Font::Helvetica, 1000.0), 278.0);
    }

    #[test]
    fn test_em_dash_is_full_em() {
        let with_dashes = text_width("rest \u{2014} fluids \u{2014} sleep", Font::Helvetica, 12.0);
        let with_hyphens = text_width("rest - fluids - sleep", Font::Helvetica, 12.0);
        // two glyphs, 1000 vs 333 units each
        assert!((with_dashes - with_hyphens - 2.0 * 667.0 * 12.0 / 1000.0).abs() < 1e-3);
    }

    #[test]
    fn test_encodable_replaces_bullets_only() {
        assert_eq!(encodable("\u{2022} Café rest\u{2019}s"), "- Café rest\u{2019}s");
        assert!(matches!(encodable("1. Rest"), Cow::Borrowed("1. Rest")));
    }
}
