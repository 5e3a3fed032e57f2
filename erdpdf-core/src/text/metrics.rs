use crate::text::Font;

/// Advance widths for printable ASCII (0x20..=0x7E), in 1/1000 em.
type WidthTable = [u16; 95];

const HELVETICA: WidthTable = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD: WidthTable = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN: WidthTable = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

/// Width of one character in 1/1000 em. Characters outside printable ASCII
/// use the face's average width.
fn char_units(ch: char, font: Font) -> u16 {
    let (table, fallback) = match font {
        Font::Helvetica => (&HELVETICA, 556),
        Font::HelveticaBold => (&HELVETICA_BOLD, 611),
        Font::TimesRoman => (&TIMES_ROMAN, 500),
        Font::Courier | Font::CourierBold => return 600,
    };
    match ch as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        _ => fallback,
    }
}

/// Measure the width of a text string in a given font and size
pub fn measure_text(text: &str, font: Font, font_size: f64) -> f64 {
    let units: u32 = text.chars().map(|ch| char_units(ch, font) as u32).sum();
    units as f64 / 1000.0 * font_size
}

/// Measure the width of a single character
pub fn measure_char(ch: char, font: Font, font_size: f64) -> f64 {
    char_units(ch, font) as f64 / 1000.0 * font_size
}

/// Breaks `text` into lines no wider than `max_width`, splitting at
/// whitespace. A single word wider than the limit stays on its own line.
pub fn wrap_text(text: &str, font: Font, font_size: f64, max_width: f64) -> Vec<String> {
    let space = measure_char(' ', font, font_size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = measure_text(word, font, font_size);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::mm_to_pt;

    #[test]
    fn test_measure_helvetica() {
        // 'A' = 667 units
        assert!((measure_text("A", Font::Helvetica, 10.0) - 6.67).abs() < 1e-9);
        assert!((measure_text("", Font::Helvetica, 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let narrow = measure_text("iiii", Font::Courier, 12.0);
        let wide = measure_text("WWWW", Font::Courier, 12.0);
        assert_eq!(narrow, wide);
        assert!((narrow - 4.0 * 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = measure_text("Database Platform", Font::Helvetica, 11.0);
        let bold = measure_text("Database Platform", Font::HelveticaBold, 11.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_non_ascii_uses_average_width() {
        assert_eq!(measure_char('é', Font::Helvetica, 1000.0), 556.0);
        assert_eq!(measure_char('→', Font::TimesRoman, 1000.0), 500.0);
    }

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("User-saved favorite products", Font::Helvetica, 10.0, 500.0);
        assert_eq!(lines, vec!["User-saved favorite products".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Stores customer and admin account information with authentication \
                    details, skin profile for AI recommendations.";
        let max = mm_to_pt(60.0);
        let lines = wrap_text(text, Font::Helvetica, 10.0, max);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure_text(line, Font::Helvetica, 10.0) <= max, "{line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_overlong_word_kept_whole() {
        let lines = wrap_text("a Supercalifragilistic b", Font::Courier, 10.0, 30.0);
        assert_eq!(lines, vec!["a", "Supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap_text("   ", Font::Helvetica, 10.0, 100.0).is_empty());
    }
}
