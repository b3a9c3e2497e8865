//! Document-wide OCR text normalization.
//!
//! Only glyph confusions that are wrong everywhere in the document belong
//! here. Letter O / digit 0 confusion is field specific (ODOMETER, SPORT and
//! NEO must keep their O) and is handled after extraction.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Single-character misreads replaced across the whole document.
pub const GLYPH_FIXES: &[(char, char)] = &[('|', 'I')];

/// Collapse whitespace runs to one space and fix document-wide misreads.
pub fn normalize(text: &str) -> String {
    let collapsed: Cow<'_, str> = WHITESPACE_RUN.replace_all(text, " ");

    collapsed
        .chars()
        .map(|c| {
            GLYPH_FIXES
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("MTA\t220902\n\n  Odometer"), "MTA 220902 Odometer");
    }

    #[test]
    fn test_vertical_bar_becomes_i() {
        assert_eq!(normalize("V|N JM0"), "VIN JM0");
    }

    #[test]
    fn test_keeps_letter_o() {
        assert_eq!(normalize("ODOMETER NEO SPORT"), "ODOMETER NEO SPORT");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "   ",
            "\n03/08 - 03/08  MAZDA |\r\nGREY  ",
            "Odometer 186,521\n\nEngine No LF1O525984",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }
}
