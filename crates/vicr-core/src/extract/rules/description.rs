//! Vehicle description line tokenization.
//!
//! The description line starts with a build/compliance date range and then
//! runs make, model, badges, body, engine, transmission and color together
//! with no separators beyond whitespace:
//!
//! ```text
//! 03/08 - 03/08 MAZDA MAZDA3 NEO SPORT BK MY08 4D SEDAN MULTI POINT F/INJ 2.0L 4CYL 5 SP MANUAL GREY
//! ```
//!
//! The make is the first token. The model is every following token up to the
//! first one that trips a stop rule. Body type, transmission and color are
//! found by scanning rather than by position, because OCR regularly drops or
//! merges tokens.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::patterns::{BODY_TYPE_TEMPLATES, DESCRIPTION_LINE, DOOR_COUNT, LETTER_DIGIT_BOUNDARY, WORD};
use super::vocabulary::Vocabulary;

/// Why model accumulation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Token is a badge/trim suffix.
    Badge,
    /// Token contains a body-type keyword.
    BodyKeyword,
    /// Token is a door count such as "4D".
    DoorCount,
    /// Token starts the engine description.
    EngineDescriptor,
}

/// Predicate deciding whether a token ends the model name.
pub type StopPredicate = fn(&Vocabulary, &str) -> bool;

/// Stop rules, evaluated in order for each token; the first hit wins.
pub const STOP_RULES: &[(StopReason, StopPredicate)] = &[
    (StopReason::Badge, is_badge),
    (StopReason::BodyKeyword, has_body_keyword),
    (StopReason::DoorCount, is_door_count),
    (StopReason::EngineDescriptor, is_engine_stop_word),
];

fn is_badge(vocab: &Vocabulary, token: &str) -> bool {
    vocab.is_badge(token)
}

fn has_body_keyword(vocab: &Vocabulary, token: &str) -> bool {
    vocab.has_body_keyword(token)
}

fn is_door_count(_: &Vocabulary, token: &str) -> bool {
    DOOR_COUNT.is_match(token)
}

fn is_engine_stop_word(vocab: &Vocabulary, token: &str) -> bool {
    vocab.is_engine_stop_word(token)
}

/// First stop rule the token satisfies, if any.
pub fn stop_reason(vocab: &Vocabulary, token: &str) -> Option<StopReason> {
    STOP_RULES
        .iter()
        .find(|(_, predicate)| predicate(vocab, token))
        .map(|(reason, _)| *reason)
}

/// The located description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLine<'a> {
    /// First date of the range ("03/08").
    pub year: &'a str,
    /// Everything after the date range, up to the end of the line.
    pub line: &'a str,
    /// Byte offset of the date range in the searched text.
    pub start: usize,
}

impl<'a> DescriptionLine<'a> {
    /// Find the first line carrying a `DD/MM - DD/MM` prefix.
    pub fn locate(text: &'a str) -> Option<Self> {
        let caps = DESCRIPTION_LINE.captures(text)?;
        let full_match = caps.get(0)?;

        Some(Self {
            year: caps.get(1)?.as_str(),
            line: caps.get(3)?.as_str(),
            start: full_match.start(),
        })
    }
}

/// Fields segmented from the description line. Empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionFields {
    pub year: String,
    pub make: String,
    pub model: String,
    pub body_type: String,
    pub transmission: String,
    pub color: String,
    /// Rule that ended the model name; `None` if the tokens ran out first.
    pub stop_reason: Option<StopReason>,
}

/// Splits the vehicle description line into its fields.
pub struct DescriptionTokenizer<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> DescriptionTokenizer<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Tokenize the description line found in `text`.
    pub fn tokenize(&self, text: &str) -> DescriptionFields {
        let Some(description) = DescriptionLine::locate(text) else {
            debug!("No vehicle description line found");
            return DescriptionFields::default();
        };

        debug!("Vehicle description line: {}", description.line);

        let mut tokens = description.line.split_whitespace();
        let make = tokens.next().unwrap_or_default().to_string();
        let (raw_model, stop_reason) = self.accumulate_model(tokens);

        debug!("Model {:?} ended by {:?}", raw_model, stop_reason);

        DescriptionFields {
            year: description.year.to_string(),
            make,
            model: format_model(&raw_model),
            body_type: classify_body_type(description.line).unwrap_or_default(),
            transmission: self
                .vocabulary
                .transmission_in(description.line)
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            color: self
                .find_color(&text[description.start..])
                .unwrap_or_default(),
            stop_reason,
        }
    }

    /// Collect model tokens until a stop rule fires.
    pub fn accumulate_model<'a>(
        &self,
        tokens: impl Iterator<Item = &'a str>,
    ) -> (String, Option<StopReason>) {
        let mut parts = Vec::new();

        for token in tokens {
            if let Some(reason) = stop_reason(self.vocabulary, token) {
                return (parts.join(" "), Some(reason));
            }
            parts.push(token);
        }

        (parts.join(" "), None)
    }

    /// First vocabulary color word in `text`, canonicalized.
    pub fn find_color(&self, text: &str) -> Option<String> {
        WORD.find_iter(text)
            .find_map(|word| self.vocabulary.canonical_color(word.as_str()))
    }
}

/// Separate a trailing model number from the name and title-case it
/// ("MAZDA3" becomes "Mazda 3").
pub fn format_model(raw: &str) -> String {
    title_case(&LETTER_DIGIT_BOUNDARY.replace_all(raw, "${1} ${2}"))
}

/// Match the description line against the body type templates.
pub fn classify_body_type(line: &str) -> Option<String> {
    BODY_TYPE_TEMPLATES
        .iter()
        .find_map(|template| template.find(line))
        .map(|m| title_case(m.as_str()))
}

/// Uppercase the first letter of every letter run, lowercase the rest.
///
/// A letter run starts after any non-letter, so "4D SEDAN" becomes
/// "4D Sedan" and "P/UP" becomes "P/Up".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAZDA: &str = "03/08 - 03/08 MAZDA MAZDA3 NEO SPORT BK MY08 4D SEDAN MULTI POINT F/INJ 2.0L 4CYL 5 SP MANUAL GREY";

    fn tokenize(text: &str) -> DescriptionFields {
        let vocab = Vocabulary::default();
        DescriptionTokenizer::new(&vocab).tokenize(text)
    }

    #[test]
    fn test_tokenize_mazda() {
        let fields = tokenize(MAZDA);

        assert_eq!(fields.year, "03/08");
        assert_eq!(fields.make, "MAZDA");
        assert_eq!(fields.model, "Mazda 3");
        assert_eq!(fields.body_type, "4D Sedan");
        assert_eq!(fields.transmission, "Manual");
        assert_eq!(fields.color, "Grey");
        assert_eq!(fields.stop_reason, Some(StopReason::Badge));
    }

    #[test]
    fn test_no_description_line() {
        let fields = tokenize("MTA 220902 Odometer 186,521");
        assert_eq!(fields, DescriptionFields::default());
    }

    #[test]
    fn test_locate_description_line() {
        let text = "MTA 1\n11/12 -11/12 TOYOTA HILUX SR5\nOdometer 5";
        let found = DescriptionLine::locate(text).unwrap();

        assert_eq!(found.year, "11/12");
        assert_eq!(found.line, "TOYOTA HILUX SR5");
        assert_eq!(found.start, 6);
    }

    #[test]
    fn test_stop_rule_precedence() {
        let vocab = Vocabulary::default();

        assert_eq!(stop_reason(&vocab, "NEO"), Some(StopReason::Badge));
        assert_eq!(stop_reason(&vocab, "x"), Some(StopReason::Badge));
        assert_eq!(stop_reason(&vocab, "WAGON"), Some(StopReason::BodyKeyword));
        assert_eq!(stop_reason(&vocab, "C/CHAS"), Some(StopReason::BodyKeyword));
        assert_eq!(stop_reason(&vocab, "4D"), Some(StopReason::DoorCount));
        assert_eq!(stop_reason(&vocab, "5DR"), Some(StopReason::DoorCount));
        assert_eq!(stop_reason(&vocab, "F/INJ"), Some(StopReason::EngineDescriptor));
        assert_eq!(stop_reason(&vocab, "MAZDA3"), None);
        assert_eq!(stop_reason(&vocab, "2.0L"), None);
    }

    #[test]
    fn test_badge_rule_wins_over_body_keyword() {
        let vocab = Vocabulary::default().with_badges(["CAB"]);
        assert_eq!(stop_reason(&vocab, "CAB"), Some(StopReason::Badge));
    }

    #[test]
    fn test_model_runs_to_end_without_stop() {
        let vocab = Vocabulary::default();
        let tokenizer = DescriptionTokenizer::new(&vocab);
        let (model, reason) = tokenizer.accumulate_model(["COROLLA", "ZRE182R"].into_iter());

        assert_eq!(model, "COROLLA ZRE182R");
        assert_eq!(reason, None);
    }

    #[test]
    fn test_empty_model_when_first_token_stops() {
        let fields = tokenize("01/15 - 01/15 HOLDEN 4D SEDAN AUTO WHITE");

        assert_eq!(fields.make, "HOLDEN");
        assert_eq!(fields.model, "");
        assert_eq!(fields.stop_reason, Some(StopReason::DoorCount));
        assert_eq!(fields.body_type, "4D Sedan");
        assert_eq!(fields.transmission, "Auto");
        assert_eq!(fields.color, "White");
    }

    #[test]
    fn test_multi_word_model() {
        let fields = tokenize("06/14 - 06/14 SUBARU FORESTER XT PREMIUM 4D WAGON AUTO SILVER");

        assert_eq!(fields.model, "Forester");
        assert_eq!(fields.body_type, "4D Wagon");
    }

    #[test]
    fn test_engine_stop_word_ends_model() {
        let fields = tokenize("02/10 - 02/10 FORD FALCON FG MULTI POINT F/INJ 4.0L");

        assert_eq!(fields.model, "Falcon Fg");
        assert_eq!(fields.stop_reason, Some(StopReason::EngineDescriptor));
        assert_eq!(fields.body_type, "");
        assert_eq!(fields.transmission, "");
    }

    #[test]
    fn test_body_type_templates() {
        assert_eq!(classify_body_type("COROLLA 5DR HATCH").as_deref(), Some("5Dr Hatch"));
        assert_eq!(classify_body_type("HILUX DUAL CAB P/UP").as_deref(), Some("Dual Cab P/Up"));
        assert_eq!(classify_body_type("HILUX SINGLE CAB").as_deref(), Some("Single Cab"));
        assert_eq!(classify_body_type("RANGER C/CHASSIS").as_deref(), Some("C/Chassis"));
        assert_eq!(classify_body_type("NAVARA C/CHAS").as_deref(), Some("C/Chas"));
        assert_eq!(classify_body_type("COMMODORE UTILITY").as_deref(), Some("Utility"));
        assert_eq!(classify_body_type("FALCON UTE").as_deref(), Some("Ute"));
        assert_eq!(classify_body_type("HOLDEN COMPUTER").as_deref(), None);
        assert_eq!(classify_body_type("CAMRY 4D"), None);
    }

    #[test]
    fn test_door_count_template_precedes_standalone_word() {
        assert_eq!(
            classify_body_type("WAGON 4D COUPE").as_deref(),
            Some("4D Coupe")
        );
    }

    #[test]
    fn test_color_scan_continues_past_line() {
        let vocab = Vocabulary::default();
        let tokenizer = DescriptionTokenizer::new(&vocab);

        assert_eq!(tokenizer.find_color("MANUAL Odometer 5 Colour MARINE").as_deref(), Some("Maroon"));
        assert_eq!(tokenizer.find_color("GRAN").as_deref(), Some("Grey"));
        assert_eq!(tokenizer.find_color("CREDIT GREYHOUND"), None);
    }

    #[test]
    fn test_color_scan_starts_at_description_line() {
        let fields = tokenize("RED STOCK 03/08 - 03/08 MAZDA MAZDA3 NEO 4D SEDAN BLUE");
        assert_eq!(fields.color, "Blue");
    }

    #[test]
    fn test_format_model() {
        assert_eq!(format_model("MAZDA3"), "Mazda 3");
        assert_eq!(format_model("CX9 GRAND"), "Cx 9 Grand");
        assert_eq!(format_model("4WD"), "4Wd");
        assert_eq!(format_model(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("4D SEDAN"), "4D Sedan");
        assert_eq!(title_case("DOUBLE CAB P/UP"), "Double Cab P/Up");
        assert_eq!(title_case("hilux"), "Hilux");
    }
}
