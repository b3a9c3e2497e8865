//! Keyword vocabularies used to segment the vehicle description line.
//!
//! The tables are plain data: callers can extend them (from configuration or
//! in tests) without touching the tokenizer's control flow. All entries are
//! stored uppercase and matched case-insensitively.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Badge/trim suffixes that end the model name.
pub const BADGES: &[&str] = &[
    "NEO", "SPORT", "BK", "MY", "GL", "GX", "SP", "LIMITED", "MAXX", "VTI", "SX", "VX", "LS",
    "LT", "LTZ", "RS", "SV", "ST", "TI", "ACTIVE", "X", "S", "SE", "XE", "XT", "XR", "XLS", "SR",
    "SL", "DX", "EX", "ASCENT", "CONQUEST", "CLASSIC", "ELEGANCE", "LUXURY", "PREMIUM",
];

/// Body-type keywords; any token containing one ends the model name.
pub const BODY_KEYWORDS: &[&str] = &[
    "SEDAN", "HATCH", "HATCHBACK", "WAGON", "UTE", "UTILITY", "SUV", "COUPE", "VAN",
    "CONVERTIBLE", "CABRIOLET", "CAB", "CHASSIS", "CHAS",
];

/// Engine description words (multi-point injection) that end the model name.
pub const ENGINE_STOP_WORDS: &[&str] = &["MULTI", "POINT", "F/INJ"];

/// Recognised color names, including known OCR misreads.
pub const COLORS: &[&str] = &[
    "GREY", "GRAY", "BLACK", "WHITE", "BLUE", "RED", "SILVER", "GOLD", "BRONZE", "BEIGE", "TAN",
    "CREAM", "CHAMPAGNE", "GREEN", "YELLOW", "ORANGE", "BROWN", "PURPLE", "MAROON", "BURGUNDY",
    "PINK", "MARINE", "GRAN",
];

/// OCR misreads of color names and the color they stand for.
pub const COLOR_ALIASES: &[(&str, &str)] = &[("MARINE", "Maroon"), ("GRAN", "Grey")];

/// Canonical transmission classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Auto,
}

impl Transmission {
    pub fn as_str(self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Auto => "Auto",
        }
    }
}

/// Transmission keywords, checked in order.
pub const TRANSMISSION_KEYWORDS: &[(&str, Transmission)] = &[
    ("MANUAL", Transmission::Manual),
    ("AUTO", Transmission::Auto),
];

/// Keyword tables consulted by the description tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    badges: BTreeSet<String>,
    body_keywords: Vec<String>,
    engine_stop_words: BTreeSet<String>,
    colors: BTreeSet<String>,
    color_aliases: BTreeMap<String, String>,
    transmissions: Vec<(String, Transmission)>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::empty()
            .with_badges(BADGES.iter().copied())
            .with_body_keywords(BODY_KEYWORDS.iter().copied())
            .with_engine_stop_words(ENGINE_STOP_WORDS.iter().copied())
            .with_colors(COLORS.iter().copied())
            .with_color_aliases(COLOR_ALIASES.iter().copied())
            .with_transmissions(TRANSMISSION_KEYWORDS.iter().copied())
    }
}

impl Vocabulary {
    /// A vocabulary with no entries at all.
    pub fn empty() -> Self {
        Self {
            badges: BTreeSet::new(),
            body_keywords: Vec::new(),
            engine_stop_words: BTreeSet::new(),
            colors: BTreeSet::new(),
            color_aliases: BTreeMap::new(),
            transmissions: Vec::new(),
        }
    }

    /// Add badge/trim tokens.
    pub fn with_badges<'a>(mut self, badges: impl IntoIterator<Item = &'a str>) -> Self {
        self.badges.extend(badges.into_iter().map(str::to_uppercase));
        self
    }

    /// Add body-type keywords.
    pub fn with_body_keywords<'a>(mut self, keywords: impl IntoIterator<Item = &'a str>) -> Self {
        for keyword in keywords {
            let keyword = keyword.to_uppercase();
            if !keyword.is_empty() && !self.body_keywords.contains(&keyword) {
                self.body_keywords.push(keyword);
            }
        }
        self
    }

    /// Add engine description stop-words.
    pub fn with_engine_stop_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.engine_stop_words
            .extend(words.into_iter().map(str::to_uppercase));
        self
    }

    /// Add color names. Colors are single words.
    pub fn with_colors<'a>(mut self, colors: impl IntoIterator<Item = &'a str>) -> Self {
        self.colors.extend(colors.into_iter().map(str::to_uppercase));
        self
    }

    /// Map an OCR misread to the color it stands for. The misread is also
    /// registered as a color so it can be found in text.
    pub fn with_color_alias(mut self, misread: &str, color: &str) -> Self {
        let misread = misread.to_uppercase();
        self.colors.insert(misread.clone());
        self.color_aliases.insert(misread, color.to_string());
        self
    }

    fn with_color_aliases<'a>(self, aliases: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        aliases
            .into_iter()
            .fold(self, |vocab, (misread, color)| vocab.with_color_alias(misread, color))
    }

    fn with_transmissions<'a>(
        mut self,
        keywords: impl IntoIterator<Item = (&'a str, Transmission)>,
    ) -> Self {
        self.transmissions.extend(
            keywords
                .into_iter()
                .map(|(keyword, class)| (keyword.to_uppercase(), class)),
        );
        self
    }

    /// Exact badge match.
    pub fn is_badge(&self, token: &str) -> bool {
        self.badges.contains(&token.to_uppercase())
    }

    /// Token contains a body-type keyword anywhere.
    pub fn has_body_keyword(&self, token: &str) -> bool {
        let token = token.to_uppercase();
        self.body_keywords.iter().any(|keyword| token.contains(keyword.as_str()))
    }

    pub fn is_engine_stop_word(&self, token: &str) -> bool {
        self.engine_stop_words.contains(&token.to_uppercase())
    }

    pub fn is_color(&self, word: &str) -> bool {
        self.colors.contains(&word.to_uppercase())
    }

    /// Canonical spelling of a color word: the alias target for known
    /// misreads, otherwise the word capitalized.
    pub fn canonical_color(&self, word: &str) -> Option<String> {
        let upper = word.to_uppercase();
        if !self.colors.contains(&upper) {
            return None;
        }
        Some(
            self.color_aliases
                .get(&upper)
                .cloned()
                .unwrap_or_else(|| capitalize(&upper)),
        )
    }

    /// Classify the transmission mentioned anywhere in `line`.
    pub fn transmission_in(&self, line: &str) -> Option<Transmission> {
        let line = line.to_uppercase();
        self.transmissions
            .iter()
            .find(|(keyword, _)| line.contains(keyword.as_str()))
            .map(|(_, class)| *class)
    }
}

/// First character uppercase, the rest lowercase.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
