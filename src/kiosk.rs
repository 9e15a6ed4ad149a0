// THEORY:
// The `kiosk` module is the seam between the detection engine and the
// greeting application built around it. When a wave fires, the application
// wants to classify the visitor, pick an avatar, and speak a greeting; none
// of that is pixel work, so it lives behind small traits here instead of
// inside the pipeline. Every classifier in this module fails soft: when a
// model is unavailable or unsure, the visitor gets the default label and the
// kiosk greets them anyway. A missing model must never turn into a silent
// kiosk.

use crate::core_modules::frame::Frame;

/// Garment predictions at or below this confidence are ignored.
const MIN_GARMENT_CONFIDENCE: f32 = 0.05;

const SUIT_KEYWORDS: [&str; 10] = [
    "suit",
    "groom",
    "tuxedo",
    "bow_tie",
    "tie",
    "windsor_tie",
    "trench_coat",
    "academic_gown",
    "mortarboard",
    "blazer",
];

const TRADITIONAL_KEYWORDS: [&str; 12] = [
    "gown",
    "kimono",
    "sari",
    "saree",
    "stole",
    "poncho",
    "cloak",
    "vestment",
    "pajama",
    "sarong",
    "velvet",
    "wool",
];

/// The presented-gender label used to pick an avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderLabel {
    #[default]
    Male,
    Female,
}

impl GenderLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderLabel::Male => "male",
            GenderLabel::Female => "female",
        }
    }

    /// Maps a face-analysis model's dominant-gender label. Only "Woman" maps
    /// to `Female`; anything else, including junk, falls back to the default.
    pub fn from_model_label(label: &str) -> Self {
        if label == "Woman" {
            GenderLabel::Female
        } else {
            GenderLabel::Male
        }
    }
}

/// The attire bucket used to pick an avatar outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttireCategory {
    Suit,
    Traditional,
    #[default]
    Shirt,
}

impl AttireCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttireCategory::Suit => "suit",
            AttireCategory::Traditional => "traditional",
            AttireCategory::Shirt => "shirt",
        }
    }

    /// Buckets garment-classifier output by keyword. Predictions are scanned
    /// in the order given; the first confident label that names a suit or a
    /// traditional garment decides, with suit keywords checked first within
    /// each label. No confident match means the everyday default.
    pub fn from_predictions<'a, I>(predictions: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        for (label, confidence) in predictions {
            if confidence <= MIN_GARMENT_CONFIDENCE {
                continue;
            }
            let label = label.to_ascii_lowercase();
            if SUIT_KEYWORDS.iter().any(|keyword| label.contains(keyword)) {
                return AttireCategory::Suit;
            }
            if TRADITIONAL_KEYWORDS.iter().any(|keyword| label.contains(keyword)) {
                return AttireCategory::Traditional;
            }
        }
        AttireCategory::Shirt
    }
}

/// Classifies the visitor in the frame that triggered the wave.
pub trait VisitorClassifier {
    fn classify_gender(&self, frame: &Frame) -> GenderLabel;
    fn classify_attire(&self, frame: &Frame, gender: GenderLabel) -> AttireCategory;
}

/// The classifier of last resort: returns the default labels for everyone.
/// Used whenever a real model backend is not wired up.
pub struct FallbackClassifier;

impl VisitorClassifier for FallbackClassifier {
    fn classify_gender(&self, _frame: &Frame) -> GenderLabel {
        GenderLabel::default()
    }

    fn classify_attire(&self, _frame: &Frame, _gender: GenderLabel) -> AttireCategory {
        AttireCategory::default()
    }
}

/// The avatar filename for a classified visitor, e.g. "female_suit.png".
pub fn avatar_asset_name(gender: GenderLabel, attire: AttireCategory) -> String {
    format!("{}_{}.png", gender.as_str(), attire.as_str())
}

/// Supplies the greeting spoken or shown when a wave fires.
pub trait GreetingSource {
    fn next_greeting(&mut self) -> String;
}

/// A greeting source that always says the same thing.
pub struct StaticGreeting {
    message: String,
}

impl StaticGreeting {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for StaticGreeting {
    fn default() -> Self {
        Self::new("Welcome")
    }
}

impl GreetingSource for StaticGreeting {
    fn next_greeting(&mut self) -> String {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        assert_eq!(GenderLabel::default(), GenderLabel::Male);
        assert_eq!(AttireCategory::default(), AttireCategory::Shirt);
    }

    #[test]
    fn test_model_label_mapping() {
        assert_eq!(GenderLabel::from_model_label("Woman"), GenderLabel::Female);
        assert_eq!(GenderLabel::from_model_label("Man"), GenderLabel::Male);
        assert_eq!(GenderLabel::from_model_label(""), GenderLabel::Male);
    }

    #[test]
    fn test_attire_keyword_buckets() {
        assert_eq!(
            AttireCategory::from_predictions([("tuxedo", 0.8)]),
            AttireCategory::Suit
        );
        assert_eq!(
            AttireCategory::from_predictions([("kimono", 0.8)]),
            AttireCategory::Traditional
        );
        assert_eq!(
            AttireCategory::from_predictions([("jersey", 0.8)]),
            AttireCategory::Shirt
        );
        // Model labels keep their original casing.
        assert_eq!(
            AttireCategory::from_predictions([("Windsor_tie", 0.3)]),
            AttireCategory::Suit
        );
        // "academic_gown" names a gown but belongs to the suit bucket.
        assert_eq!(
            AttireCategory::from_predictions([("academic_gown", 0.5)]),
            AttireCategory::Suit
        );
    }

    #[test]
    fn test_low_confidence_ignored() {
        assert_eq!(
            AttireCategory::from_predictions([("suit", 0.04)]),
            AttireCategory::Shirt
        );
        assert_eq!(
            AttireCategory::from_predictions([("suit", 0.05)]),
            AttireCategory::Shirt,
            "the confidence gate is strict"
        );
    }

    #[test]
    fn test_first_confident_match_wins() {
        let predictions = [("kimono", 0.5), ("suit", 0.9)];
        assert_eq!(
            AttireCategory::from_predictions(predictions),
            AttireCategory::Traditional
        );
    }

    #[test]
    fn test_avatar_asset_name() {
        assert_eq!(
            avatar_asset_name(GenderLabel::Male, AttireCategory::Shirt),
            "male_shirt.png"
        );
        assert_eq!(
            avatar_asset_name(GenderLabel::Female, AttireCategory::Suit),
            "female_suit.png"
        );
    }

    #[test]
    fn test_static_greeting_default() {
        let mut greeting = StaticGreeting::default();
        assert_eq!(greeting.next_greeting(), "Welcome");
        let mut custom = StaticGreeting::new("Hello there");
        assert_eq!(custom.next_greeting(), "Hello there");
    }

    #[test]
    fn test_fallback_classifier_defaults() {
        let classifier = FallbackClassifier;
        let frame = Frame::new(vec![0; 3], 1, 1);
        assert_eq!(classifier.classify_gender(&frame), GenderLabel::Male);
        assert_eq!(
            classifier.classify_attire(&frame, GenderLabel::Male),
            AttireCategory::Shirt
        );
    }
}
