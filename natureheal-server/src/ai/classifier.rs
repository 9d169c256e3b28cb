//! Keyword-based topic tagging for chat messages.

use crate::entities::Category;

/// Ordered rules; the first rule with any matching keyword wins.
const RULES: &[(&[&str], Category)] = &[
    (&["yoga", "asana"], Category::Yoga),
    (&["meditation", "mindfulness"], Category::Meditation),
    (&["remedy", "treatment"], Category::Remedies),
    (&["nutrition", "diet", "food"], Category::Nutrition),
    (&["stress", "relax"], Category::Lifestyle),
];

/// Map a free-text message to a [`Category`] by case-insensitive substring match.
pub fn classify(message: &str) -> Category {
    let lowered = message.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or_default()
}

/// An explicit caller-supplied category always beats classification.
pub fn resolve(explicit: Option<Category>, message: &str) -> Category {
    explicit.unwrap_or_else(|| classify(message))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_rule_maps_to_its_category() {
        assert_eq!(classify("Which yoga pose helps?"), Category::Yoga);
        assert_eq!(classify("best ASANA for back"), Category::Yoga);
        assert_eq!(classify("Mindfulness tips"), Category::Meditation);
        assert_eq!(classify("home remedy for cough"), Category::Remedies);
        assert_eq!(classify("natural treatment options"), Category::Remedies);
        assert_eq!(classify("what food is good for skin"), Category::Nutrition);
        assert_eq!(classify("I can't relax at night"), Category::Lifestyle);
        assert_eq!(classify("hello there"), Category::General);
        assert_eq!(classify(""), Category::General);
    }

    #[test]
    fn earlier_rules_win() {
        assert_eq!(classify("yoga or a remedy?"), Category::Yoga);
        assert_eq!(classify("meditation diet plan"), Category::Meditation);
        assert_eq!(classify("stress treatment"), Category::Remedies);
    }

    #[test]
    fn substring_match_inside_words() {
        assert_eq!(classify("dietary advice"), Category::Nutrition);
        assert_eq!(classify("STRESSED out"), Category::Lifestyle);
    }

    #[test]
    fn explicit_category_skips_classification() {
        assert_eq!(
            resolve(Some(Category::Symptoms), "yoga for stress"),
            Category::Symptoms
        );
        assert_eq!(resolve(None, "yoga for stress"), Category::Yoga);
    }
}
