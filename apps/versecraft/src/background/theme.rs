//! Theme inference: maps a verse to a visual mood for background lookup.
//!
//! The magical-theme boosts are tuning constants, not derived values. Keep
//! them named so they can be adjusted without hunting through the logic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::BackgroundStyle;
use crate::corpus::{Topic, Verse};

/// Chance that a verse with heaven/glory/wonder imagery is given the magical theme.
pub const MAGICAL_KEYWORD_PROBABILITY: f64 = 0.7;
/// Chance that a verse with no keyword match is lifted from nature to magical.
pub const MAGICAL_AMBIENT_PROBABILITY: f64 = 0.3;

const MAGICAL_KEYWORDS: &[&str] = &["heaven", "glory", "wonder", "firmament", "stars", "eternal"];
const PEACEFUL_KEYWORDS: &[&str] = &["peace", "rest", "calm", "still"];
const WARM_KEYWORDS: &[&str] = &["love", "warm", "kind", "compassion"];
const SERENE_KEYWORDS: &[&str] = &["quiet", "gentle", "meek", "humble"];

const NATIVITY_KEYWORDS: &[&str] = &[
    "is born", "manger", "bethlehem", "nativity", "emmanuel", "immanuel", "wise men",
];
const RESURRECTION_KEYWORDS: &[&str] = &[
    "risen", "resurrection", "rose again", "empty tomb", "raised from the dead",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Peaceful,
    Warm,
    Serene,
    Magical,
    Nature,
    Christmas,
    Easter,
}

impl Theme {
    /// Comma-separated search terms for the stock-photo bucket.
    pub fn stock_keywords(&self) -> &'static str {
        match self {
            Theme::Peaceful => "calm,lake,sunrise",
            Theme::Warm => "golden,sunset,warm-light",
            Theme::Serene => "mist,meadow,soft",
            Theme::Magical => "starry-sky,aurora,galaxy",
            Theme::Nature => "nature,forest,landscape",
            Theme::Christmas => "christmas,snow,candlelight",
            Theme::Easter => "spring,flowers,dawn",
        }
    }

    /// Scene description used in image-generation prompts.
    pub fn scene(&self) -> &'static str {
        match self {
            Theme::Peaceful => "a tranquil lake at sunrise with soft pastel reflections",
            Theme::Warm => "a field bathed in golden hour light with warm amber tones",
            Theme::Serene => "a quiet misty meadow with gentle morning fog",
            Theme::Magical => "a luminous starry sky with a soft aurora and glowing clouds",
            Theme::Nature => "a lush green landscape with rolling hills and scattered wildflowers",
            Theme::Christmas => "a snowy night with warm candlelight and a distant star",
            Theme::Easter => "a spring dawn over a garden full of white lilies",
        }
    }

    /// Base RGB colour used when no image can be painted.
    pub fn base_color(&self) -> [u8; 3] {
        match self {
            Theme::Peaceful => [170, 200, 220],
            Theme::Warm => [236, 190, 140],
            Theme::Serene => [200, 214, 204],
            Theme::Magical => [60, 52, 110],
            Theme::Nature => [120, 160, 110],
            Theme::Christmas => [150, 40, 45],
            Theme::Easter => [236, 226, 170],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Season for a 1-based calendar month (northern hemisphere).
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

/// Theme plus an optional seasonal modifier (wallpapers only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSelection {
    pub theme: Theme,
    pub season: Option<Season>,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Generic theme from the verse's text and topics.
pub fn generic_theme<R: Rng + ?Sized>(verse: &Verse, rng: &mut R) -> Theme {
    let text = verse.english().to_lowercase();

    if contains_any(&text, MAGICAL_KEYWORDS) && rng.gen_bool(MAGICAL_KEYWORD_PROBABILITY) {
        return Theme::Magical;
    }
    if contains_any(&text, PEACEFUL_KEYWORDS) || verse.has_topic(Topic::Peace) {
        return Theme::Peaceful;
    }
    if contains_any(&text, WARM_KEYWORDS) || verse.has_topic(Topic::Love) {
        return Theme::Warm;
    }
    if contains_any(&text, SERENE_KEYWORDS) {
        return Theme::Serene;
    }
    if rng.gen_bool(MAGICAL_AMBIENT_PROBABILITY) {
        return Theme::Magical;
    }
    Theme::Nature
}

/// Infers the full theme selection for a verse rendered with `style`.
///
/// Wallpapers get a seasonal modifier from `month`; nativity and resurrection
/// motifs replace the generic theme with christmas or easter.
pub fn infer_theme<R: Rng + ?Sized>(
    verse: &Verse,
    style: BackgroundStyle,
    month: u32,
    rng: &mut R,
) -> ThemeSelection {
    let generic = generic_theme(verse, rng);
    if style != BackgroundStyle::Wallpaper {
        return ThemeSelection {
            theme: generic,
            season: None,
        };
    }

    let text = verse.english().to_lowercase();
    let season = Season::from_month(month);
    let theme = if contains_any(&text, NATIVITY_KEYWORDS) {
        Theme::Christmas
    } else if contains_any(&text, RESURRECTION_KEYWORDS) {
        Theme::Easter
    } else {
        generic
    };

    ThemeSelection {
        theme,
        season: Some(season),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use rand::rngs::mock::StepRng;

    // gen_bool is always true for a zero stream and always false for u64::MAX.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn verse(reference: &str) -> Verse {
        Corpus::builtin().unwrap().find(reference).unwrap().clone()
    }

    #[test]
    fn test_glory_verse_goes_magical_when_boost_fires() {
        let v = verse("Psalm 19:1");
        assert_eq!(generic_theme(&v, &mut always()), Theme::Magical);
    }

    #[test]
    fn test_glory_verse_falls_through_when_boost_misses() {
        let v = verse("Psalm 19:1");
        assert_ne!(generic_theme(&v, &mut never()), Theme::Magical);
    }

    #[test]
    fn test_peace_keywords_map_to_peaceful() {
        let v = verse("John 14:27");
        assert_eq!(generic_theme(&v, &mut never()), Theme::Peaceful);
    }

    #[test]
    fn test_love_maps_to_warm() {
        let v = verse("1 John 4:19");
        assert_eq!(generic_theme(&v, &mut never()), Theme::Warm);
    }

    #[test]
    fn test_default_is_nature_without_ambient_boost() {
        let v = verse("Proverbs 9:10");
        assert_eq!(generic_theme(&v, &mut never()), Theme::Nature);
        assert_eq!(generic_theme(&v, &mut always()), Theme::Magical);
    }

    #[test]
    fn test_cards_carry_no_season() {
        let v = verse("Proverbs 9:10");
        let sel = infer_theme(&v, BackgroundStyle::Card, 12, &mut never());
        assert_eq!(sel.season, None);
    }

    #[test]
    fn test_wallpaper_gets_season_from_month() {
        let v = verse("Proverbs 9:10");
        let sel = infer_theme(&v, BackgroundStyle::Wallpaper, 7, &mut never());
        assert_eq!(sel.season, Some(Season::Summer));
        assert_eq!(sel.theme, Theme::Nature);
    }

    #[test]
    fn test_nativity_overrides_generic_theme_on_wallpapers() {
        let v = verse("Luke 2:11");
        let sel = infer_theme(&v, BackgroundStyle::Wallpaper, 7, &mut never());
        assert_eq!(sel.theme, Theme::Christmas);
        let card = infer_theme(&v, BackgroundStyle::Card, 7, &mut never());
        assert_ne!(card.theme, Theme::Christmas);
    }

    #[test]
    fn test_resurrection_overrides_to_easter() {
        let v = verse("Matthew 28:6");
        let sel = infer_theme(&v, BackgroundStyle::Wallpaper, 11, &mut never());
        assert_eq!(sel.theme, Theme::Easter);
    }

    #[test]
    fn test_month_to_season_boundaries() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(9), Season::Autumn);
    }
}
