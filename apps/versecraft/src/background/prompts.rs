//! Image-generation prompts derived from a verse and its theme.

use super::theme::ThemeSelection;
use super::BackgroundStyle;
use crate::corpus::Verse;

/// Appended to every prompt. Backgrounds sit behind overlaid text, so the
/// image itself must carry no lettering or focal figures.
pub const PROMPT_CONSTRAINTS: &str =
    "no text, no letters, no watermark, no people, soft focus, gentle contrast, high quality";

/// Verse imagery that translates well into a background scene.
/// First match wins; ordered from most to least specific.
const VERSE_IMAGERY: &[(&str, &str)] = &[
    ("valley", "a misty valley between mountains"),
    ("eagle", "an eagle soaring above mountain peaks"),
    ("lamp", "a glowing lantern along a winding path"),
    ("heavens", "an open sky full of stars"),
    ("morning", "first light breaking over the horizon"),
    ("still", "still water reflecting the sky"),
    ("rest", "a quiet resting place under old trees"),
    ("path", "a sunlit path through a forest"),
    ("shield", "rugged cliffs standing against the sea"),
    ("harvest", "golden wheat fields ready for harvest"),
    ("light", "rays of light through parting clouds"),
    ("world", "a wide view of the earth at dawn"),
];

fn imagery_for(verse: &Verse) -> Option<&'static str> {
    let text = verse.english().to_lowercase();
    VERSE_IMAGERY
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, scene)| *scene)
}

fn framing(style: BackgroundStyle) -> &'static str {
    match style {
        BackgroundStyle::Sticker => "a small square illustration with a simple composition",
        BackgroundStyle::Card => "a printable greeting card background with open space in the centre",
        BackgroundStyle::Wallpaper => "a vertical phone wallpaper with open space in the middle third",
    }
}

/// Builds the natural-language prompt sent to image-generation providers.
pub fn build_image_prompt(verse: &Verse, theme: &ThemeSelection, style: BackgroundStyle) -> String {
    let mut prompt = format!("{}, {}", framing(style), theme.theme.scene());
    if let Some(imagery) = imagery_for(verse) {
        prompt.push_str(", featuring ");
        prompt.push_str(imagery);
    }
    if let Some(season) = theme.season {
        prompt.push_str(", in a ");
        prompt.push_str(season.keyword());
        prompt.push_str(" setting");
    }
    prompt.push_str(". ");
    prompt.push_str(PROMPT_CONSTRAINTS);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::theme::{Season, Theme};
    use crate::corpus::Corpus;

    #[test]
    fn test_prompt_includes_verse_imagery_and_season() {
        let corpus = Corpus::builtin().unwrap();
        let verse = corpus.find("Psalm 23:4").unwrap();
        let theme = ThemeSelection {
            theme: Theme::Serene,
            season: Some(Season::Autumn),
        };
        let prompt = build_image_prompt(verse, &theme, BackgroundStyle::Wallpaper);
        assert!(prompt.contains("misty valley"));
        assert!(prompt.contains("autumn setting"));
        assert!(prompt.contains("phone wallpaper"));
        assert!(prompt.ends_with(PROMPT_CONSTRAINTS));
    }

    #[test]
    fn test_prompt_never_quotes_the_verse() {
        let corpus = Corpus::builtin().unwrap();
        let verse = corpus.find("John 3:16").unwrap();
        let theme = ThemeSelection {
            theme: Theme::Warm,
            season: None,
        };
        let prompt = build_image_prompt(verse, &theme, BackgroundStyle::Card);
        assert!(!prompt.contains(verse.english()));
        assert!(!prompt.contains("setting"));
    }
}
