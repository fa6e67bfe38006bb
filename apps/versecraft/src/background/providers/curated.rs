//! Curated fallback: a fixed set of bundled images. Terminal step of the
//! chain; it cannot fail.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Bundled backgrounds. An `ASSETS_DIR` file of the same name overrides the
/// embedded copy at render time.
pub const CURATED_BACKGROUNDS: &[&str] = &[
    "asset://curated/morning-meadow.png",
    "asset://curated/still-lake.png",
    "asset://curated/golden-field.png",
    "asset://curated/misty-forest.png",
    "asset://curated/starry-night.png",
    "asset://curated/mountain-dawn.png",
    "asset://curated/olive-grove.png",
    "asset://curated/quiet-shore.png",
];

static EMBEDDED: &[(&str, &[u8])] = &[
    ("curated/morning-meadow.png", include_bytes!("../../../assets/curated/morning-meadow.png")),
    ("curated/still-lake.png", include_bytes!("../../../assets/curated/still-lake.png")),
    ("curated/golden-field.png", include_bytes!("../../../assets/curated/golden-field.png")),
    ("curated/misty-forest.png", include_bytes!("../../../assets/curated/misty-forest.png")),
    ("curated/starry-night.png", include_bytes!("../../../assets/curated/starry-night.png")),
    ("curated/mountain-dawn.png", include_bytes!("../../../assets/curated/mountain-dawn.png")),
    ("curated/olive-grove.png", include_bytes!("../../../assets/curated/olive-grove.png")),
    ("curated/quiet-shore.png", include_bytes!("../../../assets/curated/quiet-shore.png")),
];

/// Embedded bytes for an `asset://` path such as `curated/still-lake.png`.
pub fn embedded(path: &str) -> Option<&'static [u8]> {
    EMBEDDED.iter().find(|(p, _)| *p == path).map(|(_, bytes)| *bytes)
}

/// Round-robin over [`CURATED_BACKGROUNDS`].
#[derive(Debug, Default)]
pub struct CuratedFallback {
    next: AtomicUsize,
}

impl CuratedFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(&self) -> &'static str {
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        CURATED_BACKGROUNDS[i % CURATED_BACKGROUNDS.len()]
    }

    #[cfg(test)]
    pub fn contains(uri: &str) -> bool {
        CURATED_BACKGROUNDS.contains(&uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin_wraps() {
        let curated = CuratedFallback::new();
        let picks: Vec<_> = (0..CURATED_BACKGROUNDS.len() + 1).map(|_| curated.pick()).collect();
        assert_eq!(picks[0], CURATED_BACKGROUNDS[0]);
        assert_eq!(picks[1], CURATED_BACKGROUNDS[1]);
        assert_eq!(picks[CURATED_BACKGROUNDS.len()], CURATED_BACKGROUNDS[0]);
    }

    #[test]
    fn test_every_curated_background_is_embedded_and_decodes() {
        for uri in CURATED_BACKGROUNDS {
            let path = uri.strip_prefix("asset://").unwrap();
            let bytes = embedded(path).unwrap_or_else(|| panic!("{uri} not embedded"));
            let img = image::load_from_memory(bytes).unwrap();
            assert!(img.height() > img.width(), "{uri} should be portrait");
        }
        assert!(embedded("curated/missing.png").is_none());
    }
}
