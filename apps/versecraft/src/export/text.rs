//! Caption and title typesetting via `cosmic-text`, with the bundled DejaVu
//! Sans faces so output does not depend on host fonts.

use std::fmt;

use cosmic_text::{
    fontdb, Align, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight,
    Wrap,
};
use image::RgbImage;

const FAMILY: &str = "DejaVu Sans";
static REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Smallest size a block shrinks to before it is clipped instead.
pub const MIN_FONT_PX: f32 = 6.0;
const LINE_SPACING: f32 = 1.25;
const SHRINK_STEP: f32 = 0.85;

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: [u8; 3],
}

/// Font database plus glyph cache. Shaping needs `&mut`, so renderers keep
/// one behind a lock.
pub struct TextEngine {
    fonts: FontSystem,
    swash: SwashCache,
}

impl fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEngine").finish_non_exhaustive()
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_font_data(REGULAR.to_vec());
        db.load_font_data(BOLD.to_vec());
        Self {
            fonts: FontSystem::new_with_locale_and_db("en-US".to_string(), db),
            swash: SwashCache::new(),
        }
    }

    /// Word-wraps `text` centred inside `area` (`x, y, w, h` in canvas
    /// pixels), shrinking the font until the block fits. Ink outside `area`
    /// is clipped.
    pub fn draw(
        &mut self,
        canvas: &mut RgbImage,
        (x, y, w, h): (u32, u32, u32, u32),
        text: &str,
        style: TextStyle,
    ) {
        if w == 0 || h == 0 || text.trim().is_empty() {
            return;
        }

        let mut size = style.size.max(MIN_FONT_PX);
        let (buffer, block_height) = loop {
            let buffer = self.layout(text, size, w as f32, style.bold);
            let block_height = buffer.layout_runs().count() as f32 * size * LINE_SPACING;
            if block_height <= h as f32 || size <= MIN_FONT_PX {
                break (buffer, block_height);
            }
            size = (size * SHRINK_STEP).max(MIN_FONT_PX);
        };

        let left = x as i64;
        let top = y as i64 + ((h as f32 - block_height).max(0.0) / 2.0) as i64;
        let x_end = (x + w).min(canvas.width()) as i64;
        let y_end = (y + h).min(canvas.height()) as i64;
        let [r, g, b] = style.color;

        buffer.draw(
            &mut self.fonts,
            &mut self.swash,
            Color::rgb(r, g, b),
            |gx, gy, gw, gh, color| {
                let alpha = color.a() as f32 / 255.0;
                if alpha <= 0.0 {
                    return;
                }
                let ink = [color.r(), color.g(), color.b()];
                for dy in 0..gh as i64 {
                    for dx in 0..gw as i64 {
                        let px = left + gx as i64 + dx;
                        let py = top + gy as i64 + dy;
                        if px < x as i64 || py < y as i64 || px >= x_end || py >= y_end {
                            continue;
                        }
                        let p = canvas.get_pixel_mut(px as u32, py as u32);
                        for c in 0..3 {
                            p[c] = (p[c] as f32 * (1.0 - alpha) + ink[c] as f32 * alpha).round()
                                as u8;
                        }
                    }
                }
            },
        );
    }

    fn layout(&mut self, text: &str, size: f32, width: f32, bold: bool) -> Buffer {
        let mut buffer = Buffer::new(&mut self.fonts, Metrics::new(size, size * LINE_SPACING));
        buffer.set_size(&mut self.fonts, Some(width), None);
        buffer.set_wrap(&mut self.fonts, Wrap::WordOrGlyph);
        let weight = if bold { Weight::BOLD } else { Weight::NORMAL };
        buffer.set_text(
            &mut self.fonts,
            text,
            Attrs::new().family(Family::Name(FAMILY)).weight(weight),
            Shaping::Advanced,
        );
        for line in buffer.lines.iter_mut() {
            line.set_align(Some(Align::Center));
        }
        buffer.shape_until_scroll(&mut self.fonts, false);
        buffer
    }
}
