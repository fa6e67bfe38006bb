//! Off-screen sheet rasterization.

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use thiserror::Error;
use tracing::warn;

use super::text::{TextEngine, TextStyle};
use crate::layout::{ComposedSheet, Guide, Rect, SheetItem, Unit};

/// CSS reference resolution used to turn millimetres into base pixels.
pub const BASE_DPI: f64 = 96.0;
pub const MM_PER_INCH: f64 = 25.4;

/// Largest canvas edge the renderer will allocate.
pub const MAX_CANVAS_EDGE: u32 = 12_000;

const GUIDE_COLOR: Rgb<u8> = Rgb([128, 128, 128]);
const PLATE_COLOR: [u8; 3] = [255, 255, 255];
const CAPTION_PLATE_ALPHA: f32 = 0.72;
const TITLE_PLATE_ALPHA: f32 = 0.85;
const INK_COLOR: [u8; 3] = [33, 37, 41];
const REFERENCE_COLOR: [u8; 3] = [90, 96, 104];

/// Background bytes keyed by `source_uri`. Missing entries are painted as the
/// theme's base colour.
pub type BackgroundImages = HashMap<String, Bytes>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Sheet has a zero-sized page ({width}x{height})")]
    EmptyPage { width: f64, height: f64 },

    #[error("Canvas {width}x{height} exceeds the canvas edge limit")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("Rasterization failed: {0}")]
    Failed(String),
}

/// Paints a composed sheet. Implementations run on a blocking thread.
pub trait SheetRenderer: Send + Sync {
    fn render(
        &self,
        sheet: &ComposedSheet,
        backgrounds: &BackgroundImages,
        scale: u32,
    ) -> Result<RgbImage, RenderError>;
}

/// Page size in base pixels, before supersampling.
pub fn base_pixel_size(sheet: &ComposedSheet) -> (u32, u32) {
    let to_px = |v: f64| match sheet.unit {
        Unit::Millimeters => (v * BASE_DPI / MM_PER_INCH).round() as u32,
        Unit::Pixels => v.round() as u32,
    };
    (to_px(sheet.page_width), to_px(sheet.page_height))
}

/// Canvas size for `scale`× supersampling.
pub fn canvas_size(sheet: &ComposedSheet, scale: u32) -> (u32, u32) {
    let (w, h) = base_pixel_size(sheet);
    (w * scale, h * scale)
}

/// Sheet units → canvas pixels, with independent axes so page edges land
/// exactly on the canvas edges.
struct Mapper {
    fx: f64,
    fy: f64,
    width: u32,
    height: u32,
}

impl Mapper {
    fn new(sheet: &ComposedSheet, width: u32, height: u32) -> Self {
        Self {
            fx: width as f64 / sheet.page_width,
            fy: height as f64 / sheet.page_height,
            width,
            height,
        }
    }

    fn point(&self, x: f64, y: f64) -> (i64, i64) {
        ((x * self.fx).round() as i64, (y * self.fy).round() as i64)
    }

    /// Clamped pixel rect as `(x, y, w, h)`.
    fn rect(&self, r: &Rect) -> (u32, u32, u32, u32) {
        let clamp_x = |v: f64| (v * self.fx).round().clamp(0.0, self.width as f64) as u32;
        let clamp_y = |v: f64| (v * self.fy).round().clamp(0.0, self.height as f64) as u32;
        let (x0, y0) = (clamp_x(r.x), clamp_y(r.y));
        let (x1, y1) = (clamp_x(r.right()), clamp_y(r.bottom()));
        (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

/// Bundled renderer: cover-fit backgrounds, translucent caption and title
/// plates carrying the typeset text, dashed cut guides and registration marks.
#[derive(Debug, Default)]
pub struct RasterRenderer {
    text: Mutex<TextEngine>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetRenderer for RasterRenderer {
    fn render(
        &self,
        sheet: &ComposedSheet,
        backgrounds: &BackgroundImages,
        scale: u32,
    ) -> Result<RgbImage, RenderError> {
        if sheet.page_width <= 0.0 || sheet.page_height <= 0.0 {
            return Err(RenderError::EmptyPage {
                width: sheet.page_width,
                height: sheet.page_height,
            });
        }
        let (width, height) = canvas_size(sheet, scale.max(1));
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyPage {
                width: sheet.page_width,
                height: sheet.page_height,
            });
        }
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(RenderError::CanvasTooLarge { width, height });
        }

        let mut text = self
            .text
            .lock()
            .map_err(|_| RenderError::Failed("text engine lock poisoned".to_string()))?;
        let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let map = Mapper::new(sheet, width, height);

        for item in &sheet.items {
            let (x, y, w, h) = map.rect(&item.slot.cell);
            if w == 0 || h == 0 {
                continue;
            }
            paint_background(
                &mut canvas,
                backgrounds.get(&item.background.source_uri),
                item.background.theme.base_color(),
                (x, y, w, h),
            );

            let (cx, cy, cw, ch) = map.rect(&item.slot.content);
            let plate_h = ch * 2 / 5;
            let plate = (cx, cy + ch - plate_h, cw, plate_h);
            blend_rect(&mut canvas, plate, PLATE_COLOR, CAPTION_PLATE_ALPHA);
            draw_caption(&mut text, &mut canvas, plate, item);

            if let Some(title) = &item.title {
                let title_plate = (cx, cy, cw, ch / 7);
                blend_rect(&mut canvas, title_plate, PLATE_COLOR, TITLE_PLATE_ALPHA);
                let inner = inset(title_plate, title_plate.3 / 8);
                let style = TextStyle {
                    size: inner.3 as f32 * 0.7,
                    bold: true,
                    color: INK_COLOR,
                };
                text.draw(&mut canvas, inner, title, style);
            }
        }

        let stroke = scale.max(1) as i64;
        for guide in &sheet.guides {
            draw_guide(&mut canvas, &map, guide, stroke);
        }
        Ok(canvas)
    }
}

/// Stacks the phrase, the verse text and its reference inside the plate.
fn draw_caption(
    text: &mut TextEngine,
    canvas: &mut RgbImage,
    plate: (u32, u32, u32, u32),
    item: &SheetItem,
) {
    let (x, y, w, h) = inset(plate, plate.2.min(plate.3) / 12);
    if w == 0 || h == 0 {
        return;
    }
    let phrase_h = h * 3 / 10;
    let reference_h = h * 3 / 20;
    let verse_h = h - phrase_h - reference_h;
    let base = w as f32 / 16.0;

    text.draw(
        canvas,
        (x, y, w, phrase_h),
        &item.phrase.text,
        TextStyle {
            size: base,
            bold: true,
            color: INK_COLOR,
        },
    );
    text.draw(
        canvas,
        (x, y + phrase_h, w, verse_h),
        &item.text,
        TextStyle {
            size: base * 0.7,
            bold: false,
            color: INK_COLOR,
        },
    );
    text.draw(
        canvas,
        (x, y + phrase_h + verse_h, w, reference_h),
        &item.verse.reference,
        TextStyle {
            size: base * 0.6,
            bold: true,
            color: REFERENCE_COLOR,
        },
    );
}

fn inset((x, y, w, h): (u32, u32, u32, u32), by: u32) -> (u32, u32, u32, u32) {
    let by = by.min(w / 2).min(h / 2);
    (x + by, y + by, w - 2 * by, h - 2 * by)
}

fn paint_background(
    canvas: &mut RgbImage,
    bytes: Option<&Bytes>,
    fallback: [u8; 3],
    (x, y, w, h): (u32, u32, u32, u32),
) {
    let decoded = bytes.and_then(|b| match image::load_from_memory(b) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!("Undecodable background, painting theme colour: {e}");
            None
        }
    });
    match decoded {
        Some(img) => {
            let tile = img.resize_to_fill(w, h, FilterType::Triangle).to_rgb8();
            imageops::overlay(canvas, &tile, x as i64, y as i64);
        }
        None => fill_rect(canvas, (x, y, w, h), Rgb(fallback)),
    }
}

fn fill_rect(canvas: &mut RgbImage, (x, y, w, h): (u32, u32, u32, u32), color: Rgb<u8>) {
    let x_end = (x + w).min(canvas.width());
    let y_end = (y + h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn blend_rect(canvas: &mut RgbImage, (x, y, w, h): (u32, u32, u32, u32), color: [u8; 3], alpha: f32) {
    let x_end = (x + w).min(canvas.width());
    let y_end = (y + h).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            let p = canvas.get_pixel_mut(px, py);
            for c in 0..3 {
                p[c] = (p[c] as f32 * (1.0 - alpha) + color[c] as f32 * alpha).round() as u8;
            }
        }
    }
}

fn plot(canvas: &mut RgbImage, x: i64, y: i64, stroke: i64, color: Rgb<u8>) {
    let half = stroke / 2;
    for dy in 0..stroke {
        for dx in 0..stroke {
            let (px, py) = (x - half + dx, y - half + dy);
            if px >= 0 && py >= 0 && (px as u32) < canvas.width() && (py as u32) < canvas.height() {
                canvas.put_pixel(px as u32, py as u32, color);
            }
        }
    }
}

/// Samples the segment one pixel at a time; `dash` of `None` draws solid.
fn draw_segment(
    canvas: &mut RgbImage,
    (x1, y1): (i64, i64),
    (x2, y2): (i64, i64),
    stroke: i64,
    dash: Option<(i64, i64)>,
) {
    let steps = (x2 - x1).abs().max((y2 - y1).abs());
    for t in 0..=steps {
        if let Some((on, off)) = dash {
            if t % (on + off) >= on {
                continue;
            }
        }
        let (x, y) = if steps == 0 {
            (x1, y1)
        } else {
            (x1 + (x2 - x1) * t / steps, y1 + (y2 - y1) * t / steps)
        };
        plot(canvas, x, y, stroke, GUIDE_COLOR);
    }
}

fn draw_guide(canvas: &mut RgbImage, map: &Mapper, guide: &Guide, stroke: i64) {
    let dash = Some((6 * stroke, 4 * stroke));
    match *guide {
        Guide::DashedLine { x1, y1, x2, y2 } => {
            draw_segment(canvas, map.point(x1, y1), map.point(x2, y2), stroke, dash);
        }
        Guide::DashedRect { rect } => {
            let tl = map.point(rect.x, rect.y);
            let tr = map.point(rect.right(), rect.y);
            let br = map.point(rect.right(), rect.bottom());
            let bl = map.point(rect.x, rect.bottom());
            for (a, b) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
                draw_segment(canvas, a, b, stroke, dash);
            }
        }
        Guide::RegistrationMark { x, y, size } => {
            let half = size / 2.0;
            draw_segment(canvas, map.point(x - half, y), map.point(x + half, y), stroke, None);
            draw_segment(canvas, map.point(x, y - half), map.point(x, y + half), stroke, None);
            let (cx, cy) = map.point(x, y);
            let radius = (size / 4.0 * map.fx).round();
            for step in 0..72 {
                let angle = step as f64 * std::f64::consts::TAU / 72.0;
                let px = cx + (radius * angle.cos()).round() as i64;
                let py = cy + (radius * angle.sin()).round() as i64;
                plot(canvas, px, py, stroke, GUIDE_COLOR);
            }
        }
    }
}
