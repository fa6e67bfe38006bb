//! Fixed sheet geometry per content type.
//!
//! Physical sheets are A4 in millimetres. Wallpapers are a fixed 9:16 mobile
//! frame in logical pixels and carry no physical size.

use serde::{Deserialize, Serialize};

use super::ContentType;

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

pub const STICKER_COLUMNS: usize = 2;
pub const STICKER_ROWS: usize = 8;
pub const STICKER_PAGE_MARGIN_MM: f64 = 10.0;
pub const STICKER_GAP_MM: f64 = 4.0;
pub const STICKER_PADDING_MM: f64 = 2.0;

pub const CARD_COLUMNS: usize = 2;
pub const CARD_ROWS: usize = 2;
pub const CARD_BLEED_MM: f64 = 3.0;
pub const REGISTRATION_MARK_MM: f64 = 5.0;

pub const WALLPAPER_WIDTH_PX: f64 = 360.0;
pub const WALLPAPER_HEIGHT_PX: f64 = 640.0;
pub const WALLPAPER_SAFE_INSET_PX: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Millimeters,
    Pixels,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn inset(&self, by: f64) -> Self {
        Self {
            x: self.x + by,
            y: self.y + by,
            width: (self.width - 2.0 * by).max(0.0),
            height: (self.height - 2.0 * by).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Printer guides drawn over a sheet, in sheet units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Guide {
    DashedLine { x1: f64, y1: f64, x2: f64, y2: f64 },
    DashedRect { rect: Rect },
    RegistrationMark { x: f64, y: f64, size: f64 },
}

/// One slot: its outer cell and the inner box where content belongs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotGeometry {
    pub index: usize,
    pub cell: Rect,
    pub content: Rect,
}

/// Page frame plus every slot and guide for a content type.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGeometry {
    pub width: f64,
    pub height: f64,
    pub unit: Unit,
    pub bleed_mm: f64,
    pub slots: Vec<SlotGeometry>,
    pub guides: Vec<Guide>,
}

pub fn geometry_for(content_type: ContentType, cut_guides: bool) -> SheetGeometry {
    match content_type {
        ContentType::Stickers => sticker_geometry(cut_guides),
        ContentType::Cards => card_geometry(),
        ContentType::Wallpapers => wallpaper_geometry(),
    }
}

/// 2×8 grid with a page margin and a fixed gap between cells. Optional cut
/// guides outline every other cell in a checkerboard.
fn sticker_geometry(cut_guides: bool) -> SheetGeometry {
    let usable_w = A4_WIDTH_MM - 2.0 * STICKER_PAGE_MARGIN_MM;
    let usable_h = A4_HEIGHT_MM - 2.0 * STICKER_PAGE_MARGIN_MM;
    let cell_w = (usable_w - STICKER_GAP_MM * (STICKER_COLUMNS - 1) as f64) / STICKER_COLUMNS as f64;
    let cell_h = (usable_h - STICKER_GAP_MM * (STICKER_ROWS - 1) as f64) / STICKER_ROWS as f64;

    let mut slots = Vec::with_capacity(STICKER_COLUMNS * STICKER_ROWS);
    let mut guides = Vec::new();
    for row in 0..STICKER_ROWS {
        for col in 0..STICKER_COLUMNS {
            let cell = Rect::new(
                STICKER_PAGE_MARGIN_MM + col as f64 * (cell_w + STICKER_GAP_MM),
                STICKER_PAGE_MARGIN_MM + row as f64 * (cell_h + STICKER_GAP_MM),
                cell_w,
                cell_h,
            );
            if cut_guides && (row + col) % 2 == 0 {
                guides.push(Guide::DashedRect { rect: cell });
            }
            slots.push(SlotGeometry {
                index: slots.len(),
                cell,
                content: cell.inset(STICKER_PADDING_MM),
            });
        }
    }

    SheetGeometry {
        width: A4_WIDTH_MM,
        height: A4_HEIGHT_MM,
        unit: Unit::Millimeters,
        bleed_mm: 0.0,
        slots,
        guides,
    }
}

/// 2×2 quadrants with bleed, centre cut lines and corner registration marks.
fn card_geometry() -> SheetGeometry {
    let cell_w = A4_WIDTH_MM / CARD_COLUMNS as f64;
    let cell_h = A4_HEIGHT_MM / CARD_ROWS as f64;

    let mut slots = Vec::with_capacity(CARD_COLUMNS * CARD_ROWS);
    for row in 0..CARD_ROWS {
        for col in 0..CARD_COLUMNS {
            let cell = Rect::new(col as f64 * cell_w, row as f64 * cell_h, cell_w, cell_h);
            slots.push(SlotGeometry {
                index: slots.len(),
                cell,
                content: cell.inset(CARD_BLEED_MM),
            });
        }
    }

    let b = CARD_BLEED_MM;
    let mut guides = vec![
        Guide::DashedLine {
            x1: cell_w,
            y1: 0.0,
            x2: cell_w,
            y2: A4_HEIGHT_MM,
        },
        Guide::DashedLine {
            x1: 0.0,
            y1: cell_h,
            x2: A4_WIDTH_MM,
            y2: cell_h,
        },
    ];
    for (x, y) in [
        (b, b),
        (A4_WIDTH_MM - b, b),
        (b, A4_HEIGHT_MM - b),
        (A4_WIDTH_MM - b, A4_HEIGHT_MM - b),
    ] {
        guides.push(Guide::RegistrationMark {
            x,
            y,
            size: REGISTRATION_MARK_MM,
        });
    }

    SheetGeometry {
        width: A4_WIDTH_MM,
        height: A4_HEIGHT_MM,
        unit: Unit::Millimeters,
        bleed_mm: CARD_BLEED_MM,
        slots,
        guides,
    }
}

fn wallpaper_geometry() -> SheetGeometry {
    let cell = Rect::new(0.0, 0.0, WALLPAPER_WIDTH_PX, WALLPAPER_HEIGHT_PX);
    SheetGeometry {
        width: WALLPAPER_WIDTH_PX,
        height: WALLPAPER_HEIGHT_PX,
        unit: Unit::Pixels,
        bleed_mm: 0.0,
        slots: vec![SlotGeometry {
            index: 0,
            cell,
            content: cell.inset(WALLPAPER_SAFE_INSET_PX),
        }],
        guides: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(inner: &Rect, w: f64, h: f64) -> bool {
        inner.x >= 0.0 && inner.y >= 0.0 && inner.right() <= w + 1e-9 && inner.bottom() <= h + 1e-9
    }

    #[test]
    fn test_sticker_grid_fits_a4() {
        let g = geometry_for(ContentType::Stickers, true);
        assert_eq!(g.slots.len(), 16);
        assert!(g.slots.iter().all(|s| inside(&s.cell, g.width, g.height)));
        let last = g.slots.last().unwrap();
        assert!((last.cell.bottom() - (A4_HEIGHT_MM - STICKER_PAGE_MARGIN_MM)).abs() < 1e-9);
        assert!((last.cell.right() - (A4_WIDTH_MM - STICKER_PAGE_MARGIN_MM)).abs() < 1e-9);
    }

    #[test]
    fn test_sticker_cells_do_not_overlap() {
        let g = geometry_for(ContentType::Stickers, false);
        let first = g.slots[0].cell;
        let below = g.slots[STICKER_COLUMNS].cell;
        assert!((below.y - first.bottom() - STICKER_GAP_MM).abs() < 1e-9);
    }

    #[test]
    fn test_sticker_cut_guides_alternate() {
        assert_eq!(geometry_for(ContentType::Stickers, true).guides.len(), 8);
        assert!(geometry_for(ContentType::Stickers, false).guides.is_empty());
    }

    #[test]
    fn test_cards_have_centre_cuts_and_four_marks() {
        let g = geometry_for(ContentType::Cards, true);
        assert_eq!(g.slots.len(), 4);
        assert_eq!(g.bleed_mm, CARD_BLEED_MM);
        let lines = g
            .guides
            .iter()
            .filter(|x| matches!(x, Guide::DashedLine { .. }))
            .count();
        let marks = g
            .guides
            .iter()
            .filter(|x| matches!(x, Guide::RegistrationMark { .. }))
            .count();
        assert_eq!((lines, marks), (2, 4));
        assert!(g.guides.contains(&Guide::DashedLine {
            x1: 105.0,
            y1: 0.0,
            x2: 105.0,
            y2: 297.0
        }));
    }

    #[test]
    fn test_wallpaper_is_single_pixel_slot_without_guides() {
        let g = geometry_for(ContentType::Wallpapers, true);
        assert_eq!(g.unit, Unit::Pixels);
        assert_eq!(g.slots.len(), 1);
        assert!(g.guides.is_empty());
        assert!((g.height / g.width - 16.0 / 9.0).abs() < 1e-9);
    }
}
