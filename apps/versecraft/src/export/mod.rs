//! Exporter: rasterizes composed sheets into PNG files or one PDF.
//!
//! Sheets are rendered strictly one after another on a blocking thread.
//! Background bytes for a sheet are fetched first; a background that cannot
//! be loaded is painted in its theme colour. Any rasterization or encoding
//! failure aborts the whole export call.

pub mod assets;
pub mod pdf;
pub mod raster;
pub mod text;

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::MAX_SHEETS_PER_REQUEST;
use crate::layout::{ComposedSheet, ContentType, LayoutError};

pub use assets::AssetLoader;
pub use raster::{BackgroundImages, RasterRenderer, RenderError, SheetRenderer};

/// Supersampling factor for PNG output.
pub const PNG_SCALE: u32 = 3;
/// Rasterization factor for PDF pages.
pub const PDF_SCALE: u32 = 2;
const JPEG_QUALITY: u8 = 92;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// One downloadable file.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub filename: String,
    pub bytes: Bytes,
}

impl ExportArtifact {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    NoSheets,

    #[error("At most {max} sheets per export")]
    TooManySheets { max: usize },

    #[error("Sheets must share one content type")]
    MixedContentTypes,

    #[error("Invalid sheet {index}: {source}")]
    InvalidSheet {
        index: usize,
        #[source]
        source: LayoutError,
    },

    #[error("Rendering sheet {index} failed: {source}")]
    Render {
        index: usize,
        #[source]
        source: RenderError,
    },

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Render task aborted: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn png_filename(content_type: ContentType, sheet_number: usize) -> String {
    format!("faith-{}-sheet-{sheet_number}.png", content_type.name())
}

pub fn pdf_filename(content_type: ContentType) -> String {
    format!("faith-{}.pdf", content_type.name())
}

pub struct Exporter {
    renderer: Arc<dyn SheetRenderer>,
    assets: AssetLoader,
}

impl Exporter {
    pub fn new(renderer: Arc<dyn SheetRenderer>, assets: AssetLoader) -> Self {
        Self { renderer, assets }
    }

    /// Renders `sheets` into PNG files (one per sheet) or a single PDF.
    pub async fn export(
        &self,
        sheets: &[ComposedSheet],
        format: ExportFormat,
    ) -> Result<Vec<ExportArtifact>, ExportError> {
        let content_type = sheets.first().ok_or(ExportError::NoSheets)?.content_type;
        if sheets.len() > MAX_SHEETS_PER_REQUEST {
            return Err(ExportError::TooManySheets {
                max: MAX_SHEETS_PER_REQUEST,
            });
        }
        if sheets.iter().any(|s| s.content_type != content_type) {
            return Err(ExportError::MixedContentTypes);
        }
        for (index, sheet) in sheets.iter().enumerate() {
            sheet
                .validate()
                .map_err(|source| ExportError::InvalidSheet { index, source })?;
        }
        // Slot and guide geometry is rebuilt rather than taken from the client.
        let sheets: Vec<ComposedSheet> = sheets
            .iter()
            .map(ComposedSheet::with_canonical_geometry)
            .collect();

        let scale = match format {
            ExportFormat::Png => PNG_SCALE,
            ExportFormat::Pdf => PDF_SCALE,
        };

        let mut artifacts = Vec::new();
        let mut pdf_pages = Vec::new();
        for (index, sheet) in sheets.iter().enumerate() {
            let image = self.rasterize(index, sheet, scale).await?;
            match format {
                ExportFormat::Png => {
                    let bytes = tokio::task::spawn_blocking(move || encode_png(&image)).await??;
                    artifacts.push(ExportArtifact {
                        format,
                        filename: png_filename(content_type, index + 1),
                        bytes: Bytes::from(bytes),
                    });
                }
                ExportFormat::Pdf => {
                    let (pixel_width, pixel_height) = image.dimensions();
                    let jpeg = tokio::task::spawn_blocking(move || encode_jpeg(&image)).await??;
                    let (width_pt, height_pt) = page_size_pt(sheet, pixel_width, pixel_height);
                    pdf_pages.push(pdf::PdfPage {
                        jpeg,
                        pixel_width,
                        pixel_height,
                        width_pt,
                        height_pt,
                    });
                }
            }
        }

        if format == ExportFormat::Pdf {
            let bytes = tokio::task::spawn_blocking(move || pdf::build_document(pdf_pages)).await??;
            artifacts.push(ExportArtifact {
                format,
                filename: pdf_filename(content_type),
                bytes: Bytes::from(bytes),
            });
        }

        info!(
            "Exported {} {} sheet(s) as {:?} ({} file(s))",
            sheets.len(),
            content_type.name(),
            format,
            artifacts.len()
        );
        Ok(artifacts)
    }

    async fn rasterize(
        &self,
        index: usize,
        sheet: &ComposedSheet,
        scale: u32,
    ) -> Result<RgbImage, ExportError> {
        let backgrounds = self.load_backgrounds(sheet).await;
        let renderer = Arc::clone(&self.renderer);
        let sheet = sheet.clone();
        tokio::task::spawn_blocking(move || renderer.render(&sheet, &backgrounds, scale))
            .await?
            .map_err(|source| ExportError::Render { index, source })
    }

    async fn load_backgrounds(&self, sheet: &ComposedSheet) -> BackgroundImages {
        let uris: HashSet<&str> = sheet
            .items
            .iter()
            .map(|i| i.background.source_uri.as_str())
            .collect();
        let loads = uris.into_iter().map(|uri| async move {
            match self.assets.load(uri).await {
                Ok(bytes) => Some((uri.to_string(), bytes)),
                Err(e) => {
                    warn!("Background {uri} unavailable, painting theme colour: {e}");
                    None
                }
            }
        });
        futures::future::join_all(loads)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Physical page size in points. Pixel sheets map one logical pixel to 1/96in.
fn page_size_pt(sheet: &ComposedSheet, pixel_width: u32, pixel_height: u32) -> (f32, f32) {
    match sheet.physical_size_mm() {
        Some((w, h)) => (pdf::mm_to_pt(w), pdf::mm_to_pt(h)),
        None => {
            let px_to_pt = 72.0 / raster::BASE_DPI / PDF_SCALE as f64;
            (
                (pixel_width as f64 * px_to_pt) as f32,
                (pixel_height as f64 * px_to_pt) as f32,
            )
        }
    }
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    image.write_with_encoder(PngEncoder::new(Cursor::new(&mut out)))?;
    Ok(out)
}

fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let mut out = Vec::new();
    image.write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::corpus::Topic;
    use crate::background::ResolverContext;
    use crate::layout::tests::sample_sheet;
    use crate::layout::Unit;
    use reqwest::Client;

    /// Renderer that always fails, for the fatal-path tests.
    struct BrokenRenderer;

    impl SheetRenderer for BrokenRenderer {
        fn render(
            &self,
            _sheet: &ComposedSheet,
            _backgrounds: &BackgroundImages,
            _scale: u32,
        ) -> Result<RgbImage, RenderError> {
            Err(RenderError::Failed("out of memory".to_string()))
        }
    }

    pub(crate) fn assets(context: Arc<ResolverContext>) -> AssetLoader {
        AssetLoader::new(Client::new(), None, context)
    }

    pub(crate) fn exporter() -> Exporter {
        Exporter::new(
            Arc::new(RasterRenderer::new()),
            assets(Arc::new(ResolverContext::default())),
        )
    }

    #[test]
    fn test_filenames() {
        assert_eq!(png_filename(ContentType::Stickers, 1), "faith-stickers-sheet-1.png");
        assert_eq!(pdf_filename(ContentType::Cards), "faith-cards.pdf");
    }

    #[tokio::test]
    async fn test_png_export_one_file_per_sheet() {
        let sheets = vec![
            sample_sheet(ContentType::Cards, &[Topic::Love]),
            sample_sheet(ContentType::Cards, &[Topic::Hope]),
        ];
        let artifacts = exporter().export(&sheets, ExportFormat::Png).await.unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["faith-cards-sheet-1.png", "faith-cards-sheet-2.png"]);

        let decoded = image::load_from_memory(&artifacts[0].bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2382, 3369));
        assert_eq!(artifacts[0].mime(), "image/png");
    }

    #[tokio::test]
    async fn test_pdf_export_single_document_with_a_page_per_sheet() {
        let sheets = vec![
            sample_sheet(ContentType::Cards, &[]),
            sample_sheet(ContentType::Cards, &[]),
            sample_sheet(ContentType::Cards, &[]),
        ];
        let artifacts = exporter().export(&sheets, ExportFormat::Pdf).await.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, "faith-cards.pdf");

        let doc = lopdf::Document::load_mem(&artifacts[0].bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_wallpaper_pdf_page_is_logical_size() {
        let sheet = sample_sheet(ContentType::Wallpapers, &[]);
        let (w, h) = page_size_pt(&sheet, 720, 1280);
        assert_eq!((w, h), (270.0, 480.0));
    }

    #[tokio::test]
    async fn test_render_failure_is_fatal() {
        let exporter = Exporter::new(
            Arc::new(BrokenRenderer),
            assets(Arc::new(ResolverContext::default())),
        );
        let sheets = vec![sample_sheet(ContentType::Stickers, &[])];
        let err = exporter.export(&sheets, ExportFormat::Png).await.unwrap_err();
        assert!(matches!(err, ExportError::Render { index: 0, .. }));
    }

    #[tokio::test]
    async fn test_empty_export_rejected() {
        let err = exporter().export(&[], ExportFormat::Pdf).await.unwrap_err();
        assert!(matches!(err, ExportError::NoSheets));
    }

    #[tokio::test]
    async fn test_mixed_content_types_rejected() {
        let sheets = vec![
            sample_sheet(ContentType::Cards, &[]),
            sample_sheet(ContentType::Wallpapers, &[]),
        ];
        let err = exporter().export(&sheets, ExportFormat::Png).await.unwrap_err();
        assert!(matches!(err, ExportError::MixedContentTypes));
    }

    #[tokio::test]
    async fn test_partial_sheet_rejected_before_rendering() {
        let mut sheet = sample_sheet(ContentType::Cards, &[]);
        sheet.items.pop();
        let err = exporter().export(&[sheet], ExportFormat::Png).await.unwrap_err();
        assert!(matches!(err, ExportError::InvalidSheet { index: 0, .. }));
    }

    #[tokio::test]
    async fn test_export_sheet_count_is_capped() {
        let sheets = vec![sample_sheet(ContentType::Wallpapers, &[]); MAX_SHEETS_PER_REQUEST + 1];
        let err = exporter().export(&sheets, ExportFormat::Png).await.unwrap_err();
        assert!(matches!(err, ExportError::TooManySheets { max: MAX_SHEETS_PER_REQUEST }));
    }

    #[tokio::test]
    async fn test_oversized_client_page_rejected_before_rendering() {
        let mut sheet = sample_sheet(ContentType::Wallpapers, &[]);
        sheet.page_width = 4000.0;
        sheet.page_height = 4000.0;
        sheet.unit = Unit::Pixels;
        let err = exporter().export(&[sheet], ExportFormat::Png).await.unwrap_err();
        assert!(matches!(err, ExportError::InvalidSheet { index: 0, .. }));
    }

    #[tokio::test]
    async fn test_oversized_client_text_rejected_before_rendering() {
        // The broken renderer would report a render error if it were reached.
        let exporter = Exporter::new(
            Arc::new(BrokenRenderer),
            assets(Arc::new(ResolverContext::default())),
        );
        let mut sheet = sample_sheet(ContentType::Stickers, &[]);
        for item in &mut sheet.items {
            item.text = "grace ".repeat(20_000);
        }
        let err = exporter.export(&[sheet], ExportFormat::Png).await.unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidSheet {
                index: 0,
                source: LayoutError::TextTooLong { slot: 0, .. }
            }
        ));
    }

    #[tokio::test]
    async fn test_client_slot_geometry_is_replaced() {
        let mut sheet = sample_sheet(ContentType::Wallpapers, &[]);
        let canonical = sheet.clone();
        sheet.items[0].slot.content.width = 1.0e6;
        sheet.guides = vec![crate::layout::Guide::RegistrationMark {
            x: 0.0,
            y: 0.0,
            size: 1.0e9,
        }];
        let tampered = exporter().export(&[sheet], ExportFormat::Png).await.unwrap();
        let clean = exporter().export(&[canonical], ExportFormat::Png).await.unwrap();
        assert_eq!(tampered[0].bytes, clean[0].bytes);
    }
}
