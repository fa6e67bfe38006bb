//! PDF assembly: one full-bleed JPEG page per sheet.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const PT_PER_INCH: f64 = 72.0;
const MM_PER_INCH: f64 = 25.4;

pub fn mm_to_pt(mm: f64) -> f32 {
    (mm * PT_PER_INCH / MM_PER_INCH) as f32
}

/// A rasterized page ready for embedding.
pub struct PdfPage {
    pub jpeg: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub width_pt: f32,
    pub height_pt: f32,
}

/// Builds the document. Each page's MediaBox is its physical size and the
/// image is scaled to cover it exactly.
pub fn build_document(pages: Vec<PdfPage>) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for page in pages {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => page.pixel_width as i64,
                "Height" => page.pixel_height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            page.jpeg,
        );
        let image_id = doc.add_object(image);
        let resources_id = doc.add_object(dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        page.width_pt.into(),
                        0.into(),
                        0.into(),
                        page.height_pt.into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec!["Im0".into()]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), page.width_pt.into(), page.height_pt.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(w: f32, h: f32) -> PdfPage {
        PdfPage {
            jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
            pixel_width: 2,
            pixel_height: 2,
            width_pt: w,
            height_pt: h,
        }
    }

    #[test]
    fn test_a4_in_points() {
        assert!((mm_to_pt(210.0) - 595.28).abs() < 0.01);
        assert!((mm_to_pt(297.0) - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_one_page_per_input_in_order() {
        let bytes = build_document(vec![page(595.28, 841.89), page(300.0, 400.0)]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        let second = doc.get_dictionary(pages[&2]).unwrap();
        let media_box = second.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_float().unwrap(), 300.0);
        assert_eq!(media_box[3].as_float().unwrap(), 400.0);
    }
}
