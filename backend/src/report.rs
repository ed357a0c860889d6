use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use log::warn;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use shared::{BreedPrediction, DogAttributes};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build report document: {0}")]
    Pdf(#[from] lopdf::Error),
}

pub struct ReportInput<'a> {
    pub pet_name: Option<&'a str>,
    /// Base64 of the analyzed photo, as echoed by the predict endpoint.
    pub selected_image: &'a str,
    pub top_breeds: &'a [BreedPrediction],
    pub attributes: &'a DogAttributes,
}

/// Prettifies a classifier label for display: underscores become spaces
/// and each word is capitalized. Names that already start with an
/// uppercase letter pass through untouched.
pub fn format_breed_name(name: &str) -> String {
    if name.chars().next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }

    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes a one-page A4 report into `reports_dir` and returns the file
/// name. Layout is intentionally minimal: page border, title, the breed
/// probability list, the attribute profile, and the analyzed photo when it
/// decodes cleanly.
pub fn generate_pdf_report(
    input: &ReportInput<'_>,
    reports_dir: &Path,
) -> Result<String, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let mut resources = dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    };

    let mut ops: Vec<Operation> = Vec::new();

    // Page border, 30pt in from every edge of the A4 media box.
    ops.push(Operation::new("w", vec![1.into()]));
    ops.push(Operation::new(
        "re",
        vec![30.into(), 30.into(), 535.into(), 782.into()],
    ));
    ops.push(Operation::new("S", vec![]));

    let dog_name = input
        .pet_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or("Dog");

    text_block(&mut ops, 20, 50, 780, "Dog Breed Identification Report");
    text_block(&mut ops, 12, 50, 752, &format!("Report for {}", dog_name));
    text_block(
        &mut ops,
        10,
        50,
        736,
        &format!("Generated on {}", Utc::now().format("%Y-%m-%d")),
    );

    if let Some((jpeg, width, height)) = decode_selected_image(input.selected_image) {
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(width),
                "Height" => i64::from(height),
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));
        resources.set("XObject", dictionary! { "Im1" => image_id });

        // Fit into a 200x150 box against the top-right of the border.
        let scale = (200.0 / width as f32).min(150.0 / height as f32);
        let draw_w = (width as f32 * scale).round() as i64;
        let draw_h = (height as f32 * scale).round() as i64;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                draw_w.into(),
                0.into(),
                0.into(),
                draw_h.into(),
                (545 - draw_w).into(),
                (720 - draw_h).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec!["Im1".into()]));
        ops.push(Operation::new("Q", vec![]));
    } else {
        warn!("Selected image could not be decoded; generating a text-only report");
    }

    text_block(&mut ops, 14, 50, 700, "Breed Matches");
    let mut y: i64 = 678;
    for breed in input.top_breeds {
        text_block(
            &mut ops,
            12,
            60,
            y,
            &format!("{}: {}%", format_breed_name(&breed.name), breed.probability),
        );
        y -= 18;
    }

    y -= 24;
    text_block(&mut ops, 14, 50, y, "Attribute Profile");
    y -= 22;
    let attributes = input.attributes;
    let rows = [
        ("Size", attributes.size),
        ("Weight", attributes.weight),
        ("Aggression", attributes.aggression),
        ("Trainability", attributes.trainability),
        ("Energy level", attributes.energy_level),
        ("Lifespan", attributes.lifespan),
    ];
    for (label, value) in rows {
        text_block(&mut ops, 12, 60, y, &format!("{}: {:.1} / 10", label, value));
        y -= 18;
    }

    text_block(
        &mut ops,
        9,
        50,
        48,
        "Generated by the Dog Breed Identification service",
    );

    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let file_name = format!(
        "{}_Report_{}.pdf",
        sanitize_file_stem(dog_name),
        Utc::now().timestamp_millis()
    );
    doc.save(reports_dir.join(&file_name))?;
    Ok(file_name)
}

fn text_block(ops: &mut Vec<Operation>, font_size: i64, x: i64, y: i64, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), font_size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Decodes the echoed base64 photo and re-encodes it as JPEG for
/// embedding. Any failure degrades to a text-only report.
fn decode_selected_image(selected_image: &str) -> Option<(Vec<u8>, u32, u32)> {
    let bytes = BASE64.decode(selected_image).ok()?;
    let decoded = image::load_from_memory(&bytes).ok()?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, 85);
    encoder.encode_image(&rgb).ok()?;
    Some((jpeg, width, height))
}

fn sanitize_file_stem(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_breed_name_title_cases_underscore_labels() {
        assert_eq!(
            format_breed_name("flat-coated_retriever"),
            "Flat-coated Retriever"
        );
        assert_eq!(format_breed_name("german_shepherd"), "German Shepherd");
    }

    #[test]
    fn format_breed_name_keeps_already_cased_names() {
        assert_eq!(format_breed_name("Labrador Retriever"), "Labrador Retriever");
        assert_eq!(format_breed_name("Shih Tzu"), "Shih Tzu");
    }

    #[test]
    fn sanitize_file_stem_collapses_whitespace() {
        assert_eq!(sanitize_file_stem("Sir  Barks a Lot"), "Sir_Barks_a_Lot");
    }

    #[test]
    fn generates_a_parseable_pdf_even_without_an_image() {
        let dir = std::env::temp_dir().join("breed_report_tests");
        std::fs::create_dir_all(&dir).unwrap();

        let breeds = vec![
            BreedPrediction {
                name: "Labrador_retriever".to_string(),
                probability: 100,
            },
            BreedPrediction {
                name: "Golden_retriever".to_string(),
                probability: 0,
            },
        ];
        let attributes = DogAttributes::uniform(5.0);
        let input = ReportInput {
            pet_name: Some("Rex"),
            selected_image: "not base64 at all",
            top_breeds: &breeds,
            attributes: &attributes,
        };

        let file_name = generate_pdf_report(&input, &dir).unwrap();
        assert!(file_name.starts_with("Rex_Report_"));
        assert!(file_name.ends_with(".pdf"));

        let bytes = std::fs::read(dir.join(&file_name)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
