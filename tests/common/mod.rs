#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Cover page plus one pricing page, the shape most WAGO quotes have.
pub const COVER_PAGE: &[&str] = &[
    "WAGO Corporation",
    "Quotation #: 4471",
    "Date: 03/04/2024",
    "Valid until: 06/30/2024",
];

pub const PRICING_PAGE: &[&str] = &[
    "Part Number  Description  Price  Discount",
    "750-500  8-Channel Digital Input  $1,234.50",
    "2002-1201  Terminal block gray  $0.52",
    "221 Series  Lever connectors  --  12.5%",
];

/// Writes one Courier text line per entry; every page is a single BT/ET block.
pub fn write_text_pdf(path: &Path, pages: &[&[&str]]) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::with_capacity(pages.len());
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![40.into(), 790.into()]),
        ];
        for (index, line) in lines.iter().enumerate() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            if index + 1 < lines.len() {
                operations.push(Operation::new("T*", vec![]));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save(path)?;
    Ok(())
}

/// Writes the standard two-page quote into `dir` and returns its path.
pub fn write_sample_quote(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    write_text_pdf(&path, &[COVER_PAGE, PRICING_PAGE]).expect("PDF fixture should be created");
    path
}
