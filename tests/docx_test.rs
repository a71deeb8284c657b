//! End-to-end tests: synthetic PDFs in, DOCX packages out.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use pdf2docx::{
    convert_file, convert_pdfs, read_blocks, BatchJob, BatchOutcome, Block, ConvertOptions,
    HeadingLevel, NoopReporter,
};

/// Write a PDF with one page per entry; each page shows `(text, size, y)` lines.
fn write_pdf(path: &Path, pages: &[&[(&str, i64, i64)]]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (text, size, y) in lines.iter() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
            operations.push(Operation::new("Td", vec![72.into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
    doc.save(path).unwrap();
}

fn document_xml(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[test]
fn test_convert_file_writes_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.pdf");
    write_pdf(
        &input,
        &[
            &[("Annual Report", 20, 720), ("Revenue grew", 10, 690)],
            &[("Outlook", 14, 720)],
        ],
    );

    let out_dir = dir.path().join("out");
    let output = convert_file(&input, &out_dir, &ConvertOptions::default()).unwrap();
    assert_eq!(output, out_dir.join("report.docx"));

    let xml = document_xml(&output);
    assert!(xml.contains("Annual Report"));
    assert!(xml.contains("Revenue grew"));
    assert!(xml.contains("Outlook"));
    assert!(xml.contains("Heading1"));
    assert!(xml.contains("Heading2"));
    assert_eq!(xml.matches("w:type=\"page\"").count(), 2);
}

#[test]
fn test_read_blocks_classifies_by_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sizes.pdf");
    write_pdf(&input, &[&[("Big", 18, 720), ("Mid", 13, 700), ("Small", 9, 680)]]);

    let blocks = read_blocks(&input, &ConvertOptions::default()).unwrap();
    let kinds: Vec<_> = blocks
        .iter()
        .map(|b| match b {
            Block::Heading { level, text } => format!("{:?} {}", level, text),
            Block::Paragraph { text } => format!("P {}", text),
            Block::Table { .. } => "T".to_string(),
            Block::PageBreak => "|".to_string(),
        })
        .collect();

    assert_eq!(kinds, vec!["H1 Big", "H2 Mid", "P Small", "|"]);
    assert!(matches!(
        blocks[0],
        Block::Heading {
            level: HeadingLevel::H1,
            ..
        }
    ));
}

#[test]
fn test_batch_fails_on_non_pdf_and_keeps_earlier_output() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.pdf");
    let bad = dir.path().join("bad.pdf");
    let later = dir.path().join("later.pdf");
    write_pdf(&good, &[&[("Fine", 10, 700)]]);
    fs::write(&bad, b"this is not a pdf").unwrap();
    write_pdf(&later, &[&[("Skipped", 10, 700)]]);

    let out_dir = dir.path().join("out");
    let job = BatchJob::new()
        .with_inputs([&good, &bad, &later])
        .with_output_dir(&out_dir);

    let outcome = convert_pdfs(&job, &ConvertOptions::default(), &mut NoopReporter).unwrap();
    match outcome {
        BatchOutcome::Failed {
            input, completed, ..
        } => {
            assert_eq!(input, bad);
            assert_eq!(completed, vec![out_dir.join("good.docx")]);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(out_dir.join("good.docx").exists());
    assert!(!out_dir.join("bad.docx").exists());
    assert!(!out_dir.join("later.docx").exists());
}
