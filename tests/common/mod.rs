//! Shared helpers: small PDFs built with lopdf.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Content of one test page.
pub enum PageContent<'a> {
    /// One line of text per entry, 14pt apart
    Lines(&'a [&'a str]),
    /// Same as `Lines`, stored with `/Filter /FlateDecode`
    Compressed(&'a [&'a str]),
    /// Same as `Lines`, one content stream per line in a `Contents` array
    Split(&'a [&'a str]),
    /// A `Contents` array whose second entry is not a stream
    BrokenPart(&'a str),
    /// A page whose `Contents` entry is not a stream
    Broken,
}

fn text_operations(lines: &[&str], first_y: i64) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("TL", vec![14.into()]),
        Operation::new("Td", vec![72.into(), first_y.into()]),
    ];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

fn encode(lines: &[&str], first_y: i64) -> Vec<u8> {
    let content = Content {
        operations: text_operations(lines, first_y),
    };
    content.encode().unwrap()
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Write a PDF with one line of text per page.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let contents: Vec<PageContent> = pages
        .iter()
        .map(|text| PageContent::Lines(std::slice::from_ref(text)))
        .collect();
    write_pdf_pages(path, &contents);
}

/// Write a PDF from page descriptions.
pub fn write_pdf_pages(path: &Path, pages: &[PageContent]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let contents: Object = match page {
            PageContent::Lines(lines) => doc
                .add_object(Stream::new(dictionary! {}, encode(lines, 720)))
                .into(),
            PageContent::Compressed(lines) => doc
                .add_object(Stream::new(
                    dictionary! { "Filter" => "FlateDecode" },
                    deflate(&encode(lines, 720)),
                ))
                .into(),
            PageContent::Split(lines) => {
                let parts: Vec<Object> = lines
                    .iter()
                    .enumerate()
                    .map(|(i, line)| {
                        let y = 720 - 14 * i as i64;
                        let stream = Stream::new(dictionary! {}, encode(&[*line], y));
                        doc.add_object(stream).into()
                    })
                    .collect();
                Object::Array(parts)
            }
            PageContent::BrokenPart(line) => {
                let good = doc.add_object(Stream::new(dictionary! {}, encode(&[*line], 720)));
                let bad = doc.add_object(42);
                Object::Array(vec![good.into(), bad.into()])
            }
            PageContent::Broken => doc.add_object(42).into(),
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// Path of a file inside a directory.
pub fn file(dir: &Path, name: &str) -> PathBuf {
    dir.join(name)
}

/// Check that a file exists and looks like a docx (zip) archive.
pub fn is_docx(path: &Path) -> bool {
    std::fs::read(path)
        .map(|bytes| bytes.starts_with(b"PK"))
        .unwrap_or(false)
}
