//! Benchmarks for enews conversion performance.
//!
//! Run with: cargo bench
//!
//! Inputs are generated in memory: a plain-text article and docx packages
//! with a growing number of paragraphs and images.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

/// A synthetic article: title, numbered sections, subheadings and body text.
fn create_test_text(sections: usize) -> String {
    let mut text = String::from("電子報測試標題\n\n");
    for i in 1..=sections {
        text.push_str(&format!("{}. 第 {} 節\n", i, i));
        text.push_str("重點摘要\n");
        text.push_str("這是一段用來測量轉換效能的內文，長度足以被歸類為一般段落。\n\n");
    }
    text
}

/// A minimal docx with one image per section.
fn create_test_docx(sections: usize) -> Vec<u8> {
    let mut body = String::new();
    let mut rels = String::new();
    for i in 1..=sections {
        body.push_str(&format!(
            "<w:p><w:r><w:t>{}. 第 {} 節</w:t></w:r></w:p>\
             <w:p><w:r><w:drawing><a:blip r:embed=\"rId{}\"/></w:drawing></w:r></w:p>\
             <w:p><w:r><w:t>這是一段用來測量轉換效能的內文，長度足以被歸類為一般段落。</w:t></w:r></w:p>",
            i, i, i
        ));
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/image{}.png\"/>",
            i, i
        ));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("word/document.xml", options).unwrap();
    write!(
        zip,
        "<w:document \
         xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
         xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\"><w:body>\
         <w:p><w:r><w:t>電子報測試標題</w:t></w:r></w:p>{}</w:body></w:document>",
        body
    )
    .unwrap();

    zip.start_file("word/_rels/document.xml.rels", options).unwrap();
    write!(zip, "<Relationships>{}</Relationships>", rels).unwrap();

    for i in 1..=sections {
        zip.start_file(format!("word/media/image{}.png", i), options)
            .unwrap();
        zip.write_all(PNG).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Benchmark heading classification of single lines.
fn bench_classify(c: &mut Criterion) {
    let classifier = enews::HeadingClassifier::default();

    c.bench_function("classify_section_marker", |b| {
        b.iter(|| classifier.classify(black_box("第三章 研究方法"), false));
    });

    c.bench_function("classify_body_line", |b| {
        b.iter(|| {
            classifier.classify(
                black_box("這是一段用來測量轉換效能的內文，長度足以被歸類為一般段落。"),
                false,
            )
        });
    });
}

/// Benchmark plain-text conversion at various sizes.
fn bench_text_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_conversion");
    let options = enews::ConvertOptions::default();

    for sections in [10, 100].iter() {
        let text = create_test_text(*sections);

        group.bench_function(format!("{}_sections", sections), |b| {
            b.iter(|| enews::convert_bytes(black_box(text.as_bytes()), "txt", &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark docx conversion in both image modes.
fn bench_docx_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_conversion");
    let data = create_test_docx(50);

    let placeholder = enews::Enews::new().placeholder_images();
    group.bench_function("placeholder_images", |b| {
        b.iter(|| placeholder.convert_bytes(black_box(&data), "docx").unwrap());
    });

    let inline = enews::Enews::new().inline_images();
    group.bench_function("inline_images", |b| {
        b.iter(|| inline.convert_bytes(black_box(&data), "docx").unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_classify,
    bench_text_conversion,
    bench_docx_conversion,
);
criterion_main!(benches);
