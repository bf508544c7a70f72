//! In-memory docx fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

const IMAGE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn run(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#, escape(text))
}

fn drawing(rel_id: &str) -> String {
    format!(
        r#"<w:r><w:drawing><wp:inline><a:graphic><a:graphicData><pic:pic><pic:blipFill><a:blip r:embed="{}"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#,
        rel_id
    )
}

/// Builds a minimal but well-formed docx package.
#[derive(Debug, Default, Clone)]
pub struct DocxFixture {
    body: String,
    images: Vec<(String, String, Vec<u8>)>,
    core_title: Option<String>,
    core_creator: Option<String>,
    skip_document: bool,
}

impl DocxFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph of one run.
    pub fn paragraph(self, text: &str) -> Self {
        self.runs(&[text])
    }

    /// A paragraph of several runs.
    pub fn runs(mut self, runs: &[&str]) -> Self {
        self.body.push_str("<w:p>");
        for text in runs {
            self.body.push_str(&run(text));
        }
        self.body.push_str("</w:p>");
        self
    }

    /// A paragraph with drawings followed by optional text.
    pub fn image_paragraph(mut self, rel_ids: &[&str], text: &str) -> Self {
        self.body.push_str("<w:p>");
        for id in rel_ids {
            self.body.push_str(&drawing(id));
        }
        if !text.is_empty() {
            self.body.push_str(&run(text));
        }
        self.body.push_str("</w:p>");
        self
    }

    /// A table of single-paragraph cells.
    pub fn table(mut self, rows: &[&[&str]]) -> Self {
        self.body.push_str("<w:tbl><w:tblPr/>");
        for row in rows {
            self.body.push_str("<w:tr>");
            for cell in row.iter() {
                self.body
                    .push_str(&format!("<w:tc><w:p>{}</w:p></w:tc>", run(cell)));
            }
            self.body.push_str("</w:tr>");
        }
        self.body.push_str("</w:tbl>");
        self
    }

    /// Raw body XML.
    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    /// An image part under word/media with its relationship.
    pub fn image(mut self, rel_id: &str, file_name: &str, data: &[u8]) -> Self {
        self.images
            .push((rel_id.to_string(), file_name.to_string(), data.to_vec()));
        self
    }

    pub fn core_properties(mut self, title: &str, creator: &str) -> Self {
        self.core_title = Some(title.to_string());
        self.core_creator = Some(creator.to_string());
        self
    }

    /// Leave out word/document.xml.
    pub fn without_document(mut self) -> Self {
        self.skip_document = true;
        self
    }

    fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            self.body
        )
    }

    fn document_rels(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rIdStyles" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        );
        for (id, name, _) in &self.images {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="media/{}"/>"#,
                id, IMAGE_REL, name
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn core_xml(&self) -> Option<String> {
        let title = self.core_title.as_ref()?;
        let creator = self.core_creator.as_deref().unwrap_or_default();
        Some(format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>{}</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T08:30:00Z</dcterms:created></cp:coreProperties>"#,
            escape(title),
            escape(creator)
        ))
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
        )
        .unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#,
        )
        .unwrap();

        if !self.skip_document {
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(self.document_xml().as_bytes()).unwrap();
        }

        zip.start_file("word/_rels/document.xml.rels", options)
            .unwrap();
        zip.write_all(self.document_rels().as_bytes()).unwrap();

        for (_, name, data) in &self.images {
            zip.start_file(format!("word/media/{}", name), options)
                .unwrap();
            zip.write_all(data).unwrap();
        }

        if let Some(core) = self.core_xml() {
            zip.start_file("docProps/core.xml", options).unwrap();
            zip.write_all(core.as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}
