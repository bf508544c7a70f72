//! Word (docx) reader built on `zip` and `quick-xml`.
//!
//! A docx file is a ZIP archive. The reader needs four parts of it:
//! - `[Content_Types].xml`: content type of every part
//! - `word/document.xml`: the body (paragraphs, tables, drawings)
//! - `word/_rels/document.xml.rels`: relationship id → media part
//! - `docProps/core.xml`: title, author and dates (optional)

use crate::detect::{self, SourceFormat};
use crate::error::{Error, Result};
use crate::model::{
    Block, ImageResource, Metadata, Paragraph, ResourceTable, SourceDocument, Table, TableCell,
    TableRow,
};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{LocalName, Namespace, ResolveResult};
use quick_xml::{NsReader, Reader};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const IMAGE_REL: &str = "/image";

/// Upper bound on buffer preallocation for a single part.
const MAX_PART_PREALLOC: usize = 1 << 20;

/// Reader for docx containers.
pub struct DocxReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<'a> DocxReader<Cursor<&'a [u8]>> {
    /// Open a docx held in memory.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        if !detect::is_docx_bytes(data) {
            return Err(Error::UnreadableDocument(
                "not a docx file (missing ZIP header)".to_string(),
            ));
        }
        Self::from_reader(Cursor::new(data))
    }
}

impl DocxReader<BufReader<File>> {
    /// Open a docx file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> DocxReader<R> {
    /// Open a docx from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Read the body, image resources and metadata.
    pub fn parse(mut self) -> Result<SourceDocument> {
        let content_types = match self.read_part("[Content_Types].xml")? {
            Some(xml) => ContentTypes::parse(&xml)?,
            None => ContentTypes::default(),
        };

        let main_part = self.main_part_name()?;
        let document_xml = self.read_part(&main_part)?.ok_or_else(|| {
            Error::UnreadableDocument(format!("missing main document part {}", main_part))
        })?;

        let relationships = match self.read_part(&rels_part_name(&main_part))? {
            Some(xml) => parse_relationships(&xml)?,
            None => Vec::new(),
        };

        let resources = self.collect_images(&main_part, &relationships, &content_types)?;
        let blocks = parse_body(&document_xml)?;

        let mut metadata = Metadata::new(SourceFormat::Docx);
        if let Some(core) = self.read_part("docProps/core.xml")? {
            // Core properties are informational; a damaged part is not fatal.
            if let Err(e) = apply_core_properties(&core, &mut metadata) {
                log::warn!("ignoring unreadable docProps/core.xml: {}", e);
            }
        }

        log::debug!(
            "docx parsed: {} top-level blocks, {} images, {} relationships",
            blocks.len(),
            resources.len(),
            relationships.len()
        );

        Ok(SourceDocument {
            metadata,
            blocks,
            resources,
        })
    }

    /// Read a part by name, `None` when the archive does not contain it.
    fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut data = Vec::with_capacity(capacity_hint(file.size()));
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    /// Resolve the main document part through the package relationships.
    fn main_part_name(&mut self) -> Result<String> {
        let Some(xml) = self.read_part("_rels/.rels")? else {
            return Ok(DEFAULT_MAIN_PART.to_string());
        };
        let main = parse_relationships(&xml)?
            .into_iter()
            .find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT_REL) && !rel.external)
            .map(|rel| resolve_target("", &rel.target))
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());
        Ok(main)
    }

    /// Load every internal image relationship of the main part, in
    /// relationship order. Missing media parts are skipped.
    fn collect_images(
        &mut self,
        main_part: &str,
        relationships: &[Relationship],
        content_types: &ContentTypes,
    ) -> Result<ResourceTable> {
        let base_dir = main_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let mut resources = ResourceTable::new();

        for rel in relationships {
            if !rel.rel_type.ends_with(IMAGE_REL) || rel.external {
                continue;
            }
            let part = resolve_target(base_dir, &rel.target);
            let Some(data) = self.read_part(&part)? else {
                log::warn!("image relationship {} points at missing part {}", rel.id, part);
                continue;
            };

            let mime_type = content_types
                .lookup(&part)
                .map(str::to_string)
                .or_else(|| ImageResource::detect_mime_type(&data).map(str::to_string))
                .or_else(|| ImageResource::mime_from_path(&part).map(str::to_string))
                .unwrap_or_else(|| "application/octet-stream".to_string());

            resources.insert(ImageResource::new(&rel.id, data, mime_type).with_filename(part));
        }

        Ok(resources)
    }
}

/// One entry of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
    external: bool,
}

/// Extract an attribute value by qualified name.
/// Preallocation for a part whose header declares `declared` bytes.
/// The declared size comes from the archive and is not trusted.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared).map_or(MAX_PART_PREALLOC, |size| size.min(MAX_PART_PREALLOC))
}

fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn parse_relationships(xml: &[u8]) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut relationships = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let (Some(id), Some(target)) = (get_attr(&e, b"Id"), get_attr(&e, b"Target"))
                else {
                    continue;
                };
                relationships.push(Relationship {
                    id,
                    rel_type: get_attr(&e, b"Type").unwrap_or_default(),
                    target,
                    external: get_attr(&e, b"TargetMode").as_deref() == Some("External"),
                });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(relationships)
}

/// `word/document.xml` → `word/_rels/document.xml.rels`
fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, name)) => format!("{}/_rels/{}.rels", dir, name),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the source part's directory.
fn resolve_target(base_dir: &str, target: &str) -> String {
    let mut segments: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        base_dir.split('/').filter(|s| !s.is_empty()).collect()
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Content types from `[Content_Types].xml`.
#[derive(Debug, Default)]
struct ContentTypes {
    defaults: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut types = Self::default();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                    b"Default" => {
                        if let (Some(ext), Some(ct)) =
                            (get_attr(&e, b"Extension"), get_attr(&e, b"ContentType"))
                        {
                            types.defaults.insert(ext.to_lowercase(), ct);
                        }
                    }
                    b"Override" => {
                        if let (Some(part), Some(ct)) =
                            (get_attr(&e, b"PartName"), get_attr(&e, b"ContentType"))
                        {
                            types
                                .overrides
                                .insert(part.trim_start_matches('/').to_string(), ct);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(types)
    }

    fn lookup(&self, part: &str) -> Option<&str> {
        if let Some(ct) = self.overrides.get(part) {
            return Some(ct);
        }
        let ext = part.rsplit_once('.')?.1.to_lowercase();
        self.defaults.get(&ext).map(String::as_str)
    }
}

/// WordprocessingML main namespaces (transitional and strict).
const WORD_NAMESPACES: &[&[u8]] = &[
    b"http://schemas.openxmlformats.org/wordprocessingml/2006/main",
    b"http://purl.oclc.org/ooxml/wordprocessingml/main",
];

/// DrawingML main namespaces.
const DRAWING_NAMESPACES: &[&[u8]] = &[
    b"http://schemas.openxmlformats.org/drawingml/2006/main",
    b"http://purl.oclc.org/ooxml/drawingml/main",
];

/// Relationship reference namespaces (`r:embed`).
const RELATIONSHIP_NAMESPACES: &[&[u8]] = &[
    b"http://schemas.openxmlformats.org/officeDocument/2006/relationships",
    b"http://purl.oclc.org/ooxml/officeDocument/relationships",
];

const MARKUP_COMPATIBILITY_NAMESPACE: &[u8] =
    b"http://schemas.openxmlformats.org/markup-compatibility/2006";

fn in_namespaces(ns: &ResolveResult, namespaces: &[&[u8]]) -> bool {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => namespaces.iter().any(|n| n == uri),
        _ => false,
    }
}

/// Body elements the builder acts on, identified by namespace and local
/// name so any prefix binding works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyTag {
    Paragraph,
    Text,
    Table,
    Row,
    Cell,
    Blip,
    Fallback,
    Other,
}

impl BodyTag {
    fn resolve(ns: ResolveResult, local: LocalName) -> Self {
        let local = local.as_ref();
        if in_namespaces(&ns, WORD_NAMESPACES) {
            match local {
                b"p" => BodyTag::Paragraph,
                b"t" => BodyTag::Text,
                b"tbl" => BodyTag::Table,
                b"tr" => BodyTag::Row,
                b"tc" => BodyTag::Cell,
                _ => BodyTag::Other,
            }
        } else if in_namespaces(&ns, DRAWING_NAMESPACES) && local == b"blip" {
            BodyTag::Blip
        } else if in_namespaces(&ns, &[MARKUP_COMPATIBILITY_NAMESPACE]) && local == b"Fallback" {
            BodyTag::Fallback
        } else {
            BodyTag::Other
        }
    }
}

/// The relationship id of a `blip` element's `embed` attribute.
fn embed_id(reader: &NsReader<&[u8]>, e: &BytesStart) -> Option<String> {
    e.attributes().filter_map(|a| a.ok()).find_map(|a| {
        let (ns, local) = reader.resolve_attribute(a.key);
        (in_namespaces(&ns, RELATIONSHIP_NAMESPACES) && local.as_ref() == b"embed")
            .then(|| String::from_utf8_lossy(&a.value).into_owned())
    })
}

/// Open containers while walking the body.
#[derive(Debug)]
enum Frame {
    /// The body or a table cell
    Blocks(Vec<Block>),
    Table(Table),
    Row(TableRow),
}

/// Builds the block tree from `document.xml` events.
///
/// Paragraphs nested inside a paragraph (text boxes) contribute their text
/// and images to the outer paragraph. Table markup inside a paragraph is
/// treated the same way. `mc:Fallback` content duplicates its `mc:Choice`
/// sibling and is ignored.
#[derive(Debug)]
struct BodyBuilder {
    stack: Vec<Frame>,
    paragraph: Option<Paragraph>,
    nested_paragraphs: usize,
    fallback_depth: usize,
    in_text: bool,
}

impl BodyBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Blocks(Vec::new())],
            paragraph: None,
            nested_paragraphs: 0,
            fallback_depth: 0,
            in_text: false,
        }
    }

    fn handle_start(&mut self, tag: BodyTag, embed: Option<String>) -> Result<()> {
        if tag == BodyTag::Fallback {
            self.fallback_depth += 1;
            return Ok(());
        }
        if self.fallback_depth > 0 {
            return Ok(());
        }

        let in_paragraph = self.paragraph.is_some();
        match tag {
            BodyTag::Paragraph => {
                if in_paragraph {
                    self.nested_paragraphs += 1;
                } else {
                    self.paragraph = Some(Paragraph::new());
                }
            }
            BodyTag::Text if in_paragraph => self.in_text = true,
            BodyTag::Blip => self.handle_blip(embed),
            BodyTag::Table if !in_paragraph => self.stack.push(Frame::Table(Table::new())),
            BodyTag::Row if !in_paragraph => self.stack.push(Frame::Row(TableRow::default())),
            BodyTag::Cell if !in_paragraph => self.stack.push(Frame::Blocks(Vec::new())),
            _ => {}
        }
        Ok(())
    }

    fn handle_empty(&mut self, tag: BodyTag, embed: Option<String>) -> Result<()> {
        if self.fallback_depth > 0 {
            return Ok(());
        }
        match tag {
            BodyTag::Blip => self.handle_blip(embed),
            BodyTag::Cell if self.paragraph.is_none() => {
                self.stack.push(Frame::Blocks(Vec::new()));
                self.close_cell()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_end(&mut self, tag: BodyTag) -> Result<()> {
        if tag == BodyTag::Fallback {
            self.fallback_depth = self.fallback_depth.saturating_sub(1);
            return Ok(());
        }
        if self.fallback_depth > 0 {
            return Ok(());
        }

        let in_paragraph = self.paragraph.is_some();
        match tag {
            BodyTag::Text => self.in_text = false,
            BodyTag::Paragraph => {
                if self.nested_paragraphs > 0 {
                    self.nested_paragraphs -= 1;
                } else if let Some(paragraph) = self.paragraph.take() {
                    self.push_block(Block::Paragraph(paragraph));
                }
            }
            BodyTag::Cell if !in_paragraph => self.close_cell()?,
            BodyTag::Row if !in_paragraph => match self.stack.pop() {
                Some(Frame::Row(row)) => match self.stack.last_mut() {
                    Some(Frame::Table(table)) => table.add_row(row),
                    _ => return Err(unbalanced("w:tr")),
                },
                _ => return Err(unbalanced("w:tr")),
            },
            BodyTag::Table if !in_paragraph => match self.stack.pop() {
                Some(Frame::Table(table)) => self.push_block(Block::Table(table)),
                _ => return Err(unbalanced("w:tbl")),
            },
            _ => {}
        }
        Ok(())
    }

    fn handle_text(&mut self, text: &str) {
        if !self.in_text || self.fallback_depth > 0 {
            return;
        }
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_text(text);
        }
    }

    fn handle_blip(&mut self, embed: Option<String>) {
        if let (Some(paragraph), Some(rel_id)) = (self.paragraph.as_mut(), embed) {
            paragraph.add_image(rel_id);
        }
    }

    fn close_cell(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Blocks(blocks)) => match self.stack.last_mut() {
                Some(Frame::Row(row)) => {
                    row.cells.push(TableCell::with_blocks(blocks));
                    Ok(())
                }
                _ => Err(unbalanced("w:tc")),
            },
            _ => Err(unbalanced("w:tc")),
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(Frame::Blocks(blocks)) => blocks.push(block),
            _ => log::warn!("dropping block found directly inside table markup"),
        }
    }

    fn finish(mut self) -> Result<Vec<Block>> {
        if let Some(paragraph) = self.paragraph.take() {
            self.push_block(Block::Paragraph(paragraph));
        }
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(Frame::Blocks(blocks)), true) => Ok(blocks),
            _ => Err(unbalanced("w:body")),
        }
    }
}

fn unbalanced(element: &str) -> Error {
    Error::UnreadableDocument(format!("unbalanced {} markup in document body", element))
}

/// Parse `document.xml` into body blocks.
fn parse_body(xml: &[u8]) -> Result<Vec<Block>> {
    let mut reader = NsReader::from_reader(xml);
    // Whitespace inside w:t is significant.
    reader.trim_text(false);

    let mut builder = BodyBuilder::new();
    let mut buf = Vec::new();
    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(e) => {
                let tag = BodyTag::resolve(ns, e.local_name());
                let embed = match tag {
                    BodyTag::Blip => embed_id(&reader, &e),
                    _ => None,
                };
                builder.handle_start(tag, embed)?;
            }
            Event::Empty(e) => {
                let tag = BodyTag::resolve(ns, e.local_name());
                let embed = match tag {
                    BodyTag::Blip => embed_id(&reader, &e),
                    _ => None,
                };
                builder.handle_empty(tag, embed)?;
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                builder.handle_text(&text);
            }
            Event::CData(e) => builder.handle_text(&String::from_utf8_lossy(&e)),
            Event::End(e) => builder.handle_end(BodyTag::resolve(ns, e.local_name()))?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    builder.finish()
}

/// Fill metadata from `docProps/core.xml`.
fn apply_core_properties(xml: &[u8], metadata: &mut Metadata) -> Result<()> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut current: Option<Vec<u8>> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => current = Some(e.name().as_ref().to_vec()),
            Event::Text(e) => {
                let text = e.unescape()?.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                match current.as_deref() {
                    Some(b"dc:title") => metadata.title = Some(text),
                    Some(b"dc:creator") => metadata.author = Some(text),
                    Some(b"dcterms:created") => metadata.created = parse_datetime(&text),
                    Some(b"dcterms:modified") => metadata.modified = parse_datetime(&text),
                    _ => {}
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(())
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
