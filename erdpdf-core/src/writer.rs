use crate::document::Document;
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::page::Page;
use crate::text::{encode_win_ansi, write_literal, Font};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes a [`Document`] as a PDF 1.7 file with a classic xref table.
///
/// Object numbers are handed out sequentially from 1. Shared images are
/// written once and referenced from every page that paints them.
pub struct PdfWriter<W: Write> {
    writer: W,
    xref_positions: HashMap<ObjectId, u64>,
    current_position: u64,
    next_object_number: u32,
}

/// Object ids reserved for one page before anything is written, so the
/// page tree can list its kids up front.
struct PageIds {
    page: ObjectId,
    content: ObjectId,
}

impl<W: Write> PdfWriter<W> {
    pub fn new_with_writer(writer: W) -> Self {
        Self {
            writer,
            xref_positions: HashMap::new(),
            current_position: 0,
            next_object_number: 1,
        }
    }

    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        validate_image_refs(document)?;

        self.write_header()?;

        let catalog_id = self.allocate();
        let pages_id = self.allocate();
        let font_ids: BTreeMap<Font, ObjectId> =
            Font::ALL.iter().map(|font| (*font, self.allocate())).collect();
        let image_ids: BTreeMap<&str, ObjectId> = document
            .images
            .keys()
            .map(|name| (name.as_str(), self.allocate()))
            .collect();
        let page_ids: Vec<PageIds> = document
            .pages
            .iter()
            .map(|_| PageIds {
                page: self.allocate(),
                content: self.allocate(),
            })
            .collect();

        self.write_catalog(catalog_id, pages_id)?;
        self.write_page_tree(pages_id, &page_ids)?;
        self.write_fonts(&font_ids)?;

        for (name, id) in &image_ids {
            if let Some(image) = document.image(name) {
                self.write_object(*id, image.to_pdf_object()?)?;
            }
        }

        let font_resources: Dictionary = font_ids
            .iter()
            .map(|(font, id)| (font.pdf_name().to_string(), Object::Reference(*id)))
            .collect();

        for (page, ids) in document.pages.iter().zip(&page_ids) {
            let xobjects: Dictionary = page
                .image_refs()
                .filter_map(|name| {
                    image_ids
                        .get(name)
                        .map(|id| (name.to_string(), Object::Reference(*id)))
                })
                .collect();
            self.write_page(ids, pages_id, page, &font_resources, xobjects)?;
            self.write_page_content(ids.content, page)?;
        }

        let info_id = self.allocate();
        self.write_info(info_id, document)?;

        let xref_position = self.current_position;
        self.write_xref()?;
        self.write_trailer(catalog_id, info_id, xref_position)?;

        self.writer.flush()?;
        tracing::debug!(
            bytes = self.current_position,
            objects = self.xref_positions.len(),
            pages = document.page_count(),
            "wrote PDF"
        );
        Ok(())
    }

    fn allocate(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_object_number, 0);
        self.next_object_number += 1;
        id
    }

    fn write_header(&mut self) -> Result<()> {
        self.write_bytes(b"%PDF-1.7\n")?;
        // Binary comment to ensure file is treated as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n'])?;
        Ok(())
    }

    fn write_catalog(&mut self, catalog_id: ObjectId, pages_id: ObjectId) -> Result<()> {
        let mut catalog = Dictionary::typed("Catalog");
        catalog.set("Pages", pages_id);
        self.write_object(catalog_id, Object::Dictionary(catalog))
    }

    fn write_page_tree(&mut self, pages_id: ObjectId, page_ids: &[PageIds]) -> Result<()> {
        let mut pages_dict = Dictionary::typed("Pages");
        pages_dict.set("Count", page_ids.len() as i64);
        let kids: Vec<Object> = page_ids.iter().map(|ids| Object::Reference(ids.page)).collect();
        pages_dict.set("Kids", kids);
        self.write_object(pages_id, Object::Dictionary(pages_dict))
    }

    fn write_fonts(&mut self, font_ids: &BTreeMap<Font, ObjectId>) -> Result<()> {
        for (font, id) in font_ids {
            let mut font_dict = Dictionary::typed("Font");
            font_dict.set("Subtype", Object::name("Type1"));
            font_dict.set("BaseFont", Object::name(font.pdf_name()));
            font_dict.set("Encoding", Object::name("WinAnsiEncoding"));
            self.write_object(*id, Object::Dictionary(font_dict))?;
        }
        Ok(())
    }

    fn write_page(
        &mut self,
        ids: &PageIds,
        parent_id: ObjectId,
        page: &Page,
        font_resources: &Dictionary,
        xobjects: Dictionary,
    ) -> Result<()> {
        let mut page_dict = Dictionary::typed("Page");
        page_dict.set("Parent", parent_id);
        page_dict.set(
            "MediaBox",
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(page.width()),
                Object::Real(page.height()),
            ],
        );
        page_dict.set("Contents", ids.content);

        let mut resources = Dictionary::new();
        resources.set("Font", font_resources.clone());
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }
        page_dict.set("Resources", resources);

        self.write_object(ids.page, Object::Dictionary(page_dict))
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &Page) -> Result<()> {
        let mut stream = Stream::new(page.generate_content());
        stream.compress_flate()?;
        self.write_object(content_id, stream.into_object())
    }

    fn write_info(&mut self, info_id: ObjectId, document: &Document) -> Result<()> {
        let metadata = document.metadata();
        let mut info_dict = Dictionary::new();

        let text_fields = [
            ("Title", &metadata.title),
            ("Author", &metadata.author),
            ("Subject", &metadata.subject),
            ("Keywords", &metadata.keywords),
            ("Creator", &metadata.creator),
            ("Producer", &metadata.producer),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value {
                info_dict.set(key, Object::String(value.clone()));
            }
        }

        if let Some(creation_date) = metadata.creation_date {
            info_dict.set("CreationDate", Object::String(format_pdf_date(creation_date)));
        }
        if let Some(mod_date) = metadata.modification_date {
            info_dict.set("ModDate", Object::String(format_pdf_date(mod_date)));
        }

        self.write_object(info_id, Object::Dictionary(info_dict))
    }
}

impl PdfWriter<BufWriter<std::fs::File>> {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new_with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> PdfWriter<W> {
    fn write_object(&mut self, id: ObjectId, object: Object) -> Result<()> {
        self.xref_positions.insert(id, self.current_position);

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes())?;

        self.write_object_value(&object)?;

        self.write_bytes(b"\nendobj\n")?;
        Ok(())
    }

    fn write_object_value(&mut self, object: &Object) -> Result<()> {
        match object {
            Object::Null => self.write_bytes(b"null")?,
            Object::Boolean(b) => self.write_bytes(if *b { b"true" } else { b"false" })?,
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes())?,
            Object::Real(f) => self.write_bytes(format_real(*f).as_bytes())?,
            Object::String(s) => {
                let mut literal = String::with_capacity(s.len() + 2);
                write_literal(&mut literal, &encode_win_ansi(s));
                self.write_bytes(literal.as_bytes())?;
            }
            Object::Name(n) => {
                self.write_bytes(b"/")?;
                self.write_bytes(n.as_bytes())?;
            }
            Object::Array(arr) => {
                self.write_bytes(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ")?;
                    }
                    self.write_object_value(obj)?;
                }
                self.write_bytes(b"]")?;
            }
            Object::Dictionary(dict) => self.write_dictionary(dict)?,
            Object::Stream(dict, data) => {
                self.write_dictionary(dict)?;
                self.write_bytes(b"\nstream\n")?;
                self.write_bytes(data)?;
                self.write_bytes(b"\nendstream")?;
            }
            Object::Reference(id) => self.write_bytes(id.to_string().as_bytes())?,
        }
        Ok(())
    }

    fn write_dictionary(&mut self, dict: &Dictionary) -> Result<()> {
        self.write_bytes(b"<<")?;
        for (key, value) in dict.entries() {
            self.write_bytes(b"\n/")?;
            self.write_bytes(key.as_bytes())?;
            self.write_bytes(b" ")?;
            self.write_object_value(value)?;
        }
        self.write_bytes(b"\n>>")
    }

    fn write_xref(&mut self) -> Result<()> {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(ObjectId::number)
            .max()
            .unwrap_or(0);

        self.write_bytes(format!("xref\n0 {}\n", max_obj_num + 1).as_bytes())?;
        self.write_bytes(b"0000000000 65535 f \n")?;

        let positions: BTreeMap<u32, u64> = self
            .xref_positions
            .iter()
            .map(|(id, pos)| (id.number(), *pos))
            .collect();
        for obj_num in 1..=max_obj_num {
            match positions.get(&obj_num) {
                Some(position) => {
                    let entry = format!("{position:010} 00000 n \n");
                    self.write_bytes(entry.as_bytes())?;
                }
                None => self.write_bytes(b"0000000000 00000 f \n")?,
            }
        }

        Ok(())
    }

    fn write_trailer(
        &mut self,
        catalog_id: ObjectId,
        info_id: ObjectId,
        xref_position: u64,
    ) -> Result<()> {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(ObjectId::number)
            .max()
            .unwrap_or(0);

        let mut trailer = Dictionary::new();
        trailer.set("Size", (max_obj_num + 1) as i64);
        trailer.set("Root", catalog_id);
        trailer.set("Info", info_id);

        self.write_bytes(b"trailer\n")?;
        self.write_dictionary(&trailer)?;
        self.write_bytes(b"\nstartxref\n")?;
        self.write_bytes(xref_position.to_string().as_bytes())?;
        self.write_bytes(b"\n%%EOF\n")?;

        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.current_position += data.len() as u64;
        Ok(())
    }
}

/// Every image a page paints must be registered on the document.
fn validate_image_refs(document: &Document) -> Result<()> {
    for (index, page) in document.pages.iter().enumerate() {
        for name in page.image_refs() {
            if document.image(name).is_none() {
                return Err(PdfError::InvalidReference(format!(
                    "page {} paints unregistered image '{name}'",
                    index + 1
                )));
            }
        }
    }
    Ok(())
}

fn format_real(value: f64) -> String {
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a DateTime as a PDF date string (D:YYYYMMDDHHmmSSOHH'mm)
fn format_pdf_date(date: DateTime<Utc>) -> String {
    let formatted = date.format("D:%Y%m%d%H%M%S");
    format!("{formatted}+00'00")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{Image, ImageColorSpace};

    fn write(document: &Document) -> Vec<u8> {
        let mut buffer = Vec::new();
        PdfWriter::new_with_writer(&mut buffer)
            .write_document(document)
            .unwrap();
        buffer
    }

    fn red_image() -> Image {
        Image::from_raw(2, 1, ImageColorSpace::DeviceRGB, vec![255, 0, 0, 255, 0, 0]).unwrap()
    }

    #[test]
    fn test_write_header() {
        let mut buffer = Vec::new();
        let mut writer = PdfWriter::new_with_writer(&mut buffer);

        writer.write_header().unwrap();

        assert!(buffer.starts_with(b"%PDF-1.7\n"));
        assert_eq!(buffer.len(), 15);
        assert_eq!(&buffer[9..], &[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);
    }

    #[test]
    fn test_write_empty_document() {
        let buffer = write(&Document::new());

        let content = String::from_utf8_lossy(&buffer);
        assert!(content.starts_with("%PDF-1.7\n"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Count 0"));
        assert!(content.contains("trailer"));
        assert!(content.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_object_numbers_are_sequential() {
        let mut document = Document::new();
        document.add_page(Page::a4());
        document.add_page(Page::a4());
        let buffer = write(&document);
        let content = String::from_utf8_lossy(&buffer);

        // catalog, pages, 5 fonts, 2 x (page, content), info
        let count = 1 + 1 + Font::ALL.len() + 4 + 1;
        for n in 1..=count {
            assert!(content.contains(&format!("\n{n} 0 obj\n")), "object {n} missing");
        }
        assert!(!content.contains(&format!("\n{} 0 obj\n", count + 1)));
        assert!(content.contains(&format!("/Size {}", count + 1)));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut document = Document::new();
        document.set_title("Offsets");
        document.add_page(Page::a4());
        let buffer = write(&document);

        let tail = String::from_utf8_lossy(&buffer[buffer.len() - 32..]).to_string();
        let after = &tail[tail.rfind("startxref\n").unwrap() + "startxref\n".len()..];
        let xref_offset: usize = after.lines().next().unwrap().parse().unwrap();
        assert!(buffer[xref_offset..].starts_with(b"xref\n"));

        let xref = std::str::from_utf8(&buffer[xref_offset..]).unwrap();
        let first_entry = xref.lines().nth(3).unwrap();
        let first_offset: usize = first_entry[..10].parse().unwrap();
        assert!(buffer[first_offset..].starts_with(b"1 0 obj\n"));
    }

    #[test]
    fn test_shared_image_written_once() {
        let mut document = Document::new();
        document.add_image("Diagram", red_image()).unwrap();
        for offset in [0.0, -100.0, -200.0] {
            let mut page = Page::a4();
            page.draw_image("Diagram", 10.0, offset, 200.0, 100.0).unwrap();
            document.add_page(page);
        }
        document.add_page(Page::a4());

        let buffer = write(&document);
        let content = String::from_utf8_lossy(&buffer);

        assert_eq!(content.matches("/Subtype /Image").count(), 1);
        assert_eq!(content.matches("/Diagram ").count(), 3);
    }

    #[test]
    fn test_unregistered_image_is_rejected() {
        let mut document = Document::new();
        let mut page = Page::a4();
        page.draw_image("Missing", 0.0, 0.0, 10.0, 10.0).unwrap();
        document.add_page(page);

        let mut buffer = Vec::new();
        let result = PdfWriter::new_with_writer(&mut buffer).write_document(&document);
        assert!(matches!(result, Err(PdfError::InvalidReference(_))));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fonts_use_win_ansi() {
        let buffer = write(&Document::new());
        let content = String::from_utf8_lossy(&buffer);
        assert_eq!(content.matches("/Encoding /WinAnsiEncoding").count(), Font::ALL.len());
        assert!(content.contains("/BaseFont /Helvetica-Bold"));
    }

    #[test]
    fn test_info_strings_are_escaped() {
        let mut document = Document::new();
        document.set_title("GlamCart (ERD)");
        document.set_author("Team \\ Docs");
        let buffer = write(&document);
        let content = String::from_utf8_lossy(&buffer);

        assert!(content.contains("/Title (GlamCart \\(ERD\\))"));
        assert!(content.contains("/Author (Team \\\\ Docs)"));
        assert!(content.contains("/Producer (erdpdf v"));
    }

    #[test]
    fn test_format_pdf_date() {
        use chrono::TimeZone;

        let date = Utc.with_ymd_and_hms(2023, 12, 25, 15, 30, 45).unwrap();
        assert_eq!(format_pdf_date(date), "D:20231225153045+00'00");
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(595.275591), "595.275591");
        assert_eq!(format_real(841.89), "841.89");
        assert_eq!(format_real(0.0), "0");
        assert_eq!(format_real(-0.0), "0");
        assert_eq!(format_real(12.5), "12.5");
    }

    #[test]
    fn test_write_bytes_tracks_position() {
        let mut buffer = Vec::new();
        {
            let mut writer = PdfWriter::new_with_writer(&mut buffer);
            writer.write_bytes(b"Hello").unwrap();
            assert_eq!(writer.current_position, 5);
            writer.write_bytes(b" World").unwrap();
            assert_eq!(writer.current_position, 11);
        }
        assert_eq!(buffer, b"Hello World");
    }
}
