//! Word-processing (DOCX) renderer.
//!
//! # Responsibility
//! - Turn a `MassDocument` into an ordered block list (`render`).
//! - Package the blocks as an Office Open XML file (`DocxDocument::write_to`).
//!
//! # Invariants
//! - One `Heading2` block per non-empty part, in render order.
//! - Paragraph splitting follows `render::split_paragraphs`.

use crate::mass::document::MassDocument;
use crate::render::{split_paragraphs, RenderResult};
use std::io::{Seek, Write};

#[cfg(feature = "docx")]
use crate::render::RenderError;

/// One block of the generated document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxBlock {
    /// Centered document title.
    Title(String),
    /// Centered plain paragraph.
    Centered(String),
    /// Level-2 heading.
    Heading(String),
    /// Body paragraph; each entry is one line, joined by line breaks.
    Paragraph(Vec<String>),
    Blank,
}

/// Structured DOCX body, independent of the package format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxDocument {
    pub blocks: Vec<DocxBlock>,
}

impl DocxDocument {
    pub fn headings(&self) -> impl Iterator<Item = &str> + '_ {
        self.blocks.iter().filter_map(|block| match block {
            DocxBlock::Heading(title) => Some(title.as_str()),
            _ => None,
        })
    }
}

/// Builds the block list for a document.
pub fn render(document: &MassDocument) -> DocxDocument {
    let mut blocks = Vec::new();

    if let Some(celebration) = document.celebration() {
        blocks.push(DocxBlock::Title(celebration.name.to_uppercase()));
        blocks.push(DocxBlock::Centered(format!(
            "Data: {} | Cor Litúrgica: {}",
            celebration.display_date(),
            celebration.color
        )));
        blocks.push(DocxBlock::Blank);
    }

    for part in document.ordered_non_empty_parts() {
        blocks.push(DocxBlock::Heading(part.title.clone()));
        for paragraph in split_paragraphs(&part.content) {
            blocks.push(DocxBlock::Paragraph(
                paragraph.into_iter().map(str::to_string).collect(),
            ));
        }
    }

    DocxDocument { blocks }
}

#[cfg(not(feature = "docx"))]
impl DocxDocument {
    /// Packages the document; unavailable in this build.
    pub fn write_to<W: Write + Seek>(&self, _writer: W) -> RenderResult<()> {
        Err(crate::render::RenderError::RenderingUnavailable {
            format: "docx",
            hint: "rebuild liturgia_core with the `docx` feature to enable DOCX export",
        })
    }
}

#[cfg(feature = "docx")]
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

#[cfg(feature = "docx")]
const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

#[cfg(feature = "docx")]
const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

#[cfg(feature = "docx")]
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Times New Roman" w:hAnsi="Times New Roman"/><w:sz w:val="24"/></w:rPr></w:rPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:pPr><w:spacing w:after="120"/></w:pPr></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:sz w:val="52"/></w:rPr></w:style><w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/></w:rPr></w:style></w:styles>"#;

#[cfg(feature = "docx")]
const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

#[cfg(feature = "docx")]
impl DocxDocument {
    /// Packages the document as a DOCX zip into `writer`.
    ///
    /// # Errors
    /// - Returns [`RenderError::Docx`] when XML or zip writing fails.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> RenderResult<()> {
        use zip::write::SimpleFileOptions;
        use zip::{CompressionMethod, ZipWriter};

        let body = self.document_xml()?;
        let mut zip = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let entries: [(&str, &[u8]); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
            ("word/styles.xml", STYLES_XML.as_bytes()),
            ("word/document.xml", body.as_slice()),
        ];
        for (name, bytes) in entries {
            zip.start_file(name, options).map_err(zip_error)?;
            zip.write_all(bytes)?;
        }
        zip.finish().map_err(zip_error)?;
        Ok(())
    }

    /// Serializes `word/document.xml`.
    fn document_xml(&self) -> RenderResult<Vec<u8>> {
        use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
        use quick_xml::Writer;

        let mut writer = Writer::new(Vec::new());
        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        write(
            &mut writer,
            Event::Start(BytesStart::new("w:document").with_attributes([("xmlns:w", WORD_NS)])),
        )?;
        write(&mut writer, Event::Start(BytesStart::new("w:body")))?;

        for block in &self.blocks {
            match block {
                DocxBlock::Title(text) => {
                    write_paragraph(&mut writer, Some("Title"), true, &[text.as_str()])?
                }
                DocxBlock::Centered(text) => {
                    write_paragraph(&mut writer, None, true, &[text.as_str()])?
                }
                DocxBlock::Heading(text) => {
                    write_paragraph(&mut writer, Some("Heading2"), false, &[text.as_str()])?
                }
                DocxBlock::Paragraph(lines) => {
                    let lines = lines.iter().map(String::as_str).collect::<Vec<_>>();
                    write_paragraph(&mut writer, None, false, &lines)?
                }
                DocxBlock::Blank => write_paragraph(&mut writer, None, false, &[])?,
            }
        }

        write(&mut writer, Event::Empty(BytesStart::new("w:sectPr")))?;
        write(&mut writer, Event::End(BytesEnd::new("w:body")))?;
        write(&mut writer, Event::End(BytesEnd::new("w:document")))?;
        Ok(writer.into_inner())
    }
}

#[cfg(feature = "docx")]
fn write(writer: &mut quick_xml::Writer<Vec<u8>>, event: quick_xml::events::Event<'_>) -> RenderResult<()> {
    writer
        .write_event(event)
        .map_err(|err| RenderError::Docx(err.to_string()))
}

#[cfg(feature = "docx")]
fn write_paragraph(
    writer: &mut quick_xml::Writer<Vec<u8>>,
    style: Option<&str>,
    centered: bool,
    lines: &[&str],
) -> RenderResult<()> {
    use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

    write(writer, Event::Start(BytesStart::new("w:p")))?;
    if style.is_some() || centered {
        write(writer, Event::Start(BytesStart::new("w:pPr")))?;
        if let Some(style) = style {
            write(
                writer,
                Event::Empty(BytesStart::new("w:pStyle").with_attributes([("w:val", style)])),
            )?;
        }
        if centered {
            write(
                writer,
                Event::Empty(BytesStart::new("w:jc").with_attributes([("w:val", "center")])),
            )?;
        }
        write(writer, Event::End(BytesEnd::new("w:pPr")))?;
    }

    if !lines.is_empty() {
        write(writer, Event::Start(BytesStart::new("w:r")))?;
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                write(writer, Event::Empty(BytesStart::new("w:br")))?;
            }
            write(
                writer,
                Event::Start(BytesStart::new("w:t").with_attributes([("xml:space", "preserve")])),
            )?;
            write(writer, Event::Text(BytesText::new(line)))?;
            write(writer, Event::End(BytesEnd::new("w:t")))?;
        }
        write(writer, Event::End(BytesEnd::new("w:r")))?;
    }

    write(writer, Event::End(BytesEnd::new("w:p")))
}

#[cfg(feature = "docx")]
fn zip_error(err: zip::result::ZipError) -> RenderError {
    RenderError::Docx(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{render, DocxBlock};
    use crate::mass::document::MassDocument;
    use crate::model::celebration::{CelebrationKind, LiturgicalColor};

    #[test]
    fn blocks_follow_celebration_and_part_order() {
        let mut mass = MassDocument::new();
        mass.set_celebration(
            "Epifania do Senhor",
            "2026-01-06",
            CelebrationKind::Solemnity,
            LiturgicalColor::White,
            "Tempo do Natal",
        )
        .expect("valid date");
        mass.set_part_content("gospel", "Evangelho: Mt 2,1-12");

        let document = render(&mass);
        assert_eq!(
            &document.blocks[..3],
            &[
                DocxBlock::Title("EPIFANIA DO SENHOR".to_string()),
                DocxBlock::Centered("Data: 06/01/2026 | Cor Litúrgica: branco".to_string()),
                DocxBlock::Blank,
            ]
        );
        assert_eq!(
            document.headings().collect::<Vec<_>>(),
            ["Saudação", "Kyrie", "Evangelho"]
        );
    }

    #[test]
    fn content_splits_into_paragraphs_with_line_breaks() {
        let mut mass = MassDocument::new();
        mass.set_part_content("greeting", "");
        mass.set_part_content("kyrie", "");
        mass.set_part_content("homily", "Primeira linha\nSegunda linha\n\nNovo parágrafo");

        let document = render(&mass);
        assert_eq!(
            document.blocks,
            vec![
                DocxBlock::Heading("Homilia".to_string()),
                DocxBlock::Paragraph(vec![
                    "Primeira linha".to_string(),
                    "Segunda linha".to_string()
                ]),
                DocxBlock::Paragraph(vec!["Novo parágrafo".to_string()]),
            ]
        );
    }

    #[cfg(feature = "docx")]
    #[test]
    fn package_contains_document_and_styles() {
        use std::io::{Cursor, Read};

        let mut mass = MassDocument::new();
        mass.set_part_content("homily", "Irmãos & irmãs <caríssimos>");

        let mut cursor = Cursor::new(Vec::new());
        render(&mass).write_to(&mut cursor).expect("write docx");

        let mut archive = zip::ZipArchive::new(Cursor::new(cursor.into_inner())).expect("zip");
        assert!(archive.by_name("word/styles.xml").is_ok());
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .expect("document part")
            .read_to_string(&mut xml)
            .expect("utf-8 xml");
        assert_eq!(xml.matches(r#"<w:pStyle w:val="Heading2"/>"#).count(), 3);
        assert!(xml.contains("Irmãos &amp; irmãs &lt;caríssimos&gt;"));
    }
}
