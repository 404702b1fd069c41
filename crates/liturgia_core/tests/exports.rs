use liturgia_core::render::{docx, pdf};
use liturgia_core::{
    CelebrationKind, LiturgicalColor, MassDocument, PdfOptions, RenderError, RenderStyle,
};
use std::fs;
use std::io::Read;

fn epiphany() -> MassDocument {
    let mut mass = MassDocument::new();
    mass.set_celebration(
        "Epifania do Senhor",
        "2026-01-06",
        CelebrationKind::Solemnity,
        LiturgicalColor::White,
        "Tempo do Natal",
    )
    .unwrap();
    mass.set_readings("Is 60,1-6", "Sl 71(72)", "Ef 3,2-3a.5-6", "Mt 2,1-12");
    mass.set_entrance_antiphon("Eis que vem o Senhor dos senhores.", "Ml 3,1");
    mass.add_custom_part(
        "Oração dos Magos",
        "Ouro, incenso e mirra.\nOferecemos ao Rei <verdadeiro> & eterno.",
        21,
    );
    mass
}

fn fully_filled() -> MassDocument {
    let mut mass = epiphany();
    let keys = mass
        .parts()
        .into_iter()
        .map(|part| part.key.clone())
        .collect::<Vec<_>>();
    for key in keys {
        mass.set_part_content(
            &key,
            "Texto litúrgico de exemplo que ocupa mais de uma linha quando a página é estreita.",
        );
    }
    mass
}

#[test]
fn text_export_round_trips_full_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missa.txt");
    let mass = epiphany();

    mass.export_to_text(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), mass.full_text());
}

#[test]
fn text_export_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("missa.txt");

    assert!(epiphany().export_to_text(&path).is_err());
}

#[test]
fn failed_pdf_layout_leaves_no_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missa.pdf");
    let style = RenderStyle {
        margin_points: 300.0,
        ..RenderStyle::default()
    };

    let result = epiphany().export_to_pdf(&path, &style);

    assert!(matches!(result, Err(RenderError::Pdf(_))));
    assert!(!path.exists());
}

#[test]
fn failed_export_keeps_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missa.pdf");
    fs::write(&path, b"previous export").unwrap();
    let style = RenderStyle {
        margin_points: 300.0,
        ..RenderStyle::default()
    };

    assert!(epiphany().export_to_pdf(&path, &style).is_err());

    assert_eq!(fs::read(&path).unwrap(), b"previous export");
}

#[cfg(not(feature = "pdf"))]
#[test]
fn pdf_export_without_renderer_is_unavailable_and_text_still_works() {
    let dir = tempfile::tempdir().unwrap();
    let pdf_path = dir.path().join("missa.pdf");
    let text_path = dir.path().join("missa.txt");
    let mass = epiphany();

    let result = mass.export_to_pdf(&pdf_path, &RenderStyle::default());

    assert!(matches!(
        result,
        Err(RenderError::RenderingUnavailable { format: "pdf", .. })
    ));
    assert!(!pdf_path.exists());
    mass.export_to_text(&text_path).unwrap();
    assert_eq!(fs::read_to_string(&text_path).unwrap(), mass.full_text());
}

#[cfg(not(feature = "docx"))]
#[test]
fn docx_export_without_renderer_is_unavailable_and_text_still_works() {
    let dir = tempfile::tempdir().unwrap();
    let docx_path = dir.path().join("missa.docx");
    let text_path = dir.path().join("missa.txt");
    let mass = epiphany();

    let result = mass.export_to_docx(&docx_path);

    assert!(matches!(
        result,
        Err(RenderError::RenderingUnavailable { format: "docx", .. })
    ));
    assert!(!docx_path.exists());
    mass.export_to_text(&text_path).unwrap();
    assert_eq!(fs::read_to_string(&text_path).unwrap(), mass.full_text());
}

#[cfg(feature = "pdf")]
#[test]
fn pdf_export_writes_one_page_per_layout_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missa.pdf");
    let mass = fully_filled();
    let options = PdfOptions {
        page_size: "A5".to_string(),
        liturgical_color: "branco".to_string(),
        ..PdfOptions::default()
    };
    let style = options.to_style().unwrap();

    mass.export_to_pdf(&path, &style).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let loaded = lopdf::Document::load_mem(&bytes).unwrap();
    let expected = pdf::layout(&mass, &style).unwrap().page_count();
    assert!(expected > 1);
    assert_eq!(loaded.get_pages().len(), expected);
}

#[cfg(feature = "pdf")]
#[test]
fn pdf_render_matches_file_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missa.pdf");
    let mass = epiphany();
    let style = PdfOptions::default().to_style().unwrap();

    mass.export_to_pdf(&path, &style).unwrap();
    let in_memory = pdf::render(&mass, &style).unwrap();

    let from_file = lopdf::Document::load(&path).unwrap();
    let from_memory = lopdf::Document::load_mem(&in_memory).unwrap();
    assert_eq!(from_file.get_pages().len(), from_memory.get_pages().len());
}

#[cfg(feature = "docx")]
#[test]
fn docx_export_is_a_word_package() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missa.docx");

    epiphany().export_to_docx(&path).unwrap();

    let file = fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
    ] {
        assert!(archive.by_name(name).is_ok(), "missing {name}");
    }

    let mut body = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut body)
        .unwrap();
    assert!(body.contains("EPIFANIA DO SENHOR"));
    assert!(body.contains("Evangelho: Mt 2,1-12"));
    assert!(body.contains("Oração dos Magos"));
    assert!(body.contains("&lt;verdadeiro&gt; &amp; eterno."));
}

#[test]
fn docx_headings_follow_render_order() {
    let mass = epiphany();
    let document = docx::render(&mass);

    let headings = document.headings().collect::<Vec<_>>();
    let expected = mass
        .ordered_non_empty_parts()
        .map(|part| part.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(headings, expected);
}
