// src/pdf/reader.rs
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::Document;

use crate::pdf::models::{DocumentText, PageSelection};
use crate::utils::error::PdfError;

/// Opens a PDF, reporting a missing file separately from a broken one.
fn load_document(path: &Path) -> Result<Document, PdfError> {
    if !path.is_file() {
        return Err(PdfError::FileNotFound(path.to_path_buf()));
    }
    Document::load(path).map_err(|e| PdfError::Load(e.to_string()))
}

/// Maps a page selection onto lopdf's 1-based page numbers.
pub fn resolve_pages(page_numbers: &[u32], selection: PageSelection) -> Result<Vec<u32>, PdfError> {
    match selection {
        PageSelection::Full => Ok(page_numbers.to_vec()),
        PageSelection::Single(index) => page_numbers
            .get(index)
            .map(|page| vec![*page])
            .ok_or(PdfError::InsufficientPages { requested: index, available: page_numbers.len() }),
    }
}

/// Extracts text for the selected pages, one lopdf call per page.
pub fn extract_document_text(path: &Path, selection: PageSelection) -> Result<DocumentText, PdfError> {
    let doc = load_document(path)?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let page_count = page_numbers.len();
    tracing::info!("Processing {} pages...", page_count);

    let targets = resolve_pages(&page_numbers, selection)?;
    let mut pages = Vec::with_capacity(targets.len());

    for page in targets {
        tracing::info!("Processing page {}/{}", page, page_count);
        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::PageText { page, message: e.to_string() })?;
        pages.push(text);
    }

    Ok(DocumentText { page_count, text: pages.join("\n") })
}

/// A single PDF, or every `.pdf` directly inside a directory, in file-name order.
pub fn collect_pdf_paths(input: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Writes a minimal PDF with one Helvetica text line per page.
    pub(crate) fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_resolve_pages() {
        assert_eq!(resolve_pages(&[1, 2, 3], PageSelection::Full).unwrap(), vec![1, 2, 3]);
        assert_eq!(resolve_pages(&[1, 2, 3], PageSelection::Single(1)).unwrap(), vec![2]);

        let err = resolve_pages(&[1], PageSelection::Single(1)).unwrap_err();
        assert!(matches!(err, PdfError::InsufficientPages { requested: 1, available: 1 }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_document_text(&dir.path().join("ausente.pdf"), PageSelection::Full).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_garbage_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quebrado.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();

        let err = extract_document_text(&path, PageSelection::Full).unwrap_err();
        assert!(matches!(err, PdfError::Load(_)));
    }

    #[test]
    fn test_single_page_document_has_no_second_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uma_pagina.pdf");
        write_pdf(&path, &["Apelante: Fulano"]);

        let err = extract_document_text(&path, PageSelection::Single(1)).unwrap_err();
        assert!(matches!(err, PdfError::InsufficientPages { requested: 1, available: 1 }));

        let full = extract_document_text(&path, PageSelection::Full).unwrap();
        assert_eq!(full.page_count, 1);
    }

    #[test]
    fn test_pages_are_joined_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duas_paginas.pdf");
        write_pdf(&path, &["Apelante: Joao Silva", "VOTO"]);

        let full = extract_document_text(&path, PageSelection::Full).unwrap();
        assert_eq!(full.page_count, 2);
        assert_eq!(full.text, "Apelante: Joao Silva\n\nVOTO\n");

        let second = extract_document_text(&path, PageSelection::Single(1)).unwrap();
        assert_eq!(second.page_count, 2);
        assert_eq!(second.text, "VOTO\n");
    }

    #[test]
    fn test_collect_pdf_paths_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let names: Vec<String> = collect_pdf_paths(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);

        let single = dir.path().join("b.pdf");
        assert_eq!(collect_pdf_paths(&single).unwrap(), vec![single]);
    }
}
