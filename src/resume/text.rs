// src/resume/text.rs
//! Plain-text extraction from uploaded resume files.

use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::OnceLock;
use thiserror::Error;

use crate::common::ApiError;

#[derive(Debug, Error)]
pub enum ResumeTextError {
    #[error("Unsupported file type. Please upload PDF, DOCX, or TXT files only.")]
    UnsupportedType,

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),

    #[error("No text content found in the uploaded file")]
    Empty,
}

impl From<ResumeTextError> for ApiError {
    fn from(err: ResumeTextError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Text,
}

impl ResumeFormat {
    /// Chosen by extension, case-insensitively
    pub fn from_filename(filename: &str) -> Result<Self, ResumeTextError> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(ResumeFormat::Pdf),
            "docx" => Ok(ResumeFormat::Docx),
            "txt" => Ok(ResumeFormat::Text),
            _ => Err(ResumeTextError::UnsupportedType),
        }
    }
}

pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, ResumeTextError> {
    let text = match ResumeFormat::from_filename(filename)? {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ResumeTextError::Pdf(e.to_string()))?,
        ResumeFormat::Docx => docx_text(bytes)?,
        ResumeFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ResumeTextError::Empty);
    }
    Ok(text)
}

/// Text of `word/document.xml`, one line per paragraph
fn docx_text(bytes: &[u8]) -> Result<String, ResumeTextError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ResumeTextError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ResumeTextError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| ResumeTextError::Docx(e.to_string()))?;

    Ok(document_xml_text(&xml))
}

static XML_TAG: OnceLock<Option<Regex>> = OnceLock::new();

fn document_xml_text(xml: &str) -> String {
    let xml = xml.replace("</w:p>", "\n").replace("<w:tab/>", "\t");
    let text = match XML_TAG.get_or_init(|| Regex::new(r"<[^>]+>").ok()) {
        Some(re) => re.replace_all(&xml, "").into_owned(),
        None => xml,
    };

    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ResumeFormat::from_filename("cv.PDF").unwrap(), ResumeFormat::Pdf);
        assert_eq!(ResumeFormat::from_filename("my.resume.docx").unwrap(), ResumeFormat::Docx);
        assert!(matches!(
            ResumeFormat::from_filename("resume.doc"),
            Err(ResumeTextError::UnsupportedType)
        ));
        assert!(ResumeFormat::from_filename("resume").is_err());
    }

    #[test]
    fn test_plain_text_and_empty_files() {
        let text = extract_text("resume.txt", b"  Jane Doe\nRust developer \n").unwrap();
        assert_eq!(text, "Jane Doe\nRust developer");
        assert!(matches!(extract_text("resume.txt", b"   \n"), Err(ResumeTextError::Empty)));
    }

    #[test]
    fn test_docx_paragraphs() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", zip::write::FileOptions::default())
                .unwrap();
            writer
                .write_all(
                    br#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>R&amp;D engineer</w:t></w:r></w:p></w:body></w:document>"#,
                )
                .unwrap();
            writer.finish().unwrap();
        }

        let text = extract_text("resume.docx", buffer.get_ref()).unwrap();
        assert_eq!(text, "Jane Doe\nR&D engineer");
    }

    #[test]
    fn test_corrupt_docx_is_rejected() {
        assert!(matches!(
            extract_text("resume.docx", b"not a zip"),
            Err(ResumeTextError::Docx(_))
        ));
    }
}
