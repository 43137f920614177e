//! Document type classification.

use ragtool_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How ingested content should be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    #[serde(rename = "pdf_file")]
    Pdf,
    TextFile,
    Csv,
    Json,
    Xml,
    Docx,
    Mdx,
    Directory,
    Website,
    Text,
}

impl DataType {
    /// All variants, in declaration order.
    pub const ALL: [DataType; 10] = [
        Self::Pdf,
        Self::TextFile,
        Self::Csv,
        Self::Json,
        Self::Xml,
        Self::Docx,
        Self::Mdx,
        Self::Directory,
        Self::Website,
        Self::Text,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf_file",
            Self::TextFile => "text_file",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Docx => "docx",
            Self::Mdx => "mdx",
            Self::Directory => "directory",
            Self::Website => "website",
            Self::Text => "text",
        }
    }

    /// Infer the type of a source from its shape.
    ///
    /// URLs are websites, existing directories are directories, known file
    /// extensions map to their types and anything else is raw text.
    pub fn detect(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            return Self::Website;
        }

        let path = Path::new(source);
        if path.is_dir() {
            return Self::Directory;
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Self::Pdf,
            Some("txt") => Self::TextFile,
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            Some("xml") => Self::Xml,
            Some("docx") => Self::Docx,
            Some("md") | Some("mdx") => Self::Mdx,
            _ => Self::Text,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Engine(format!("Unknown data type: '{}'", s)))
    }
}
