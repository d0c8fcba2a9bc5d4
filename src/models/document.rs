use std::path::Path;

/// How the viewer should treat a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Markdown,
    Script,
    /// Known-binary formats; presented as a terminal "not supported" state.
    Unsupported,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Self {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return Self::PlainText,
        };
        match ext.as_str() {
            "md" | "markdown" => Self::Markdown,
            "py" => Self::Script,
            "pdf" | "png" | "jpg" | "jpeg" | "gif" => Self::Unsupported,
            _ => Self::PlainText,
        }
    }

    /// Whether the markdown preview host applies to this document.
    pub fn is_previewable(self) -> bool {
        matches!(self, Self::Markdown)
    }
}
