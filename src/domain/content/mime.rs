//! Content kind and MIME hint value objects

use std::fmt;
use std::path::Path;

/// Best-effort MIME type for binary content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MimeHint {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
    Tiff,
    Pdf,
    Zip,
    Gzip,
    Mp3,
    Mp4,
    Wasm,
    #[default]
    OctetStream,
}

impl MimeHint {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Pdf => "application/pdf",
            Self::Zip => "application/zip",
            Self::Gzip => "application/gzip",
            Self::Mp3 => "audio/mpeg",
            Self::Mp4 => "video/mp4",
            Self::Wasm => "application/wasm",
            Self::OctetStream => "application/octet-stream",
        }
    }

    /// Detect from leading magic bytes
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        const SIGNATURES: &[(&[u8], MimeHint)] = &[
            (b"\x89PNG\r\n\x1a\n", MimeHint::Png),
            (b"\xff\xd8\xff", MimeHint::Jpeg),
            (b"GIF87a", MimeHint::Gif),
            (b"GIF89a", MimeHint::Gif),
            (b"BM", MimeHint::Bmp),
            (b"II*\x00", MimeHint::Tiff),
            (b"MM\x00*", MimeHint::Tiff),
            (b"%PDF-", MimeHint::Pdf),
            (b"PK\x03\x04", MimeHint::Zip),
            (b"\x1f\x8b", MimeHint::Gzip),
            (b"ID3", MimeHint::Mp3),
            (b"\x00asm", MimeHint::Wasm),
        ];

        if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }
        if bytes.len() >= 8 && &bytes[4..8] == b"ftyp" {
            return Some(Self::Mp4);
        }

        SIGNATURES
            .iter()
            .find(|(magic, _)| bytes.starts_with(magic))
            .map(|(_, hint)| *hint)
    }

    /// Guess from a file extension (case-insensitive)
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "pdf" => Some(Self::Pdf),
            "zip" | "jar" => Some(Self::Zip),
            "gz" | "tgz" => Some(Self::Gzip),
            "mp3" => Some(Self::Mp3),
            "mp4" | "m4v" | "mov" => Some(Self::Mp4),
            "wasm" => Some(Self::Wasm),
            _ => None,
        }
    }

    /// Magic bytes first, then extension, then `application/octet-stream`
    pub fn detect(bytes: &[u8], path: Option<&Path>) -> Self {
        Self::from_magic(bytes)
            .or_else(|| path.and_then(Self::from_extension))
            .unwrap_or_default()
    }
}

impl fmt::Display for MimeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extensions treated as text when a file is too large to sniff
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "adoc", "csv", "tsv", "log", "json", "jsonl", "yaml", "yml",
    "toml", "ini", "cfg", "conf", "xml", "html", "htm", "css", "scss", "js", "mjs", "ts", "tsx",
    "jsx", "rs", "go", "py", "rb", "java", "kt", "c", "h", "cc", "cpp", "hpp", "cs", "swift",
    "sh", "bash", "zsh", "fish", "sql", "tex", "svg", "lua", "pl", "php", "r", "el", "vim",
];

/// Check whether a path has a well-known text extension
pub fn has_text_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Result of classifying an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// UTF-8 text
    Text,
    /// Anything else, with a best-effort MIME type
    Binary(MimeHint),
}

impl ContentKind {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Binary(mime) => write!(f, "binary ({})", mime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_detects_common_formats() {
        assert_eq!(MimeHint::from_magic(b"\x89PNG\r\n\x1a\n...."), Some(MimeHint::Png));
        assert_eq!(MimeHint::from_magic(b"%PDF-1.7\n"), Some(MimeHint::Pdf));
        assert_eq!(MimeHint::from_magic(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some(MimeHint::Webp));
        assert_eq!(MimeHint::from_magic(b"\x00\x00\x00\x18ftypmp42"), Some(MimeHint::Mp4));
        assert_eq!(MimeHint::from_magic(b"\x00\x01\x02"), None);
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(MimeHint::from_extension(Path::new("a/B.JPG")), Some(MimeHint::Jpeg));
        assert_eq!(MimeHint::from_extension(Path::new("noext")), None);
    }

    #[test]
    fn detect_falls_back_to_octet_stream() {
        let hint = MimeHint::detect(b"\x00\x01", Some(Path::new("blob.bin")));
        assert_eq!(hint, MimeHint::OctetStream);
        assert_eq!(hint.as_str(), "application/octet-stream");
    }

    #[test]
    fn detect_prefers_magic_over_extension() {
        let hint = MimeHint::detect(b"%PDF-1.4", Some(Path::new("misnamed.png")));
        assert_eq!(hint, MimeHint::Pdf);
    }

    #[test]
    fn text_extensions() {
        assert!(has_text_extension(Path::new("notes.MD")));
        assert!(has_text_extension(Path::new("src/main.rs")));
        assert!(!has_text_extension(Path::new("photo.png")));
        assert!(!has_text_extension(Path::new("Makefile")));
    }

    #[test]
    fn content_kind_display() {
        assert_eq!(ContentKind::Text.to_string(), "text");
        assert_eq!(
            ContentKind::Binary(MimeHint::Png).to_string(),
            "binary (image/png)"
        );
    }
}
