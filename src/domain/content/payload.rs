//! Clipboard payload value objects

use std::fmt;
use std::path::{Path, PathBuf};

#[cfg(not(unix))]
use percent_encoding::utf8_percent_encode;
#[cfg(unix)]
use percent_encoding::percent_encode;
use percent_encoding::{percent_decode_str, AsciiSet, NON_ALPHANUMERIC};

use super::MimeHint;
use crate::domain::error::NonUnicodePath;

/// Every RTF document starts with this token
pub const RTF_HEADER: &[u8] = b"{\\rtf1";

/// Ordered, non-empty list of absolute file paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileList {
    paths: Vec<PathBuf>,
}

impl FileList {
    /// Create a file list. Returns `None` when empty or when a path is relative.
    pub fn new(paths: Vec<PathBuf>) -> Option<Self> {
        if paths.is_empty() || paths.iter().any(|p| !p.is_absolute()) {
            return None;
        }
        Some(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths as plain strings (macOS / Windows clipboard encoding).
    /// Fails on the first path that is not valid Unicode.
    pub fn to_path_strings(&self) -> Result<Vec<String>, NonUnicodePath> {
        self.paths
            .iter()
            .map(|p| {
                p.to_str()
                    .map(str::to_string)
                    .ok_or_else(|| NonUnicodePath(p.clone()))
            })
            .collect()
    }

    /// `file://` URIs (X11 / Wayland clipboard encoding)
    pub fn to_uris(&self) -> Result<Vec<String>, NonUnicodePath> {
        self.paths.iter().map(|p| path_to_uri(p)).collect()
    }

    /// `text/uri-list` body, CRLF separated as RFC 2483 asks
    pub fn to_uri_list(&self) -> Result<String, NonUnicodePath> {
        let mut out = self.to_uris()?.join("\r\n");
        out.push_str("\r\n");
        Ok(out)
    }

    /// Parse a `text/uri-list` body or a newline-separated list of paths.
    /// Comment lines and non-file URIs are skipped.
    pub fn from_uri_list(body: &str) -> Option<Self> {
        let paths = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(uri_to_path)
            .collect();
        Self::new(paths)
    }
}

/// Bytes left unescaped in `file://` URI paths
const URI_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b':')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Unix file names are raw bytes, so every path has a URI
#[cfg(unix)]
fn path_to_uri(path: &Path) -> Result<String, NonUnicodePath> {
    use std::os::unix::ffi::OsStrExt;

    Ok(format!(
        "file://{}",
        percent_encode(path.as_os_str().as_bytes(), URI_PATH)
    ))
}

#[cfg(not(unix))]
fn path_to_uri(path: &Path) -> Result<String, NonUnicodePath> {
    let raw = path
        .to_str()
        .ok_or_else(|| NonUnicodePath(path.to_path_buf()))?
        .replace('\\', "/");
    // Drive-letter paths get an empty authority: file:///C:/dir
    let authority = if raw.starts_with('/') { "file://" } else { "file:///" };
    Ok(format!("{}{}", authority, utf8_percent_encode(&raw, URI_PATH)))
}

fn uri_to_path(line: &str) -> Option<PathBuf> {
    let rest = match line.strip_prefix("file://") {
        Some(rest) => rest,
        None if Path::new(line).is_absolute() => return Some(PathBuf::from(line)),
        None => return None,
    };
    // file://hostname/path: drop the authority part
    let path = if rest.starts_with('/') {
        rest
    } else {
        &rest[rest.find('/')?..]
    };
    decode_uri_path(path)
}

#[cfg(unix)]
fn decode_uri_path(path: &str) -> Option<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let bytes: Vec<u8> = percent_decode_str(path).collect();
    Some(PathBuf::from(OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn decode_uri_path(path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(path).decode_utf8().ok()?;
    // file:///C:/dir
    if decoded.as_bytes().get(2) == Some(&b':') {
        return Some(PathBuf::from(&decoded[1..]));
    }
    Some(PathBuf::from(&*decoded))
}

/// An RTF document with its plain-text alternative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    rtf: Vec<u8>,
    plain: String,
}

impl RichText {
    pub fn new(rtf: Vec<u8>, plain: impl Into<String>) -> Self {
        Self {
            rtf,
            plain: plain.into(),
        }
    }

    pub fn rtf(&self) -> &[u8] {
        &self.rtf
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    /// Starts with the `{\rtf1` header token
    pub fn is_well_formed(&self) -> bool {
        self.rtf.starts_with(RTF_HEADER)
    }
}

/// What gets placed on (or read from) the clipboard.
/// Exactly one representation per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    Text(String),
    FileList(FileList),
    RichText(RichText),
    Binary { data: Vec<u8>, mime: MimeHint },
}

impl ClipboardPayload {
    /// Short name of the active variant
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::FileList(_) => "file list",
            Self::RichText(_) => "rich text",
            Self::Binary { .. } => "binary",
        }
    }

    /// Size in bytes of the clipboard representation
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::FileList(files) => files
                .paths()
                .iter()
                .map(|p| p.as_os_str().len() + 1)
                .sum(),
            Self::RichText(rich) => rich.rtf().len(),
            Self::Binary { data, .. } => data.len(),
        }
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

impl fmt::Display for ClipboardPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileList(files) if files.len() == 1 => {
                write!(f, "{} (1 file)", self.kind_name())
            }
            Self::FileList(files) => write!(f, "{} ({} files)", self.kind_name(), files.len()),
            Self::Binary { mime, .. } => write!(
                f,
                "{} ({}, {})",
                self.kind_name(),
                mime,
                self.human_readable_size()
            ),
            _ => write!(f, "{} ({})", self.kind_name(), self.human_readable_size()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(p: &str) -> PathBuf {
        PathBuf::from(p)
    }

    #[test]
    #[cfg(unix)]
    fn file_list_rejects_empty_and_relative() {
        assert!(FileList::new(vec![]).is_none());
        assert!(FileList::new(vec![abs("relative/file.txt")]).is_none());
        assert!(FileList::new(vec![abs("/tmp/file.txt")]).is_some());
    }

    #[test]
    #[cfg(unix)]
    fn uri_list_encodes_special_characters() {
        let files = FileList::new(vec![abs("/tmp/my file#1.txt"), abs("/tmp/ü.png")]).unwrap();
        assert_eq!(
            files.to_uris().unwrap(),
            vec![
                "file:///tmp/my%20file%231.txt".to_string(),
                "file:///tmp/%C3%BC.png".to_string()
            ]
        );
        assert!(files.to_uri_list().unwrap().ends_with("\r\n"));
    }

    #[test]
    #[cfg(unix)]
    fn uri_keeps_unreserved_characters() {
        let files = FileList::new(vec![abs("/srv/a-b_c.d~e/f:g")]).unwrap();
        assert_eq!(files.to_uris().unwrap(), vec!["file:///srv/a-b_c.d~e/f:g"]);
    }

    #[test]
    #[cfg(unix)]
    fn uri_list_parses_back() {
        let body = "# comment\r\nfile:///tmp/my%20file.txt\r\nfile://localhost/etc/hosts\r\nhttps://example.com\r\n";
        let files = FileList::from_uri_list(body).unwrap();
        assert_eq!(
            files.paths(),
            &[abs("/tmp/my file.txt"), abs("/etc/hosts")]
        );
    }

    #[test]
    #[cfg(unix)]
    fn non_utf8_file_name_survives_uri_encoding() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"/tmp/caf\xe9.txt");
        let files = FileList::new(vec![PathBuf::from(name)]).unwrap();

        let uris = files.to_uris().unwrap();
        assert_eq!(uris, vec!["file:///tmp/caf%E9.txt"]);

        let parsed = FileList::from_uri_list(&files.to_uri_list().unwrap()).unwrap();
        assert_eq!(parsed.paths()[0].as_os_str(), name);
    }

    #[test]
    #[cfg(unix)]
    fn non_utf8_file_name_is_rejected_as_plain_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = PathBuf::from(OsStr::from_bytes(b"/tmp/\xff"));
        let files = FileList::new(vec![abs("/tmp/ok"), bad.clone()]).unwrap();
        assert_eq!(files.to_path_strings(), Err(NonUnicodePath(bad)));

        let good = FileList::new(vec![abs("/tmp/ok")]).unwrap();
        assert_eq!(good.to_path_strings().unwrap(), vec!["/tmp/ok".to_string()]);
    }

    #[test]
    #[cfg(unix)]
    fn uri_list_accepts_plain_paths() {
        let files = FileList::from_uri_list("/a/b\n/c/d\n").unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn uri_list_without_files_is_none() {
        assert!(FileList::from_uri_list("").is_none());
        assert!(FileList::from_uri_list("# only a comment\n").is_none());
    }

    #[test]
    #[cfg(unix)]
    fn malformed_escapes_are_kept_literally() {
        let files = FileList::from_uri_list("file:///a%20b\nfile:///a%zz\nfile:///a%").unwrap();
        assert_eq!(
            files.paths(),
            &[abs("/a b"), abs("/a%zz"), abs("/a%")]
        );
    }

    #[test]
    fn rich_text_header_check() {
        assert!(RichText::new(b"{\\rtf1\\ansi }".to_vec(), "").is_well_formed());
        assert!(!RichText::new(b"plain".to_vec(), "plain").is_well_formed());
    }

    #[test]
    fn payload_sizes() {
        let text = ClipboardPayload::Text("hello".to_string());
        assert_eq!(text.size_bytes(), 5);
        assert_eq!(text.human_readable_size(), "5 B");
        assert_eq!(text.kind_name(), "text");

        let binary = ClipboardPayload::Binary {
            data: vec![0u8; 2048],
            mime: MimeHint::Png,
        };
        assert_eq!(binary.human_readable_size(), "2.0 KB");
        assert_eq!(binary.to_string(), "binary (image/png, 2.0 KB)");
    }
}
