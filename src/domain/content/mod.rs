//! Clipboard content domain module

mod mime;
mod payload;
mod source;

pub use mime::{has_text_extension, ContentKind, MimeHint};
pub use payload::{ClipboardPayload, FileList, RichText, RTF_HEADER};
pub use source::{PeekableStream, SourceInput};
