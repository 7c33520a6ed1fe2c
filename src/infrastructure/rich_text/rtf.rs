//! In-process markdown to RTF renderer
//!
//! Walks pulldown-cmark events and writes RTF 1.x control words. Covers the
//! CommonMark block and inline elements plus GFM strikethrough, tables and
//! task lists; anything else degrades to its plain text.

use async_trait::async_trait;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::application::ports::{ConversionError, RichTextRenderer};

const HEADER: &str = "{\\rtf1\\ansi\\ansicpg1252\\uc1\\deff0\
{\\fonttbl{\\f0\\fswiss Helvetica;}{\\f1\\fmodern Courier;}}\
\\f0\\fs24\n";

/// Left indent per nesting level, in twips
const INDENT_STEP: u32 = 360;

/// Renders markdown to RTF without external tools
pub struct BuiltinRtfRenderer;

impl BuiltinRtfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuiltinRtfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RichTextRenderer for BuiltinRtfRenderer {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn render(&self, markdown: &str) -> Result<Vec<u8>, ConversionError> {
        Ok(markdown_to_rtf(markdown).into_bytes())
    }
}

/// Render markdown into a complete RTF document.
pub fn markdown_to_rtf(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = RtfWriter::new();
    for event in Parser::new_ext(markdown, options) {
        writer.event(event);
    }
    writer.finish()
}

/// Open element, popped on the matching end event
enum Frame {
    Paragraph,
    Heading,
    BlockQuote,
    CodeBlock,
    List { next: Option<u64> },
    Item,
    Table,
    TableHead,
    TableRow,
    TableCell,
    /// Closes with a single `}`
    Group,
    /// Closes a HYPERLINK field
    Link,
    Transparent,
}

struct RtfWriter {
    out: String,
    stack: Vec<Frame>,
    /// A `\pard` has been written without its closing `\par`
    line_open: bool,
    /// The current item marker was written and its first paragraph continues it
    item_pending: bool,
    cell_index: usize,
    pending_breaks: usize,
}

impl RtfWriter {
    fn new() -> Self {
        Self {
            out: String::from(HEADER),
            stack: Vec::new(),
            line_open: false,
            item_pending: false,
            cell_index: 0,
            pending_breaks: 0,
        }
    }

    fn finish(mut self) -> String {
        self.close_line();
        self.out.push('}');
        self.out
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if self.in_code_block() {
                    self.code_text(&text);
                } else {
                    self.text(&text);
                }
            }
            Event::Code(code) => {
                self.ensure_line();
                self.out.push_str("{\\f1 ");
                escape_into(&mut self.out, &code);
                self.out.push('}');
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => {
                self.ensure_line();
                self.out.push_str("\\line ");
            }
            Event::Rule => {
                self.close_line();
                self.out.push_str("\\pard\\brdrb\\brdrs\\brdrw10\\brsp20 \\par\n");
            }
            Event::TaskListMarker(done) => self.text(if done { "[x] " } else { "[ ] " }),
            Event::FootnoteReference(name) => {
                self.ensure_line();
                self.out.push_str("{\\super ");
                escape_into(&mut self.out, &name);
                self.out.push('}');
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                if self.item_pending {
                    self.item_pending = false;
                } else {
                    self.open_line("");
                }
                Frame::Paragraph
            }
            Tag::Heading { level, .. } => {
                self.open_line("\\sb240\\sa120");
                self.out.push_str(&format!("{{\\b\\fs{} ", heading_size(level)));
                Frame::Heading
            }
            Tag::BlockQuote(_) => {
                self.close_line();
                Frame::BlockQuote
            }
            Tag::CodeBlock(kind) => {
                if let CodeBlockKind::Fenced(lang) = &kind {
                    tracing::trace!(lang = %lang, "rendering fenced code block");
                }
                self.open_line("");
                self.out.push_str("{\\f1 ");
                self.pending_breaks = 0;
                Frame::CodeBlock
            }
            Tag::List(start) => {
                self.close_line();
                self.item_pending = false;
                Frame::List { next: start }
            }
            Tag::Item => {
                let marker = self.next_marker();
                let depth = self.depth();
                self.close_line();
                self.out.push_str(&format!(
                    "\\pard\\li{}\\fi-{} ",
                    depth * INDENT_STEP,
                    INDENT_STEP
                ));
                self.out.push_str(&marker);
                self.out.push_str("\\tab ");
                self.line_open = true;
                self.item_pending = true;
                Frame::Item
            }
            Tag::Table(_) => {
                self.close_line();
                Frame::Table
            }
            Tag::TableHead => {
                self.cell_index = 0;
                self.open_line("");
                self.out.push_str("{\\b ");
                Frame::TableHead
            }
            Tag::TableRow => {
                self.cell_index = 0;
                self.open_line("");
                Frame::TableRow
            }
            Tag::TableCell => {
                if self.cell_index > 0 {
                    self.out.push_str("\\tab ");
                }
                self.cell_index += 1;
                Frame::TableCell
            }
            Tag::Emphasis => self.group("{\\i "),
            Tag::Strong => self.group("{\\b "),
            Tag::Strikethrough => self.group("{\\strike "),
            Tag::Link { dest_url, .. } => {
                self.ensure_line();
                self.out.push_str("{\\field{\\*\\fldinst{HYPERLINK \"");
                escape_into(&mut self.out, &dest_url);
                self.out.push_str("\"}}{\\fldrslt{\\ul ");
                Frame::Link
            }
            _ => Frame::Transparent,
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame {
            Frame::Paragraph | Frame::TableRow | Frame::Item => self.close_line(),
            Frame::Heading | Frame::CodeBlock | Frame::TableHead => {
                self.out.push('}');
                self.close_line();
            }
            Frame::BlockQuote | Frame::List { .. } | Frame::Table => self.close_line(),
            Frame::Group => self.out.push('}'),
            Frame::Link => self.out.push_str("}}}"),
            Frame::TableCell | Frame::Transparent => {}
        }
    }

    fn group(&mut self, opener: &str) -> Frame {
        self.ensure_line();
        self.out.push_str(opener);
        Frame::Group
    }

    fn text(&mut self, text: &str) {
        self.ensure_line();
        escape_into(&mut self.out, text);
    }

    /// Code block text may arrive one line per event; the final newline is dropped
    fn code_text(&mut self, text: &str) {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.pending_breaks += 1;
            }
            if line.is_empty() {
                continue;
            }
            for _ in 0..self.pending_breaks {
                self.out.push_str("\\line ");
            }
            self.pending_breaks = 0;
            escape_into(&mut self.out, line);
        }
    }

    /// Start a paragraph indented for the current nesting depth
    fn open_line(&mut self, extra: &str) {
        self.close_line();
        let indent = self.depth() * INDENT_STEP;
        if indent > 0 {
            self.out.push_str(&format!("\\pard\\li{}{} ", indent, extra));
        } else {
            self.out.push_str(&format!("\\pard{} ", extra));
        }
        self.line_open = true;
    }

    fn ensure_line(&mut self) {
        if !self.line_open {
            self.open_line("");
        }
    }

    fn close_line(&mut self) {
        if self.line_open {
            self.out.push_str("\\par\n");
            self.line_open = false;
        }
        self.item_pending = false;
    }

    /// Nesting depth from open block quotes and lists
    fn depth(&self) -> u32 {
        self.stack
            .iter()
            .filter(|f| matches!(f, Frame::BlockQuote | Frame::List { .. }))
            .count() as u32
    }

    fn in_code_block(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::CodeBlock))
    }

    fn next_marker(&mut self) -> String {
        let list = self
            .stack
            .iter_mut()
            .rev()
            .find(|f| matches!(f, Frame::List { .. }));
        match list {
            Some(Frame::List { next: Some(n) }) => {
                let marker = format!("{}.", n);
                *n += 1;
                marker
            }
            _ => "\\bullet".to_string(),
        }
    }
}

/// Font size in half-points
fn heading_size(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 36,
        HeadingLevel::H2 => 32,
        HeadingLevel::H3 => 28,
        HeadingLevel::H4 => 26,
        HeadingLevel::H5 | HeadingLevel::H6 => 24,
    }
}

/// Append `text` with RTF escaping.
///
/// Backslash and braces are escaped; characters outside printable ASCII are
/// written as `\uN?` with N the signed UTF-16 code unit.
fn escape_into(out: &mut String, text: &str) {
    let mut units = [0u16; 2];
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\t' => out.push_str("\\tab "),
            '\n' | '\r' => out.push(' '),
            ' '..='~' => out.push(c),
            _ if c.is_control() => {}
            _ => {
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
}
