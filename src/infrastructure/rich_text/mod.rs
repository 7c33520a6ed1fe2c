//! Markdown to rich text renderers

mod pandoc;
mod rtf;

pub use pandoc::PandocRenderer;
pub use rtf::{markdown_to_rtf, BuiltinRtfRenderer};

use crate::application::ports::RichTextRenderer;
use crate::domain::config::RendererPreference;

/// Create the renderer for the given preference
pub fn create_renderer(preference: RendererPreference) -> Box<dyn RichTextRenderer> {
    match preference {
        RendererPreference::Builtin => Box::new(BuiltinRtfRenderer::new()),
        RendererPreference::Pandoc => Box::new(PandocRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_honours_preference() {
        assert_eq!(create_renderer(RendererPreference::Builtin).name(), "builtin");
        assert_eq!(create_renderer(RendererPreference::Pandoc).name(), "pandoc");
    }
}
