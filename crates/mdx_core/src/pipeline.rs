use engine_logging::engine_trace;

use crate::postprocess::{fold_non_breaking_spaces, normalize_code_fences};
use crate::quote::{encode_line_breaks, expand_line_breaks};
use crate::shield::{mask_entities, mask_markup};
use crate::vault::ShieldStack;

/// Generic HTML to Markdown conversion.
///
/// Implementations must treat placeholder tokens as plain text; escaping
/// their underscores is tolerated.
pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn to_markdown(&self, html: &str) -> String {
        (**self).to_markdown(html)
    }
}

/// Runs a converter with the entity, markup and blockquote shields around it.
///
/// Holds no per-call state, so the same input always yields the same output.
#[derive(Debug, Default, Clone)]
pub struct Transcoder<C> {
    converter: C,
}

impl<C: Converter> Transcoder<C> {
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    pub fn transcode(&self, html: &str) -> String {
        let mut stack = ShieldStack::new();
        let masked = mask_entities(html, &mut stack);
        let masked = mask_markup(&masked, &mut stack);
        let prepared = encode_line_breaks(&masked);

        let markdown = self.converter.to_markdown(&prepared);

        let markdown = expand_line_breaks(&markdown);
        let markdown = stack.restore(&markdown);
        let markdown = normalize_code_fences(&markdown);
        let markdown = fold_non_breaking_spaces(&markdown);

        engine_trace!(
            "transcoded html_len={} markdown_len={} shielded={}",
            html.len(),
            markdown.len(),
            stack.captured()
        );
        markdown.trim().to_string()
    }
}
