//! Mdx core: structure-preserving HTML to Markdown transcoding.
mod pipeline;
mod postprocess;
mod quote;
mod shield;
mod vault;

pub use pipeline::{Converter, Transcoder};
pub use postprocess::{fold_non_breaking_spaces, normalize_code_fences};
pub use quote::{encode_line_breaks, expand_line_breaks, LINE_BREAK_MARKER};
pub use shield::{mask_entities, mask_markup, MARKUP_ORDER};
pub use vault::{extract, restore, restore_within, Category, Ledger, ShieldStack};
