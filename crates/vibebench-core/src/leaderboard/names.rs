//! Display names for model ids
//!
//! Both renderers use [`shorten_model_name`], so a model reads the same in
//! the Markdown matrix headers and in the PDF table.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

/// Suffixes removed from the end of a model name, repeatedly
pub const STRIPPED_SUFFIXES: [&str; 3] = [":free", "-latest", "-preview"];

static SUFFIX_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn suffix_regex() -> Option<&'static Regex> {
    SUFFIX_RE
        .get_or_init(|| {
            let alternatives: Vec<String> =
                STRIPPED_SUFFIXES.iter().map(|s| regex::escape(s)).collect();
            match Regex::new(&format!("(?:{})$", alternatives.join("|"))) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(error = %e, "Failed to compile model suffix regex");
                    None
                }
            }
        })
        .as_ref()
}

/// Shorten a model id for display.
///
/// Drops the organization prefix (everything up to the last `/`), then
/// strips any trailing [`STRIPPED_SUFFIXES`] until none remain. The result
/// is never empty: an id ending in `/` is returned unchanged, and a suffix
/// that is the whole remaining name is kept.
pub fn shorten_model_name(model: &str) -> String {
    let base = match model.rsplit('/').next() {
        Some(base) if !base.is_empty() => base,
        _ => return model.to_string(),
    };

    let Some(re) = suffix_regex() else {
        return base.to_string();
    };

    let mut name = base;
    while let Some(m) = re.find(name) {
        if m.start() == 0 {
            break;
        }
        name = &name[..m.start()];
    }
    name.to_string()
}
