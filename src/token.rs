//! Reference tokenizer.
//!
//! Extracts the lozenge-prefixed reference under the cursor from one line
//! of template text.  Three surface forms are recognized, tried in a fixed
//! priority order:
//!
//!   1. `◊(name.with.dots)` — parenthesized, dotted segments allowed
//!   2. `◊name: argument`   — colon form; the argument is not part of the token
//!   3. `◊name` / `◊name{...}` — bare form
//!
//! The bare form matches a strict superset of the colon form and must be
//! tried last, or it would shadow it.  For each pattern every non-overlapping
//! match on the line is checked for cursor containment before the next
//! pattern is tried.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ReferenceForm, ReferenceToken};

static PAREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"◊\(([A-Za-z_][A-Za-z0-9_-]*(?:\.[A-Za-z_][A-Za-z0-9_-]*)*)\)")
        .expect("valid regex")
});

static COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"◊([A-Za-z_][A-Za-z0-9_-]*)\s*:").expect("valid regex"));

static BARE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"◊([A-Za-z_][A-Za-z0-9_-]*)").expect("valid regex"));

/// Extract the reference under the cursor, or `None` when no pattern's
/// match contains the cursor column.
///
/// `cursor` is a column offset in Unicode scalar values.  LSP positions are
/// UTF-16 code units; the two agree for the marker (a BMP code point) and
/// the ASCII identifier class, which is sufficient for reference spans.
/// Containment is inclusive at both span edges, so a cursor sitting right
/// after the last character still resolves.
pub fn extract_reference(line: &str, cursor: u32) -> Option<ReferenceToken> {
    let patterns: [(&Regex, ReferenceForm); 3] = [
        (&*PAREN, ReferenceForm::Parenthesized),
        (&*COLON, ReferenceForm::Colon),
        (&*BARE, ReferenceForm::Bare),
    ];

    for (pattern, form) in patterns {
        for caps in pattern.captures_iter(line) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            // The span covers the marker through the closing paren for the
            // parenthesized form, and the marker through the identifier for
            // the other two (the `:` and the argument stay outside).
            let span_end = match form {
                ReferenceForm::Parenthesized => whole.end(),
                ReferenceForm::Colon | ReferenceForm::Bare => name.end(),
            };

            let start = char_column(line, whole.start());
            let end = char_column(line, span_end);

            if start <= cursor && cursor <= end {
                return Some(ReferenceToken {
                    name: name.as_str().to_string(),
                    form,
                    start,
                    end,
                });
            }
        }
    }

    None
}

/// Column (in Unicode scalar values) of the given byte offset within `line`.
pub(crate) fn char_column(line: &str, byte_offset: usize) -> u32 {
    line[..byte_offset].chars().count() as u32
}
