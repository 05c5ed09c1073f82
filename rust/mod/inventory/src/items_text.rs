//! Parsing of the free-text item list on the "add box" form.
//!
//! One item per line, in any of these forms:
//!
//! ```text
//! Tent,1
//! Sleeping bag, 2
//! Camp stove x 1
//! Lantern ×3
//! Rope
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{normalize_qty, Item};

static TIMES_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?)(?:\s+[xX]|\s*×)\s*(\d+)$").expect("valid item quantity regex")
});

/// Parse a multi-line item list. Blank lines and lines without a name
/// are skipped; quantities that don't parse become 1.
pub fn parse_item_lines(text: &str) -> Vec<Item> {
    text.lines().filter_map(parse_item_line).collect()
}

fn parse_item_line(line: &str) -> Option<Item> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (name, qty) = if let Some((left, right)) = line.rsplit_once(',') {
        (left.trim(), normalize_qty(right))
    } else if let Some(caps) = TIMES_SUFFIX.captures(line) {
        (
            caps.get(1).map_or("", |m| m.as_str()).trim(),
            normalize_qty(caps.get(2).map_or("", |m| m.as_str())),
        )
    } else {
        (line, 1)
    };

    if name.is_empty() {
        return None;
    }
    Some(Item::new(name, qty))
}
