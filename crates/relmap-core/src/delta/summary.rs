//! Human-readable summary renderers for delta results.
//!
//! The summaries are intended for review workflows and diagnostic logs.
//! They are informational only and do not affect the structured deltas.

use crate::delta::bidi::BidiMapDelta;
use crate::delta::map::MapDelta;
use crate::delta::set::SetDelta;
use crate::model::BidiMap;

/// Maximum number of entries listed per bucket before eliding.
const MAX_LISTED: usize = 16;

/// Render a Markdown summary of a [`MapDelta`].
pub fn render_map_summary(delta: &MapDelta) -> String {
    let mut out = String::new();
    out.push_str("## Map Delta\n\n");

    if delta.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    match delta.added() {
        None => out.push_str("### Added\n\n_Not tracked._\n\n"),
        Some(added) if added.is_empty() => {}
        Some(added) => {
            out.push_str(&format!("### Added ({})\n\n", added.len()));
            let mut keys: Vec<_> = added.keys().collect();
            keys.sort();
            for key in keys.iter().take(MAX_LISTED) {
                out.push_str(&format!("- `{}` = `{}`\n", key, added[key.as_str()]));
            }
            elide(&mut out, keys.len());
            out.push('\n');
        }
    }

    match delta.changed() {
        None => out.push_str("### Changed\n\n_Not tracked._\n\n"),
        Some(changed) if changed.is_empty() => {}
        Some(changed) => {
            out.push_str(&format!("### Changed ({})\n\n", changed.len()));
            let mut keys: Vec<_> = changed.keys().collect();
            keys.sort();
            for key in keys.iter().take(MAX_LISTED) {
                let pair = &changed[key.as_str()];
                out.push_str(&format!(
                    "- `{}`: `{}` -> `{}`\n",
                    key, pair.initial_value, pair.final_value
                ));
            }
            elide(&mut out, keys.len());
            out.push('\n');
        }
    }

    match delta.removed() {
        None => out.push_str("### Removed\n\n_Not tracked._\n\n"),
        Some(removed) if removed.is_empty() => {}
        Some(removed) => {
            out.push_str(&format!("### Removed ({})\n\n", removed.len()));
            let mut keys: Vec<_> = removed.keys().collect();
            keys.sort();
            for key in keys.iter().take(MAX_LISTED) {
                out.push_str(&format!("- `{}` = `{}`\n", key, removed[key.as_str()]));
            }
            elide(&mut out, keys.len());
            out.push('\n');
        }
    }

    if let Some(still) = delta.still() {
        out.push_str(&format!("_{} entries unchanged._\n", still.len()));
    }

    out
}

/// Render a Markdown summary of a [`SetDelta`].
pub fn render_set_summary(delta: &SetDelta) -> String {
    let mut out = String::new();
    out.push_str("## Set Delta\n\n");

    if delta.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    set_section(&mut out, "Added", delta.added().map(|s| s.iter()));
    set_section(&mut out, "Removed", delta.removed().map(|s| s.iter()));

    if let Some(still) = delta.still() {
        out.push_str(&format!("_{} elements unchanged._\n", still.len()));
    }

    out
}

/// Render a Markdown summary of a [`BidiMapDelta`].
pub fn render_bidi_summary(delta: &BidiMapDelta) -> String {
    let mut out = String::new();
    out.push_str("## Relation Delta\n\n");

    if delta.is_unchanged() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    bidi_section(&mut out, "Added", delta.added());
    bidi_section(&mut out, "Removed", delta.removed());

    if let Some(still) = delta.still() {
        out.push_str(&format!("_{} pairs unchanged._\n", still.pair_count()));
    }

    out
}

fn set_section<'a>(
    out: &mut String,
    label: &str,
    elements: Option<impl Iterator<Item = &'a String>>,
) {
    match elements {
        None => out.push_str(&format!("### {}\n\n_Not tracked._\n\n", label)),
        Some(elements) => {
            let mut sorted: Vec<_> = elements.collect();
            if sorted.is_empty() {
                return;
            }
            sorted.sort();
            out.push_str(&format!("### {} ({})\n\n", label, sorted.len()));
            for element in sorted.iter().take(MAX_LISTED) {
                out.push_str(&format!("- `{}`\n", element));
            }
            elide(out, sorted.len());
            out.push('\n');
        }
    }
}

fn bidi_section(out: &mut String, label: &str, bucket: Option<&BidiMap>) {
    match bucket {
        None => out.push_str(&format!("### {}\n\n_Not tracked._\n\n", label)),
        Some(map) if map.is_empty() => {}
        Some(map) => {
            out.push_str(&format!(
                "### {} ({} pairs, {} holders)\n\n",
                label,
                map.pair_count(),
                map.holder_count()
            ));
            let mut listed = 0;
            'holders: for holder in map.holders() {
                let Some(held) = map.held_of(holder) else {
                    continue;
                };
                for element in held {
                    if listed == MAX_LISTED {
                        break 'holders;
                    }
                    out.push_str(&format!("- `{}` -> `{}`\n", holder, element));
                    listed += 1;
                }
            }
            elide(out, map.pair_count());
            out.push('\n');
        }
    }
}

fn elide(out: &mut String, total: usize) {
    if total > MAX_LISTED {
        out.push_str(&format!("- ... and {} more\n", total - MAX_LISTED));
    }
}
