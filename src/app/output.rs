//! Terminal output of the rendered view.

use std::io::{self, Write};

use colored::*;
use strum::IntoEnumIterator;

use crate::config::{ALL_REGIONS_LABEL, LOADING_TEXT};
use crate::region::Region;
use crate::view::{controls_line, RenderedView, ViewBody};

/// Writes `view` to `out`, highlighting the error banner and card names.
///
/// Colors follow `colored`'s global switch, so redirected output stays plain
/// when `NO_COLOR` is set or stdout is not a terminal.
pub fn print_view<W: Write>(out: &mut W, view: &RenderedView) -> io::Result<()> {
    if let Some(banner) = &view.error_banner {
        writeln!(out, "{}", format!(" {} ", banner).black().on_cyan())?;
    }
    match &view.body {
        ViewBody::Loading => writeln!(out, "{}", LOADING_TEXT.dimmed())?,
        ViewBody::Countries {
            search_text,
            region,
            cards,
        } => {
            writeln!(out, "{}", controls_line(search_text, *region))?;
            writeln!(out, "{} countries", cards.len())?;
            for card in cards {
                writeln!(out, "- {}", card.title().bold())?;
                for detail in card.details() {
                    writeln!(out, "    {}", detail)?;
                }
            }
        }
    }
    out.flush()
}

/// Writes the region choices, `All Regions` first.
pub fn print_regions<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "  {}", ALL_REGIONS_LABEL)?;
    for region in Region::iter() {
        writeln!(out, "  {}", region)?;
    }
    out.flush()
}
