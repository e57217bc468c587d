//! Plain-text orphan listing, shared by `alfa orphans` and the non-TTY
//! fallback of the board.
use crate::model::OrphanPin;
use std::fmt::{self, Write};

const EMPTY_LISTING: &str = "All pins assigned. No active missions.\n";

pub fn render_listing(pins: &[OrphanPin]) -> String {
    if pins.is_empty() {
        return EMPTY_LISTING.to_string();
    }
    let mut out = String::new();
    // Writing into a String cannot fail.
    write_listing(&mut out, pins).ok();
    out
}

fn write_listing(out: &mut impl Write, pins: &[OrphanPin]) -> fmt::Result {
    writeln!(out, "orphan pins: {}", pins.len())?;
    for pin in pins {
        writeln!(out)?;
        writeln!(out, "{}", pin.display_title())?;
        writeln!(out, "  PIN_ID: {}", pin.pin_id)?;
        writeln!(out, "  created: {}", pin.created_at)?;
        if let Some(description) = pin
            .description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
        {
            writeln!(out, "  {}", super::format::single_line(description))?;
        }
        if !pin.image_url.is_empty() {
            writeln!(out, "  image: {}", pin.image_url)?;
        }
    }
    Ok(())
}
