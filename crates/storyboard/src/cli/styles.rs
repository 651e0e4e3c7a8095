//! Styles command handler.

use storyboard::{ArtStyle, Resolution};
use strum::IntoEnumIterator;

/// Prints the resolution tiers and art styles panels can be rendered in.
pub fn styles_command() {
    print!("{}", render_catalog());
}

fn render_catalog() -> String {
    let resolutions: Vec<String> = Resolution::iter().map(|r| r.to_string()).collect();
    let mut catalog = format!("Resolutions: {}\n\nStyles:\n", resolutions.join(", "));
    for style in ArtStyle::iter() {
        catalog.push_str(&format!("  {:<16}{}\n", style.to_string(), style.directive()));
    }
    catalog
}
