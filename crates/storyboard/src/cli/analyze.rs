//! Analyze command handler.

use super::studio::{Studio, analyze_file};
use std::path::Path;
use storyboard::{JsonError, Storyboard, StoryboardResult};

/// Analyzes the script and prints its scenes.
pub async fn analyze_command(studio: &Studio, script: &Path, json: bool) -> StoryboardResult<()> {
    let storyboard = analyze_file(studio, script).await?.snapshot();

    if json {
        let rendered = serde_json::to_string_pretty(&storyboard)
            .map_err(|e| JsonError::new(e.to_string()))?;
        println!("{rendered}");
    } else {
        print!("{}", render_scenes(&storyboard));
    }

    Ok(())
}

/// Human-readable scene listing.
pub fn render_scenes(storyboard: &Storyboard) -> String {
    storyboard
        .iter()
        .map(|scene| {
            format!(
                "Scene {}: {}\n  Prompt: {}\n",
                scene.sequence_number(),
                scene.narrative_description(),
                scene.visual_prompt()
            )
        })
        .collect()
}
