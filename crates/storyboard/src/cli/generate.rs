//! Generate command handler.

use super::studio::{Studio, analyze_file};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use storyboard::{
    ArtStyle, ImageRef, IoError, Resolution, SceneOutcome, Storyboard, StoryboardResult,
};
use tracing::{info, warn};

/// Analyzes the script, renders panels and writes them to `out`.
///
/// `scene` selects a single panel by its 1-based position; otherwise every
/// panel is rendered in order.
pub async fn generate_command(
    studio: &Studio,
    script: &Path,
    out: &Path,
    resolution: Option<Resolution>,
    style: Option<ArtStyle>,
    scene: Option<u32>,
) -> StoryboardResult<()> {
    let generator = analyze_file(studio, script).await?;
    if let Some(resolution) = resolution {
        generator.set_resolution(resolution);
    }
    if let Some(style) = style {
        generator.set_style(style);
    }

    match scene {
        Some(position) => {
            let outcome = match scene_index(position) {
                Some(index) => generator.generate_one(index).await,
                None => SceneOutcome::NotFound,
            };
            println!("Scene {}: {}", position, outcome);
        }
        None => {
            if let Some(report) = generator.generate_all().await {
                println!(
                    "Rendered {} of {} panels",
                    report.succeeded(),
                    report.attempted()
                );
            }
        }
    }

    tokio::fs::create_dir_all(out)
        .await
        .map_err(|e| IoError::new(format!("{}: {}", out.display(), e)))?;

    let storyboard = generator.snapshot();
    for (index, name) in panel_file_names(&storyboard) {
        let Some(image) = storyboard.get(index).and_then(|scene| scene.generated_image().as_ref())
        else {
            continue;
        };
        let path = write_panel(image, &out.join(name)).await?;
        println!("{}", path.display());
    }

    Ok(())
}

/// Storyboard index for a 1-based position; position 0 names no scene.
pub fn scene_index(position: u32) -> Option<usize> {
    position.checked_sub(1).map(|index| index as usize)
}

/// File names for every scene that has an image, keyed by index.
///
/// Panels are named `scene-<n>.<ext>` after their sequence number. A number
/// already used by an earlier panel gets its position appended instead.
pub fn panel_file_names(storyboard: &Storyboard) -> Vec<(usize, String)> {
    let mut used = HashSet::new();
    storyboard
        .iter()
        .enumerate()
        .filter_map(|(index, scene)| {
            let image = scene.generated_image().as_ref()?;
            let mut name = format!("scene-{}.{}", scene.sequence_number(), image.extension());
            if !used.insert(name.clone()) {
                let renamed = format!(
                    "scene-{}-{}.{}",
                    scene.sequence_number(),
                    index + 1,
                    image.extension()
                );
                warn!(taken = %name, %renamed, "Duplicate scene number");
                name = renamed;
                used.insert(name.clone());
            }
            Some((index, name))
        })
        .collect()
}

async fn write_panel(image: &ImageRef, path: &Path) -> StoryboardResult<PathBuf> {
    tokio::fs::write(path, image.decode()?)
        .await
        .map_err(|e| IoError::new(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Panel written");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyboard::Scene;

    fn rendered(number: u32, mime_type: &str) -> Scene {
        let mut scene = Scene::new(number, "Beat.", "Rooftops at night.");
        scene.finish_generation(Some(ImageRef::new(mime_type, "AAAA")));
        scene
    }

    #[test]
    fn positions_start_at_one() {
        assert_eq!(scene_index(0), None);
        assert_eq!(scene_index(1), Some(0));
        assert_eq!(scene_index(3), Some(2));
    }

    #[test]
    fn panels_are_named_by_sequence_number() {
        let storyboard = Storyboard::new(vec![
            rendered(7, "image/jpeg"),
            Scene::new(8, "Unrendered.", "Empty street."),
            rendered(9, "image/png"),
        ]);

        assert_eq!(
            panel_file_names(&storyboard),
            vec![(0, "scene-7.jpg".to_string()), (2, "scene-9.png".to_string())]
        );
    }

    #[test]
    fn repeated_sequence_numbers_do_not_share_a_file() {
        let storyboard = Storyboard::new(vec![
            rendered(1, "image/png"),
            rendered(1, "image/png"),
            rendered(2, "image/png"),
        ]);

        let names: Vec<String> = panel_file_names(&storyboard)
            .into_iter()
            .map(|(_, name)| name)
            .collect();

        assert_eq!(names, vec!["scene-1.png", "scene-1-2.png", "scene-2.png"]);
    }

    #[tokio::test]
    async fn panel_bytes_are_decoded() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let image = ImageRef::new("image/png", "aGVsbG8=");

        let path = write_panel(&image, &dir.path().join("scene-1.png")).await?;

        assert_eq!(path, dir.path().join("scene-1.png"));
        assert_eq!(std::fs::read(path)?, b"hello");
        Ok(())
    }
}
