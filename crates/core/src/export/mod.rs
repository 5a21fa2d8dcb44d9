//! Serialises rendered scenes as standalone SVG documents.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{render::RenderedScene, DemoError, Result};

/// Where and how animation frames are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    pub output_dir: PathBuf,
    pub file_prefix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("frames"),
            file_prefix: "frame".to_string(),
        }
    }
}

/// Writes a numbered SVG file per rendered frame.
#[derive(Debug, Default)]
pub struct FrameExporter {
    settings: ExportSettings,
    frames_written: usize,
    is_exporting: bool,
}

impl FrameExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            frames_written: 0,
            is_exporting: false,
        }
    }

    /// Creates the output directory and resets the frame counter.
    pub fn start(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.settings.output_dir)?;
        self.frames_written = 0;
        self.is_exporting = true;
        tracing::info!(dir = ?self.settings.output_dir, "exporting frames");
        Ok(())
    }

    pub fn write_frame(&mut self, scene: &RenderedScene) -> Result<PathBuf> {
        if !self.is_exporting {
            return Err(DemoError::msg("frame exporter has not been started"));
        }

        let path = self.settings.output_dir.join(format!(
            "{}_{:05}.svg",
            self.settings.file_prefix, self.frames_written
        ));
        write_svg(scene, &path)?;
        self.frames_written += 1;
        Ok(path)
    }

    pub fn stop(&mut self) -> usize {
        self.is_exporting = false;
        tracing::info!(frames = self.frames_written, "finished exporting frames");
        self.frames_written
    }

    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

pub fn write_svg(scene: &RenderedScene, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_svg(scene))?;
    Ok(())
}

/// Paints the background, every face as a filled outlined polygon, then the
/// axis overlay.
pub fn to_svg(scene: &RenderedScene) -> String {
    let (w, h) = (scene.surface.width, scene.surface.height);
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(
        svg,
        r#"  <rect width="{w}" height="{h}" fill="{}"/>"#,
        scene.background.to_hex()
    );

    for face in &scene.faces {
        let points = face
            .points
            .iter()
            .map(|[x, y]| format!("{x:.2},{y:.2}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            r#"  <polygon points="{points}" fill="rgb({},{},{})" fill-opacity="{}" stroke="{}" stroke-width="1"/>"#,
            face.color.r,
            face.color.g,
            face.color.b,
            face.color.a,
            scene.outline.to_hex()
        );
    }

    for axis in &scene.axes {
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="3"/>"#,
            axis.start[0],
            axis.start[1],
            axis.end[0],
            axis.end[1],
            axis.color.to_hex()
        );
    }

    svg.push_str("</svg>\n");
    svg
}
