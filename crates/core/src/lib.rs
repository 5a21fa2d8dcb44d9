//! Core library behind the portfolio demo widgets.
//!
//! Two independent engines live here: a sort step recorder that turns a sort
//! run into replayable frames, and a small software rasterizer that rotates,
//! projects and flat-shades a mesh for a fixed camera. Both are synchronous
//! and side-effect free; the animation state that drives them is kept in
//! [`timeline`] and owned by whatever loop the caller runs.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod sorting;
pub mod timeline;

pub use config::{AppConfig, GraphicsConfig, SorterConfig};
pub use error::{DemoError, Result};
pub use export::{ExportSettings, FrameExporter};
pub use geometry::{rotate, Axis, RotationState, Vertex};
pub use render::{project, render, render_scene, ProjectedFace, RenderedScene, Surface};
pub use scene::{generate_sphere, Mesh, Rgb, Scene, ShapeKind, SphereParams};
pub use sorting::{record, BarState, Frame, Recording, SortAlgorithm};
pub use timeline::{SortPlayer, SpinAnimation, StepClock};
