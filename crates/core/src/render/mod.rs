//! Software projection of a [`Mesh`] into paintable 2D polygons.
//!
//! The camera is fixed: it looks down the z axis from [`CAMERA_DISTANCE`]
//! units away and maps one world unit to [`PIXELS_PER_UNIT`] pixels, centred
//! on the drawing surface. Faces are flat shaded from their centroid depth
//! and emitted in mesh order without depth sorting.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{RotationState, Vertex},
    scene::{Mesh, Rgb},
};

pub const CAMERA_DISTANCE: f64 = 5.0;
pub const PIXELS_PER_UNIT: f64 = 100.0;
/// Faces whose rotated centroid z is not above this value are skipped.
pub const DEPTH_CUTOFF: f64 = -2.0;
pub const AMBIENT: f64 = 0.3;
pub const FACE_ALPHA: f64 = 0.8;
/// Axis overlay segments run from the origin to this distance.
pub const AXIS_LENGTH: f64 = 2.0;

pub const BACKGROUND: Rgb = Rgb::new(0x1f, 0x29, 0x37);
pub const FACE_OUTLINE: Rgb = Rgb::new(0x94, 0xa3, 0xb8);

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(600.0, 400.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedFace {
    /// Index of the face within the source mesh.
    pub face: usize,
    pub points: Vec<[f64; 2]>,
    pub color: Rgba,
    /// Rotated centroid z.
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSegment {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub color: Rgb,
}

/// Everything needed to paint one frame, in paint order: background, faces,
/// then axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedScene {
    pub surface: Surface,
    pub background: Rgb,
    pub outline: Rgb,
    pub faces: Vec<ProjectedFace>,
    pub axes: Vec<AxisSegment>,
}

/// Perspective-projects a view-space point onto the surface.
pub fn project(point: Vertex, surface: Surface) -> [f64; 2] {
    let depth = point.z + CAMERA_DISTANCE;
    [
        point.x * CAMERA_DISTANCE / depth * PIXELS_PER_UNIT + surface.width / 2.0,
        point.y * CAMERA_DISTANCE / depth * PIXELS_PER_UNIT + surface.height / 2.0,
    ]
}

/// Flat shading factor for a face whose centroid sits at `centroid_z`.
/// Floored at the ambient term; not capped above.
pub fn shading_intensity(centroid_z: f64) -> f64 {
    AMBIENT.max((centroid_z + 3.0) / 4.0)
}

/// Scales each channel by `intensity`, flooring and clamping to a byte.
pub fn shade(color: Rgb, intensity: f64) -> Rgba {
    let scale = |channel: u8| (channel as f64 * intensity).floor().clamp(0.0, 255.0) as u8;
    Rgba {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
        a: FACE_ALPHA,
    }
}

/// Rotates, culls, projects and shades the faces of `mesh`.
///
/// Faces are expected to refer to existing vertices (see
/// [`Mesh::validate`]); a face that does not is skipped rather than drawn.
pub fn render(mesh: &Mesh, rotation: &RotationState, surface: Surface) -> Vec<ProjectedFace> {
    let rotated: Vec<Vertex> = mesh.vertices.iter().map(|&v| rotation.apply(v)).collect();

    let faces: Vec<ProjectedFace> = mesh
        .faces
        .iter()
        .enumerate()
        .filter(|(_, face)| !face.is_empty() && face.iter().all(|&v| v < rotated.len()))
        .filter_map(|(index, face)| {
            let centroid = face
                .iter()
                .fold(Vertex::ORIGIN, |acc, &v| acc + rotated[v])
                / face.len() as f64;

            if centroid.z <= DEPTH_CUTOFF {
                return None;
            }

            Some(ProjectedFace {
                face: index,
                points: face.iter().map(|&v| project(rotated[v], surface)).collect(),
                color: shade(mesh.color, shading_intensity(centroid.z)),
                depth: centroid.z,
            })
        })
        .collect();

    tracing::trace!(
        total = mesh.faces.len(),
        drawn = faces.len(),
        "rendered mesh"
    );

    faces
}

/// Projected X (red), Y (green) and Z (blue) reference axes.
pub fn axis_overlay(rotation: &RotationState, surface: Surface) -> Vec<AxisSegment> {
    let axes = [
        (Vertex::new(AXIS_LENGTH, 0.0, 0.0), Rgb::new(0xef, 0x44, 0x44)),
        (Vertex::new(0.0, AXIS_LENGTH, 0.0), Rgb::new(0x10, 0xb9, 0x81)),
        (Vertex::new(0.0, 0.0, AXIS_LENGTH), Rgb::new(0x3b, 0x82, 0xf6)),
    ];

    axes.into_iter()
        .map(|(end, color)| AxisSegment {
            start: project(rotation.apply(Vertex::ORIGIN), surface),
            end: project(rotation.apply(end), surface),
            color,
        })
        .collect()
}

/// Renders the mesh and the axis overlay into a single paintable frame.
pub fn render_scene(mesh: &Mesh, rotation: &RotationState, surface: Surface) -> RenderedScene {
    RenderedScene {
        surface,
        background: BACKGROUND,
        outline: FACE_OUTLINE,
        faces: render(mesh, rotation, surface),
        axes: axis_overlay(rotation, surface),
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::scene::{generate_sphere, ShapeKind};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn origin_projects_to_surface_centre() {
        assert_eq!(project(Vertex::ORIGIN, Surface::new(600.0, 400.0)), [300.0, 200.0]);
    }

    #[test]
    fn nearer_points_spread_further() {
        let surface = Surface::default();
        let far = project(Vertex::new(1.0, 1.0, 5.0), surface);
        let near = project(Vertex::new(1.0, 1.0, 0.0), surface);
        assert!(approx(far[0], 350.0) && approx(far[1], 250.0));
        assert!(approx(near[0], 400.0) && approx(near[1], 300.0));
    }

    #[test]
    fn shading_floor_and_passthrough() {
        assert!(approx(shading_intensity(1.0), 1.0));
        assert!(approx(shading_intensity(-3.0), 0.3));
        assert!(approx(shading_intensity(0.0), 0.75));
        assert!(approx(shading_intensity(3.0), 1.5));
    }

    #[test]
    fn shaded_channels_are_floored_and_clamped() {
        let color = ShapeKind::Cube.base_color();
        let dim = shade(color, 0.75);
        assert_eq!((dim.r, dim.g, dim.b), (44, 97, 184));
        assert_eq!(dim.a, FACE_ALPHA);

        let bright = shade(color, 1.5);
        assert_eq!((bright.r, bright.g, bright.b), (88, 195, 255));
    }

    #[test]
    fn unrotated_cube_draws_every_face_in_order() {
        let cube = Mesh::cube();
        let faces = render(&cube, &RotationState::default(), Surface::default());

        assert_eq!(faces.iter().map(|f| f.face).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4, 5]);
        let depths: Vec<f64> = faces.iter().map(|f| f.depth).collect();
        assert_eq!(depths, vec![-1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        // Back face at z = -1 is shaded at 0.5, front face at full colour.
        assert_eq!(faces[0].color.r, (0x3b as f64 * 0.5).floor() as u8);
        assert_eq!((faces[1].color.r, faces[1].color.g, faces[1].color.b), (0x3b, 0x82, 0xf6));
        assert!(faces.iter().all(|f| f.points.len() == 4));
    }

    #[test]
    fn faces_at_or_behind_cutoff_are_culled() {
        let mesh = Mesh {
            vertices: vec![
                Vertex::new(0.0, 0.0, -2.0),
                Vertex::new(1.0, 0.0, -2.0),
                Vertex::new(0.0, 1.0, -2.0),
                Vertex::new(0.0, 0.0, -1.9),
                Vertex::new(1.0, 0.0, -1.9),
                Vertex::new(0.0, 1.0, -1.9),
            ],
            faces: vec![vec![0, 1, 2], vec![3, 4, 5]],
            color: Rgb::new(255, 255, 255),
        };

        let faces = render(&mesh, &RotationState::default(), Surface::default());
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].face, 1);
        assert_eq!(faces[0].color.r, 76);
    }

    #[test]
    fn rotation_moves_faces_across_the_cutoff() {
        // Scaled cube so the back face centroid sits at z = -3.
        let mut cube = Mesh::cube();
        for v in &mut cube.vertices {
            v.z *= 3.0;
        }
        let unrotated = render(&cube, &RotationState::default(), Surface::default());
        assert!(unrotated.iter().all(|f| f.face != 0));

        let flipped = render(&cube, &RotationState::new(PI, 0.0, 0.0), Surface::default());
        assert!(flipped.iter().any(|f| f.face == 0));
        assert!(flipped.iter().all(|f| f.face != 1));
    }

    #[test]
    fn faces_with_missing_vertices_are_skipped() {
        let mut cube = Mesh::cube();
        cube.faces.insert(1, vec![0, 1, 99]);
        let faces = render(&cube, &RotationState::default(), Surface::default());
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|f| f.face != 1));
    }

    #[test]
    fn empty_mesh_renders_nothing() {
        let mesh = Mesh::empty(Rgb::new(0, 0, 0));
        assert!(render(&mesh, &RotationState::new(1.0, 2.0, 3.0), Surface::default()).is_empty());
    }

    #[test]
    fn axes_follow_the_rotation() {
        let surface = Surface::default();
        let axes = axis_overlay(&RotationState::default(), surface);
        assert_eq!(axes.len(), 3);
        assert!(axes.iter().all(|a| a.start == [300.0, 200.0]));
        assert!(approx(axes[0].end[0], 500.0));
        assert!(approx(axes[1].end[1], 400.0));
        // Z axis runs along the view direction and projects onto the centre.
        assert!(approx(axes[2].end[0], 300.0) && approx(axes[2].end[1], 200.0));

        let turned = axis_overlay(&RotationState::new(0.0, 0.0, PI / 2.0), surface);
        assert!(approx(turned[0].end[0], 300.0));
        assert!(approx(turned[0].end[1], 400.0));
    }

    #[test]
    fn scene_bundles_faces_and_axes() {
        let sphere = generate_sphere(1.0, 8, 8);
        let scene = render_scene(&sphere, &RotationState::new(0.3, 0.6, 0.1), Surface::default());
        // A unit sphere never reaches the cutoff.
        assert_eq!(scene.faces.len(), sphere.faces.len());
        assert_eq!(scene.axes.len(), 3);
        assert_eq!(scene.background, BACKGROUND);
        assert!(scene.faces.iter().all(|f| f.color.r >= (0x10 as f64 * AMBIENT) as u8));
    }
}
