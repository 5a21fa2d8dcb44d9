use std::{f64::consts::PI, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{geometry::Vertex, DemoError, Result};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(DemoError::invalid(format!("`{hex}` is not a #rrggbb colour")));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| DemoError::invalid(format!("`{hex}` is not a #rrggbb colour")))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Shapes offered by the graphics demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Cube,
    Pyramid,
    /// Generated on demand from a radius and segment count.
    Sphere,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [Self::Cube, Self::Pyramid, Self::Sphere];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Pyramid => "pyramid",
            Self::Sphere => "sphere",
        }
    }

    pub fn base_color(self) -> Rgb {
        match self {
            Self::Cube => Rgb::new(0x3b, 0x82, 0xf6),
            Self::Pyramid => Rgb::new(0xef, 0x44, 0x44),
            Self::Sphere => Rgb::new(0x10, 0xb9, 0x81),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cube" => Ok(Self::Cube),
            "pyramid" => Ok(Self::Pyramid),
            "sphere" => Ok(Self::Sphere),
            other => Err(DemoError::invalid(format!("unknown shape `{other}`"))),
        }
    }
}

/// Polygon mesh: each face lists three or more indices into `vertices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Vec<usize>>,
    pub color: Rgb,
}

impl Mesh {
    /// Axis-aligned cube with half-extent 1.
    pub fn cube() -> Self {
        let vertices = [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ];
        let faces = [
            [0, 1, 2, 3],
            [4, 7, 6, 5],
            [0, 4, 5, 1],
            [2, 6, 7, 3],
            [0, 3, 7, 4],
            [1, 5, 6, 2],
        ];

        Self {
            vertices: vertices.into_iter().map(Vertex::from).collect(),
            faces: faces.into_iter().map(|f| f.to_vec()).collect(),
            color: ShapeKind::Cube.base_color(),
        }
    }

    /// Square base at y = -1 with the apex at (0, 1, 0).
    pub fn pyramid() -> Self {
        let vertices = [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [0.0, 1.0, 0.0],
        ];
        let mut faces = vec![vec![0, 1, 2, 3]];
        faces.extend([[0, 4, 1], [1, 4, 2], [2, 4, 3], [3, 4, 0]].map(|f| f.to_vec()));

        Self {
            vertices: vertices.into_iter().map(Vertex::from).collect(),
            faces,
            color: ShapeKind::Pyramid.base_color(),
        }
    }

    /// A mesh with no geometry.
    pub fn empty(color: Rgb) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            color,
        }
    }

    pub fn for_shape(kind: ShapeKind, sphere: &SphereParams) -> Self {
        match kind {
            ShapeKind::Cube => Self::cube(),
            ShapeKind::Pyramid => Self::pyramid(),
            ShapeKind::Sphere => {
                generate_sphere(sphere.radius, sphere.lat_segments, sphere.lon_segments)
            }
        }
    }

    /// Parses a mesh from JSON and rejects faces that [`Mesh::validate`]
    /// would refuse.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mesh: Self = serde_json::from_str(json)?;
        mesh.validate()?;
        Ok(mesh)
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Checks that every face has at least three corners and only refers to
    /// existing vertices.
    pub fn validate(&self) -> Result<()> {
        for (index, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(DemoError::invalid(format!(
                    "face {index} has {} vertices, expected at least 3",
                    face.len()
                )));
            }
            if let Some(bad) = face.iter().find(|&&v| v >= self.vertices.len()) {
                return Err(DemoError::invalid(format!(
                    "face {index} refers to vertex {bad} but the mesh has {}",
                    self.vertices.len()
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for the generated sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereParams {
    pub radius: f64,
    pub lat_segments: usize,
    pub lon_segments: usize,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            lat_segments: 16,
            lon_segments: 16,
        }
    }
}

/// Latitude/longitude sphere with two triangles per grid cell.
///
/// Produces `(lat + 1) * (lon + 1)` vertices, including duplicated seam and
/// pole vertices, and `lat * lon * 2` faces. Segment counts below one are
/// treated as one.
pub fn generate_sphere(radius: f64, lat_segments: usize, lon_segments: usize) -> Mesh {
    let lat = lat_segments.max(1);
    let lon = lon_segments.max(1);

    let mut vertices = Vec::with_capacity((lat + 1) * (lon + 1));
    for i in 0..=lat {
        let theta = i as f64 * PI / lat as f64;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..=lon {
            let phi = j as f64 * 2.0 * PI / lon as f64;
            let (sin_p, cos_p) = phi.sin_cos();
            vertices.push(Vertex::new(
                radius * sin_t * cos_p,
                radius * cos_t,
                radius * sin_t * sin_p,
            ));
        }
    }

    let mut faces = Vec::with_capacity(lat * lon * 2);
    for i in 0..lat {
        for j in 0..lon {
            let first = i * (lon + 1) + j;
            let second = first + lon + 1;
            faces.push(vec![first, second, first + 1]);
            faces.push(vec![second, second + 1, first + 1]);
        }
    }

    tracing::debug!(lat, lon, vertices = vertices.len(), faces = faces.len(), "generated sphere");

    Mesh {
        vertices,
        faces,
        color: ShapeKind::Sphere.base_color(),
    }
}

/// The currently selected shape together with its mesh. Switching shape or
/// changing the sphere parameters rebuilds the mesh; rendering only reads it.
#[derive(Debug, Clone)]
pub struct Scene {
    kind: ShapeKind,
    sphere: SphereParams,
    mesh: Mesh,
}

impl Scene {
    pub fn new(kind: ShapeKind, sphere: SphereParams) -> Self {
        Self {
            kind,
            sphere,
            mesh: Mesh::for_shape(kind, &sphere),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn sphere(&self) -> SphereParams {
        self.sphere
    }

    pub fn select(&mut self, kind: ShapeKind) {
        if kind != self.kind {
            self.kind = kind;
            self.mesh = Mesh::for_shape(kind, &self.sphere);
        }
    }

    pub fn set_sphere(&mut self, sphere: SphereParams) {
        self.sphere = sphere;
        if self.kind == ShapeKind::Sphere {
            self.mesh = Mesh::for_shape(self.kind, &self.sphere);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts_match_segments() {
        let mesh = generate_sphere(1.0, 16, 16);
        assert_eq!(mesh.vertices.len(), 17 * 17);
        assert_eq!(mesh.faces.len(), 16 * 16 * 2);
        assert!(mesh.faces.iter().all(|f| f.len() == 3));
        mesh.validate().unwrap();
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = generate_sphere(2.5, 8, 12);
        assert_eq!(mesh.vertices.len(), 9 * 13);
        for v in &mesh.vertices {
            let r = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
            assert!((r - 2.5).abs() < 1e-9);
        }
        // First ring is the north pole.
        assert!((mesh.vertices[0].y - 2.5).abs() < 1e-12);
    }

    #[test]
    fn zero_segments_are_clamped() {
        let mesh = generate_sphere(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces.len(), 2);
        mesh.validate().unwrap();
    }

    #[test]
    fn fixed_meshes_are_valid() {
        let cube = Mesh::cube();
        assert_eq!((cube.vertices.len(), cube.faces.len()), (8, 6));
        cube.validate().unwrap();

        let pyramid = Mesh::pyramid();
        assert_eq!((pyramid.vertices.len(), pyramid.faces.len()), (5, 5));
        pyramid.validate().unwrap();
    }

    #[test]
    fn validate_reports_bad_indices() {
        let mut mesh = Mesh::cube();
        mesh.faces.push(vec![0, 1, 42]);
        let err = mesh.validate().unwrap_err();
        assert!(format!("{err}").contains("vertex 42"));
    }

    #[test]
    fn json_meshes_are_validated_on_load() {
        let triangle = r#"{
            "vertices": [{ "x": 0, "y": 0, "z": 0 }, { "x": 1, "y": 0, "z": 0 }, { "x": 0, "y": 1, "z": 0 }],
            "faces": [[0, 1, 2]],
            "color": { "r": 255, "g": 0, "b": 0 }
        }"#;
        let mesh = Mesh::from_json_str(triangle).unwrap();
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);

        let broken = triangle.replace("[0, 1, 2]", "[0, 1, 7]");
        let err = Mesh::from_json_str(&broken).unwrap_err();
        assert!(matches!(err, DemoError::InvalidInput(_)));
        assert!(format!("{err}").contains("vertex 7"));
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!(Rgb::from_hex("#3b82f6").unwrap(), Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(Rgb::from_hex("10b981").unwrap().to_hex(), "#10b981");
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#zz0000").is_err());
    }

    #[test]
    fn scene_rebuilds_sphere_on_new_params() {
        let mut scene = Scene::new(ShapeKind::Cube, SphereParams::default());
        assert_eq!(scene.mesh().faces.len(), 6);

        scene.select(ShapeKind::Sphere);
        assert_eq!(scene.mesh().faces.len(), 16 * 16 * 2);

        scene.set_sphere(SphereParams {
            lat_segments: 4,
            lon_segments: 6,
            ..SphereParams::default()
        });
        assert_eq!(scene.mesh().faces.len(), 4 * 6 * 2);
        assert_eq!(scene.mesh().color, ShapeKind::Sphere.base_color());
    }

    #[test]
    fn shape_names_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.name().parse::<ShapeKind>().unwrap(), kind);
        }
        assert!("torus".parse::<ShapeKind>().is_err());
    }
}
