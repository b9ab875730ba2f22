//! Declarative scene description.
//!
//! A [`Scene`] is a flat list of shaded primitives plus the lights and
//! background they are rendered with. Nothing here touches the GPU; the
//! renderer turns each [`SceneObject`] into buffers once at startup.

/// CPU mesh generation for the primitive shapes.
pub mod mesh;

use glam::{EulerRot, Mat4, Quat, Vec3};

use self::mesh::MeshData;
use crate::options::Options;
use crate::util::color::parse_hex_or;

/// Primitive geometry with its construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box.
    Cuboid {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
        /// Extent along Z.
        depth: f32,
    },
    /// UV sphere.
    Sphere {
        /// Sphere radius.
        radius: f32,
        /// Segments around the equator.
        width_segments: u32,
        /// Segments from pole to pole.
        height_segments: u32,
    },
    /// Capped cylinder along Y.
    Cylinder {
        /// Radius of the top cap.
        radius_top: f32,
        /// Radius of the bottom cap.
        radius_bottom: f32,
        /// Extent along Y.
        height: f32,
        /// Segments around the axis.
        radial_segments: u32,
    },
    /// Rectangle in XY facing +Z.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
    },
}

impl Shape {
    /// Generate the triangle mesh for this shape.
    #[must_use]
    pub fn mesh(&self) -> MeshData {
        match *self {
            Self::Cuboid {
                width,
                height,
                depth,
            } => mesh::cuboid(width, height, depth),
            Self::Sphere {
                radius,
                width_segments,
                height_segments,
            } => mesh::sphere(radius, width_segments, height_segments),
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            } => mesh::cylinder(
                radius_top,
                radius_bottom,
                height,
                radial_segments,
            ),
            Self::Plane { width, height } => mesh::plane(width, height),
        }
    }
}

/// Object placement: translation, XYZ Euler rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Euler rotation in radians, applied X then Y then Z.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Translation only.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Replace the rotation (radians).
    #[must_use]
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Object-to-world matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            self.scale,
            rotation,
            self.position,
        )
    }

    /// Matrix for transforming normals (inverse transpose of the upper 3x3,
    /// widened back to 4x4).
    #[must_use]
    pub fn normal_matrix(&self) -> Mat4 {
        self.matrix().inverse().transpose()
    }
}

/// Surface appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color, sRGB in `[0, 1]`.
    pub color: [f32; 3],
    /// Microfacet roughness in `[0, 1]`; dulls the specular highlight.
    pub roughness: f32,
}

impl Material {
    /// Material from a `#RRGGBB` string.
    #[must_use]
    pub fn hex(color: &str, roughness: f32) -> Self {
        Self {
            color: parse_hex_or(color, [0.8, 0.8, 0.8]),
            roughness,
        }
    }
}

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Human-readable label, used for GPU resource names and logs.
    pub name: String,
    /// Geometry.
    pub shape: Shape,
    /// Placement.
    pub transform: Transform,
    /// Appearance.
    pub material: Material,
}

/// Uniform light from every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Light color, sRGB in `[0, 1]`.
    pub color: [f32; 3],
    /// Scalar intensity.
    pub intensity: f32,
}

/// Parallel light shining from `position` toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Light color, sRGB in `[0, 1]`.
    pub color: [f32; 3],
    /// Scalar intensity.
    pub intensity: f32,
    /// Where the light sits; only its direction from the origin matters.
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector from a lit surface toward the light.
    #[must_use]
    pub fn to_light(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

/// Everything the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Drawable primitives.
    pub objects: Vec<SceneObject>,
    /// Ambient term.
    pub ambient: AmbientLight,
    /// Key light.
    pub sun: DirectionalLight,
    /// Clear color, sRGB in `[0, 1]`.
    pub background: [f32; 3],
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo(&Options::default())
    }
}

impl Scene {
    /// The demo scene (box, sphere, cylinder on a ground plane) lit
    /// according to `options`.
    #[must_use]
    pub fn demo(options: &Options) -> Self {
        let objects = vec![
            SceneObject {
                name: "box".into(),
                shape: Shape::Cuboid {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
                transform: Transform::at(Vec3::new(-1.0, 0.5, -3.0))
                    .rotated(Vec3::new(0.0, 45f32.to_radians(), 0.0)),
                material: Material::hex("#4CC3D9", 0.5),
            },
            SceneObject {
                name: "sphere".into(),
                shape: Shape::Sphere {
                    radius: 1.25,
                    width_segments: 36,
                    height_segments: 18,
                },
                transform: Transform::at(Vec3::new(0.0, 1.25, -5.0)),
                material: Material::hex("#EF2D5E", 0.5),
            },
            SceneObject {
                name: "cylinder".into(),
                shape: Shape::Cylinder {
                    radius_top: 0.5,
                    radius_bottom: 0.5,
                    height: 1.5,
                    radial_segments: 16,
                },
                transform: Transform::at(Vec3::new(1.0, 0.5, -3.0)),
                material: Material::hex("#FFC65D", 0.5),
            },
            SceneObject {
                name: "ground".into(),
                shape: Shape::Plane {
                    width: 4.0,
                    height: 4.0,
                },
                transform: Transform::at(Vec3::new(0.0, 0.0, -4.0))
                    .rotated(Vec3::new(-90f32.to_radians(), 0.0, 0.0)),
                material: Material::hex("#7BC8A4", 1.0),
            },
        ];

        Self::lit(objects, options)
    }

    /// A scene of `objects` with lights and background taken from
    /// `options`.
    #[must_use]
    pub fn lit(objects: Vec<SceneObject>, options: &Options) -> Self {
        let lighting = &options.lighting;
        Self {
            objects,
            ambient: AmbientLight {
                color: lighting.ambient_rgb(),
                intensity: lighting.ambient_intensity,
            },
            sun: DirectionalLight {
                color: lighting.directional_rgb(),
                intensity: lighting.directional_intensity,
                position: Vec3::from_array(lighting.directional_position),
            },
            background: options.display.clear_rgb(),
        }
    }

    /// Replace lights and background from `options`, keeping the objects.
    pub fn apply_options(&mut self, options: &Options) {
        let objects = std::mem::take(&mut self.objects);
        *self = Self::lit(objects, options);
    }

    /// Look up an object by name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_has_four_named_objects() {
        let scene = Scene::default();
        let names: Vec<&str> =
            scene.objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["box", "sphere", "cylinder", "ground"]);
    }

    #[test]
    fn ground_plane_faces_up() {
        let scene = Scene::default();
        let ground = scene.object("ground").unwrap();
        let n = ground.transform.normal_matrix().transform_vector3(Vec3::Z);
        assert!((n.normalize() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn ground_plane_spans_under_objects() {
        let scene = Scene::default();
        let ground = scene.object("ground").unwrap();
        let m = ground.transform.matrix();
        let (lo, hi) = ground.shape.mesh().bounds();
        let lo = m.transform_point3(lo);
        let hi = m.transform_point3(hi);
        assert!(lo.y.abs() < 1e-5 && hi.y.abs() < 1e-5);
        assert!((lo.z.min(hi.z) - -6.0).abs() < 1e-5);
        assert!((lo.z.max(hi.z) - -2.0).abs() < 1e-5);
    }

    #[test]
    fn box_sits_on_the_ground() {
        let scene = Scene::default();
        let cube = scene.object("box").unwrap();
        let m = cube.transform.matrix();
        let lowest = cube
            .shape
            .mesh()
            .vertices
            .iter()
            .map(|v| m.transform_point3(Vec3::from_array(v.position)).y)
            .fold(f32::INFINITY, f32::min);
        assert!(lowest.abs() < 1e-5);
    }

    #[test]
    fn lights_follow_options() {
        let mut options = Options::default();
        options.lighting.directional_intensity = 1.5;
        options.display.clear_color = "#000000".into();
        let scene = Scene::demo(&options);
        assert_eq!(scene.sun.intensity, 1.5);
        assert_eq!(scene.background, [0.0, 0.0, 0.0]);
        assert!((scene.sun.to_light().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn apply_options_keeps_objects() {
        let mut scene = Scene::default();
        let mut options = Options::default();
        options.lighting.ambient_intensity = 0.25;
        scene.apply_options(&options);
        assert_eq!(scene.objects.len(), 4);
        assert_eq!(scene.ambient.intensity, 0.25);
    }

    #[test]
    fn colors_parse_from_hex() {
        let scene = Scene::default();
        let sphere = scene.object("sphere").unwrap();
        assert!((sphere.material.color[0] - 239.0 / 255.0).abs() < 1e-6);
        assert_eq!(scene.ambient.color, [187.0 / 255.0; 3]);
    }
}
