//! CPU mirrors of the scene shader's uniform blocks.

use crate::scene::{Scene, SceneObject};
use crate::util::color::linear_rgb;

/// Ambient and key light, pre-multiplied by intensity in linear space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// Ambient color * intensity (w unused).
    pub ambient: [f32; 4],
    /// Directional color * intensity (w unused).
    pub sun_color: [f32; 4],
    /// Unit vector toward the directional light (w unused).
    pub sun_direction: [f32; 4],
}

impl LightUniform {
    /// Pack the scene's lights.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let scaled = |rgb: [f32; 3], intensity: f32| {
            let [r, g, b] = linear_rgb(rgb).map(|c| c * intensity);
            [r, g, b, 0.0]
        };
        Self {
            ambient: scaled(scene.ambient.color, scene.ambient.intensity),
            sun_color: scaled(scene.sun.color, scene.sun.intensity),
            sun_direction: scene.sun.to_light().extend(0.0).to_array(),
        }
    }
}

/// Per-object transform and material.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceUniform {
    /// Object-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `model`.
    pub normal: [[f32; 4]; 4],
    /// Linear base color in rgb, roughness in w.
    pub color: [f32; 4],
}

impl SurfaceUniform {
    /// Pack one scene object.
    #[must_use]
    pub fn from_object(object: &SceneObject) -> Self {
        let [r, g, b] = linear_rgb(object.material.color);
        Self {
            model: object.transform.matrix().to_cols_array_2d(),
            normal: object.transform.normal_matrix().to_cols_array_2d(),
            color: [r, g, b, object.material.roughness.clamp(0.0, 1.0)],
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn layouts_match_shader_blocks() {
        assert_eq!(size_of::<LightUniform>(), 48);
        assert_eq!(size_of::<SurfaceUniform>(), 144);
    }

    #[test]
    fn sun_direction_points_toward_light() {
        let scene = Scene::default();
        let lights = LightUniform::from_scene(&scene);
        let dir = Vec3::new(
            lights.sun_direction[0],
            lights.sun_direction[1],
            lights.sun_direction[2],
        );
        assert!((dir - Vec3::new(-0.5, 1.0, 1.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn intensity_scales_linear_color() {
        let scene = Scene::default();
        let lights = LightUniform::from_scene(&scene);
        // #FFFFFF at 0.6
        assert!((lights.sun_color[0] - 0.6).abs() < 1e-6);
        // #BBBBBB at 1.0 is darker than its sRGB value once linearized
        assert!(lights.ambient[0] < 187.0 / 255.0);
        assert!(lights.ambient[0] > 0.4);
    }

    #[test]
    fn surface_carries_roughness() {
        let scene = Scene::default();
        let ground = scene.object("ground").unwrap();
        let uniform = SurfaceUniform::from_object(ground);
        assert_eq!(uniform.color[3], 1.0);
        assert_eq!(uniform.model[3], [0.0, 0.0, -4.0, 1.0]);
    }
}
