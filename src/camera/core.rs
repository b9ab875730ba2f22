use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::options::CameraOptions;

/// Anything whose Euler rotation can be written per axis.
///
/// The look controller only ever writes X (pitch) and Y (yaw); Z (roll) is
/// set once when the controller takes over a camera.
pub trait RotationTarget {
    /// Set rotation about the X axis, radians.
    fn set_rotation_x(&mut self, radians: f32);
    /// Set rotation about the Y axis, radians.
    fn set_rotation_y(&mut self, radians: f32);
    /// Set rotation about the Z axis, radians.
    fn set_rotation_z(&mut self, radians: f32);
}

/// Perspective camera positioned in world space and oriented by Euler
/// angles.
///
/// `rotation` holds (x, y, z) in radians, applied yaw (Y) first, then pitch
/// (X), then roll (Z), so yaw always turns about the world vertical.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Euler rotation (x = pitch, y = yaw, z = roll), radians.
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build a camera from options with the given aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(options.position),
            rotation: Vec3::ZERO,
            fovy: options.fovy,
            aspect,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Orientation as a quaternion.
    #[must_use]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    /// Unit vector the camera looks along (-Z in camera space).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// World-to-view transform.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
            .inverse()
    }

    /// Perspective projection with wgpu's [0, 1] depth range.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a resize. Zero heights are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 16.0 / 9.0)
    }
}

impl RotationTarget for Camera {
    fn set_rotation_x(&mut self, radians: f32) {
        self.rotation.x = radians;
    }

    fn set_rotation_y(&mut self, radians: f32) {
        self.rotation.y = radians;
    }

    fn set_rotation_z(&mut self, radians: f32) {
        self.rotation.z = radians;
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.position.to_array();
    }
}
