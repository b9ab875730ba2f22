//! Scene rendering.
//!
//! A single lit mesh pipeline draws every [`SceneObject`]. Geometry is
//! uploaded once when the renderer is built; per frame only the camera
//! uniform changes.

pub(crate) mod pipeline;
/// CPU mirrors of the shader's uniform blocks.
pub mod uniforms;

use wgpu::util::DeviceExt;

use self::uniforms::{LightUniform, SurfaceUniform};
use crate::camera::CameraUniform;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::scene::{Scene, SceneObject};
use crate::util::color::linear_rgb;

/// GPU buffers and bind group for one scene object.
struct GpuObject {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    surface_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuObject {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        object: &SceneObject,
    ) -> Self {
        let mesh = object.shape.mesh();
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertices", object.name)),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Indices", object.name)),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let surface_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Surface", object.name)),
                contents: bytemuck::bytes_of(&SurfaceUniform::from_object(
                    object,
                )),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", object.name)),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: surface_buffer.as_entire_binding(),
            }],
        });
        log::debug!(
            "uploaded {}: {} vertices, {} triangles",
            object.name,
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            surface_buffer,
            bind_group,
        }
    }

    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Draws a [`Scene`] with one pipeline and a depth buffer.
pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    objects: Vec<GpuObject>,
    depth: DepthTarget,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Build the pipeline and upload every object of `scene`.
    #[must_use]
    pub fn new(context: &RenderContext, scene: &Scene) -> Self {
        let device = &context.device;

        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[
                    pipeline::uniform_entry(0),
                    pipeline::uniform_entry(1),
                ],
            });
        let object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Bind Group Layout"),
                entries: &[pipeline::uniform_entry(0)],
            });

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform"),
                contents: bytemuck::bytes_of(&CameraUniform::new()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let light_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Light Uniform"),
                contents: bytemuck::bytes_of(&LightUniform::from_scene(scene)),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: light_buffer.as_entire_binding(),
                    },
                ],
            });

        let pipeline = pipeline::create_mesh_pipeline(
            device,
            "Scene Mesh",
            context.format(),
            &[&frame_layout, &object_layout],
        );

        let objects = scene
            .objects
            .iter()
            .map(|object| GpuObject::new(device, &object_layout, object))
            .collect();

        let (width, height) = context.size();
        Self {
            pipeline,
            camera_buffer,
            light_buffer,
            frame_bind_group,
            objects,
            depth: DepthTarget::new(device, width, height),
            clear_color: clear_color(scene.background),
        }
    }

    /// Number of uploaded objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Recreate the depth buffer at the new size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width > 0 && height > 0 && self.depth.size() != (width, height) {
            self.depth = DepthTarget::new(device, width, height);
        }
    }

    /// Upload the camera uniform for this frame.
    pub fn update_camera(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Re-upload lights, background and object materials after the scene
    /// description changed. Geometry is not rebuilt.
    pub fn update_scene(&mut self, queue: &wgpu::Queue, scene: &Scene) {
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::bytes_of(&LightUniform::from_scene(scene)),
        );
        for (gpu, object) in self.objects.iter().zip(&scene.objects) {
            queue.write_buffer(
                &gpu.surface_buffer,
                0,
                bytemuck::bytes_of(&SurfaceUniform::from_object(object)),
            );
        }
        self.clear_color = clear_color(scene.background);
    }

    /// Record the scene pass into `encoder`, targeting `view`.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let mut render_pass =
            encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for object in &self.objects {
            object.draw(&mut render_pass);
        }
    }
}

/// The clear color in the linear space the render target expects.
fn clear_color(background: [f32; 3]) -> wgpu::Color {
    let [r, g, b] = linear_rgb(background);
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_is_linearized() {
        let c = clear_color([250.0 / 255.0; 3]);
        assert!(c.r < 250.0 / 255.0 && c.r > 0.9);
        assert_eq!(c.a, 1.0);
        let black = clear_color([0.0; 3]);
        assert_eq!((black.r, black.g, black.b), (0.0, 0.0, 0.0));
    }
}
