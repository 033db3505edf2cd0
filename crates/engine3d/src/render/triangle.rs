use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

/// Vertex with a per-vertex color, interpolated across the face.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// The demo triangle in object space: red, green, blue corners.
pub const TRIANGLE_VERTICES: [ColorVertex; 3] = [
    ColorVertex { position: [-1.0, -1.0, 0.0], color: [1.0, 0.0, 0.0] },
    ColorVertex { position: [1.0, -1.0, 0.0], color: [0.0, 1.0, 0.0] },
    ColorVertex { position: [0.0, 1.0, 0.0], color: [0.0, 0.0, 1.0] },
];

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
    /// x: 1.0 when the target is sRGB and fragment colors must be decoded.
    params: [f32; 4],
}

impl CameraUniform {
    fn new(view_proj: Mat4, target: wgpu::TextureFormat) -> Self {
        let decode = if target.is_srgb() { 1.0 } else { 0.0 };
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            params: [decode, 0.0, 0.0, 0.0],
        }
    }
}

/// Draws the demo triangle with depth testing.
///
/// GPU resources are created on first use and rebuilt when the surface or depth
/// format changes, or when they belong to a different device than the one
/// being rendered with (e.g. after the window is recreated).
#[derive(Default)]
pub struct TriangleRenderer {
    device: Option<wgpu::Device>,
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
}

impl TriangleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all GPU resources. They are recreated on the next `render`.
    ///
    /// Needed when the device they were created on goes away.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Renders the triangle into `target` using `view_proj` as the full
    /// object-to-clip transform.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, view_proj: Mat4) {
        self.ensure_device(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        self.write_camera_uniform(ctx, view_proj);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(vbo) = self.vbo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("engine3d triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.draw(0..TRIANGLE_VERTICES.len() as u32, 0..1);
    }

    fn ensure_device(&mut self, ctx: &RenderCtx<'_>) {
        if self.device.as_ref() == Some(ctx.device) {
            return;
        }
        if self.device.is_some() {
            log::debug!("device changed; rebuilding triangle resources");
        }
        self.release();
        self.device = Some(ctx.device.clone());
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        log::debug!(
            "creating triangle pipeline (color {:?}, depth {:?})",
            ctx.surface_format,
            ctx.depth_format
        );

        let shader_src = include_str!("shaders/triangle.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("engine3d triangle shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("engine3d triangle bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<CameraUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("engine3d triangle pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("engine3d triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[ColorVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Both faces are visible; the camera can orbit behind the triangle.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        });

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.camera_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("engine3d triangle camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("engine3d triangle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.vbo.is_some() {
            return;
        }

        self.vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("engine3d triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
    }

    fn write_camera_uniform(&self, ctx: &RenderCtx<'_>, view_proj: Mat4) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        let u = CameraUniform::new(view_proj, ctx.surface_format);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 24);
        assert_eq!(ColorVertex::layout().array_stride, 24);
    }

    #[test]
    fn camera_uniform_is_mat4_plus_params() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn srgb_targets_request_fragment_decode() {
        let plain = CameraUniform::new(Mat4::IDENTITY, wgpu::TextureFormat::Bgra8Unorm);
        let srgb = CameraUniform::new(Mat4::IDENTITY, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(plain.params[0], 0.0);
        assert_eq!(srgb.params[0], 1.0);
    }

    #[test]
    fn triangle_corners_are_red_green_blue() {
        let colors: Vec<[f32; 3]> = TRIANGLE_VERTICES.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(TRIANGLE_VERTICES[2].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn new_renderer_holds_no_gpu_resources() {
        let r = TriangleRenderer::new();
        assert!(r.device.is_none());
        assert!(r.pipeline.is_none() && r.vbo.is_none() && r.camera_ubo.is_none());
    }

    const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    fn noop_device() -> (wgpu::Device, wgpu::Queue) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::NOOP,
            backend_options: wgpu::BackendOptions {
                noop: wgpu::NoopBackendOptions { enable: true },
                ..Default::default()
            },
            ..Default::default()
        });
        pollster::block_on(async {
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions::default())
                .await
                .expect("noop adapter");
            adapter
                .request_device(&wgpu::DeviceDescriptor::default())
                .await
                .expect("noop device")
        })
    }

    fn attachment(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: None,
                size: wgpu::Extent3d {
                    width: 64,
                    height: 48,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn draw_once(r: &mut TriangleRenderer, device: &wgpu::Device, queue: &wgpu::Queue) {
        let color = attachment(device, COLOR_FORMAT);
        let depth = attachment(device, DEPTH_FORMAT);
        let ctx = RenderCtx::new(
            device,
            queue,
            COLOR_FORMAT,
            DEPTH_FORMAT,
            crate::coords::Viewport::new(64.0, 48.0),
        );
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        {
            let mut target = RenderTarget::new(&mut encoder, &color, &depth);
            r.render(&ctx, &mut target, Mat4::IDENTITY);
        }
        queue.submit(std::iter::once(encoder.finish()));
    }

    #[test]
    fn resources_follow_the_device_across_recreation() {
        let (device_a, queue_a) = noop_device();
        let (device_b, queue_b) = noop_device();
        assert_ne!(device_a, device_b);

        let mut r = TriangleRenderer::new();
        draw_once(&mut r, &device_a, &queue_a);
        draw_once(&mut r, &device_a, &queue_a);
        assert_eq!(r.device.as_ref(), Some(&device_a));

        // Same formats, new device: nothing built on A may reach B.
        draw_once(&mut r, &device_b, &queue_b);
        assert_eq!(r.device.as_ref(), Some(&device_b));
        assert!(r.pipeline.is_some() && r.vbo.is_some() && r.camera_ubo.is_some());

        draw_once(&mut r, &device_b, &queue_b);
        assert_eq!(r.device.as_ref(), Some(&device_b));
    }

    #[test]
    fn release_then_render_on_new_device() {
        let (device_a, queue_a) = noop_device();
        let (device_b, queue_b) = noop_device();

        let mut r = TriangleRenderer::new();
        draw_once(&mut r, &device_a, &queue_a);
        r.release();
        assert!(r.device.is_none() && r.pipeline.is_none());

        draw_once(&mut r, &device_b, &queue_b);
        assert_eq!(r.device.as_ref(), Some(&device_b));
    }
}
