pub mod pipeline;
pub mod sprite_atlas;
pub mod tessellate;
pub mod text;
pub mod utils;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use pipeline::{SpritePipeline, Vertex, create_sprite_pipeline, orthographic_projection};
use sprite_atlas::SpriteAtlas;
use tessellate::tessellate;
use text::Font;
use utils::Viewport;

use crate::assets::Assets;
use crate::draw::DrawList;
use crate::error::{GameError, Result};

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: SpritePipeline,
    /// Orthographic projection over the letterboxed surface.
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    atlas_bind_group: wgpu::BindGroup,
    pub(crate) atlas: SpriteAtlas,
    viewport: Viewport,
    /// Persistent vertex buffer; reallocated only when a frame outgrows it.
    vertex_buffer: Option<wgpu::Buffer>,
    /// Number of `Vertex` slots the current buffer can hold.
    vertex_capacity: u32,
    /// FNV-1a hash of the last uploaded vertex bytes.
    vertex_hash: u64,
}

/// FNV-1a 64-bit hash, used to skip re-uploading an unchanged frame.
fn fnv1a_64(data: &[u8]) -> u64 {
    data.iter().fold(14695981039346656037u64, |h, &b| {
        h.wrapping_mul(1099511628211) ^ b as u64
    })
}

/// Prefer a non-sRGB format so blending happens in sRGB space, the same as a
/// 2D canvas.  Falls back to whatever the surface lists first.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Result<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
        .ok_or(GameError::NoSurfaceFormat)
}

impl Renderer {
    /// Create the surface and device and upload every image in `assets`.
    /// Returns the font metrics alongside, since the text layout needs them
    /// every frame.
    pub async fn new(window: Arc<Window>, assets: Assets) -> Result<(Self, Font)> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter.request_device(&wgpu::DeviceDescriptor::default()).await?;
        log::info!("[renderer] adapter: {}", adapter.get_info().name);

        let caps = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&caps.formats)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_sprite_pipeline(&device, format);

        let proj = orthographic_projection(config.width as f32, config.height as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let Assets { images, font } = assets;
        let atlas = SpriteAtlas::new(&device, &queue, &images);

        let atlas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas_bg"),
            layout: &pipeline.atlas_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&atlas.texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        let renderer = Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            projection_buffer,
            projection_bind_group,
            atlas_bind_group,
            atlas,
            viewport: Viewport::ZERO,
            vertex_buffer: None,
            vertex_capacity: 0,
            vertex_hash: 0,
        };
        Ok((renderer, font))
    }

    /// Reconfigure the swapchain for a new window size and letterbox.
    pub fn resize(&mut self, width: u32, height: u32, viewport: Viewport) {
        if width == 0 || height == 0 {
            self.viewport = Viewport::ZERO;
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.viewport = viewport;
        if !viewport.is_empty() {
            let proj = orthographic_projection(viewport.width, viewport.height);
            self.queue.write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&proj));
        }
    }

    /// Render one frame: clear the whole window to black, then draw `list`
    /// inside the letterboxed viewport.
    pub fn render(&mut self, list: &DrawList, font: &Font) -> std::result::Result<(), wgpu::SurfaceError> {
        let vertices = tessellate(list, &self.atlas.baked, font);
        self.upload(&vertices);

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vp = self.viewport;
            if !vertices.is_empty() && !vp.is_empty() {
                if let Some(buf) = &self.vertex_buffer {
                    let (tw, th) = (self.config.width as f32, self.config.height as f32);
                    let x = vp.x.clamp(0.0, tw);
                    let y = vp.y.clamp(0.0, th);
                    pass.set_viewport(x, y, vp.width.min(tw - x), vp.height.min(th - y), 0.0, 1.0);

                    let count = vertices.len() as u32;
                    let byte_len = (count as usize * std::mem::size_of::<Vertex>()) as u64;
                    pass.set_pipeline(&self.pipeline.render_pipeline);
                    pass.set_bind_group(0, &self.projection_bind_group, &[]);
                    pass.set_bind_group(1, &self.atlas_bind_group, &[]);
                    pass.set_vertex_buffer(0, buf.slice(..byte_len));
                    pass.draw(0..count, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Copy `vertices` into the persistent buffer, growing it when needed.
    fn upload(&mut self, vertices: &[Vertex]) {
        if vertices.is_empty() {
            return;
        }
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let new_hash = fnv1a_64(bytes);
        let count = vertices.len() as u32;

        if count > self.vertex_capacity || self.vertex_buffer.is_none() {
            // Grow to the next power of two, minimum 1024 vertices.
            let capacity = count.next_power_of_two().max(1024);
            self.vertex_buffer = Some(self.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("vertex_buffer"),
                size: capacity as u64 * std::mem::size_of::<Vertex>() as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = capacity;
            self.vertex_hash = !new_hash; // Force upload after a resize.
        }

        if new_hash != self.vertex_hash {
            if let Some(buf) = &self.vertex_buffer {
                self.queue.write_buffer(buf, 0, bytes);
            }
            self.vertex_hash = new_hash;
        }
    }
}
