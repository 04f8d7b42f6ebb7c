use std::num::NonZeroU64;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2, Viewport};
use crate::render::{RenderCtx, RenderError, RenderTarget};
use crate::scene::{DrawCmd, DrawList, Topology};

const SHADER_LABEL: &str = "rotorlift scene shader";

/// Renderer for a recorded `DrawList`.
///
/// Every command becomes one draw call with its own slot in a dynamic-offset
/// uniform buffer (world, view, colour), so the list replays in one render pass
/// with state changes between draws exactly as recorded.
///
/// wgpu has no fan topology: fans are expanded to `(v0, vi, vi+1)` triangle
/// lists at upload, which rasterises to the same pixels.
pub struct SceneRenderer {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_stride: u64,

    uniform_ubo: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_capacity: usize,

    vertex_vbo: Option<wgpu::Buffer>,
    vertex_capacity: usize,

    // Scratch reused across frames.
    vertices: Vec<[f32; 2]>,
    uniforms: Vec<u8>,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    /// Compiles the scene shader and builds the pipeline for `format`.
    ///
    /// Shader and pipeline creation run inside a validation error scope, so a
    /// rejected shader or pipeline comes back as a `RenderError` instead of
    /// reaching the device's uncaptured-error handler.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, RenderError> {
        let shader = compile_shader(device, SHADER_LABEL, include_str!("shaders/scene.wgsl"))?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("rotorlift scene bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: Some(draw_uniform_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rotorlift scene pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rotorlift scene pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Negative scales mirror geometry; both windings must fill.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            log::error!("scene pipeline rejected: {err}");
            return Err(RenderError::Pipeline {
                label: "rotorlift scene pipeline",
                reason: err.to_string(),
            });
        }

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = align_to(draw_uniform_size().get(), alignment);

        log::debug!("scene pipeline ready (format {format:?}, uniform stride {uniform_stride})");

        Ok(Self {
            format,
            pipeline,
            bind_group_layout,
            uniform_stride,
            uniform_ubo: None,
            bind_group: None,
            uniform_capacity: 0,
            vertex_vbo: None,
            vertex_capacity: 0,
            vertices: Vec::new(),
            uniforms: Vec::new(),
            batches: Vec::new(),
        })
    }

    /// Surface format the pipeline was built for.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Replays `list` onto the target, loading (not clearing) existing contents.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, list: &DrawList) {
        if ctx.surface_format != self.format {
            log::warn!(
                "surface format {:?} differs from pipeline format {:?}; skipping draw",
                ctx.surface_format,
                self.format
            );
            return;
        }

        self.prepare(list, ctx.viewport, ctx.scale_factor);
        if self.batches.is_empty() {
            return;
        }

        self.ensure_vertex_capacity(ctx, self.vertices.len());
        self.ensure_uniform_capacity(ctx, self.batches.len());

        let Some(vertex_vbo) = self.vertex_vbo.as_ref() else { return };
        let Some(uniform_ubo) = self.uniform_ubo.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        ctx.queue.write_buffer(vertex_vbo, 0, bytemuck::cast_slice(&self.vertices));
        ctx.queue.write_buffer(uniform_ubo, 0, &self.uniforms);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("rotorlift scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, vertex_vbo.slice(..));

        for batch in &self.batches {
            let (x, y, w, h) = batch.viewport;
            rpass.set_viewport(x, y, w, h, 0.0, 1.0);
            rpass.set_bind_group(0, bind_group, &[batch.uniform_offset]);
            rpass.draw(batch.vertices.clone(), 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// Flattens the list into upload-ready vertex and uniform bytes.
    fn prepare(&mut self, list: &DrawList, canvas: Viewport, scale: f32) {
        self.vertices.clear();
        self.uniforms.clear();
        self.batches.clear();

        for cmd in list.cmds() {
            let Some(viewport) = physical_viewport(cmd.viewport, canvas, scale) else { continue };

            let start = self.vertices.len() as u32;
            let count = expand_triangles(cmd.topology, list.vertices_of(cmd), &mut self.vertices);
            if count == 0 {
                continue;
            }

            let uniform_offset = self.uniforms.len() as u32;
            self.uniforms.extend_from_slice(bytemuck::bytes_of(&DrawUniforms::from_cmd(cmd)));
            self.uniforms.resize(self.uniforms.len() + padding(self.uniform_stride), 0);

            self.batches.push(Batch {
                vertices: start..start + count,
                uniform_offset,
                viewport,
            });
        }
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rotorlift scene vbo"),
            size: (new_cap * std::mem::size_of::<[f32; 2]>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, draws: usize) {
        if draws <= self.uniform_capacity && self.uniform_ubo.is_some() {
            return;
        }
        let new_cap = draws.next_power_of_two().max(64);

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rotorlift scene draw ubo"),
            size: new_cap as u64 * self.uniform_stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rotorlift scene bind group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: Some(draw_uniform_size()),
                }),
            }],
        });

        log::debug!("scene uniform buffer grown to {new_cap} draws");

        self.uniform_ubo = Some(ubo);
        self.bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
    }
}

/// Builds a shader module with validation errors captured instead of
/// reaching the device's uncaptured-error handler.
///
/// Every compiler message is logged; any error fails the build.
fn compile_shader(
    device: &wgpu::Device,
    label: &'static str,
    source: &str,
) -> Result<wgpu::ShaderModule, RenderError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    let captured = pollster::block_on(scope.pop());
    let info = pollster::block_on(module.get_compilation_info());

    let mut errors = Vec::new();
    for msg in &info.messages {
        let at = msg
            .location
            .as_ref()
            .map(|l| format!("{}:{}", l.line_number, l.line_position))
            .unwrap_or_else(|| "?".to_string());

        match msg.message_type {
            wgpu::CompilationMessageType::Error => {
                log::error!("{label} {at}: {}", msg.message);
                errors.push(format!("{at}: {}", msg.message));
            }
            wgpu::CompilationMessageType::Warning => {
                log::warn!("{label} {at}: {}", msg.message);
            }
            _ => {
                log::debug!("{label} {at}: {}", msg.message);
            }
        }
    }

    // Some backends report through the scope only.
    if let Some(err) = captured.filter(|_| errors.is_empty()) {
        log::error!("{label}: {err}");
        errors.push(err.to_string());
    }

    if errors.is_empty() {
        Ok(module)
    } else {
        Err(RenderError::ShaderCompilation {
            label,
            diagnostics: errors.join("\n"),
        })
    }
}

// ── CPU-side preparation ──────────────────────────────────────────────────

/// One draw call: vertex range, uniform slot, physical viewport `(x, y, w, h)`.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    vertices: Range<u32>,
    uniform_offset: u32,
    viewport: (f32, f32, f32, f32),
}

/// Appends `src` to `out` as a plain triangle list and returns the vertex count
/// added. Incomplete trailing triangles are dropped.
fn expand_triangles(topology: Topology, src: &[Vec2], out: &mut Vec<[f32; 2]>) -> u32 {
    let before = out.len();
    match topology {
        Topology::TriangleList => {
            let whole = src.len() - src.len() % 3;
            out.extend(src[..whole].iter().map(|v| [v.x, v.y]));
        }
        Topology::TriangleFan => {
            if let Some((anchor, rest)) = src.split_first() {
                for pair in rest.windows(2) {
                    out.push([anchor.x, anchor.y]);
                    out.push([pair[0].x, pair[0].y]);
                    out.push([pair[1].x, pair[1].y]);
                }
            }
        }
    }
    (out.len() - before) as u32
}

/// Converts an optional logical-pixel inset to a physical viewport clamped to
/// the surface. `None` inset = whole surface. Returns `None` when nothing of
/// the inset is on screen.
fn physical_viewport(
    inset: Option<Rect>,
    canvas: Viewport,
    scale: f32,
) -> Option<(f32, f32, f32, f32)> {
    let surface = Rect::new(0.0, 0.0, canvas.width * scale, canvas.height * scale);
    let rect = match inset {
        None => surface,
        Some(r) => Rect::new(r.origin.x * scale, r.origin.y * scale, r.size.x * scale, r.size.y * scale)
            .intersect(surface)?,
    };
    if rect.is_empty() {
        return None;
    }
    Some((rect.origin.x, rect.origin.y, rect.size.x, rect.size.y))
}

#[inline]
fn align_to(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

#[inline]
fn padding(stride: u64) -> usize {
    (stride - draw_uniform_size().get()) as usize
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Per-draw uniform block (112 bytes), matching `DrawUniforms` in scene.wgsl:
///
///  offset  0  world   mat3x3 (3 × vec4 columns)
///  offset 48  view    mat3x3 (3 × vec4 columns)
///  offset 96  colour  vec4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    world: [[f32; 4]; 3],
    view: [[f32; 4]; 3],
    colour: [f32; 4],
}

impl DrawUniforms {
    fn from_cmd(cmd: &DrawCmd) -> Self {
        Self {
            world: cmd.world.to_gpu_columns(),
            view: cmd.view.to_gpu_columns(),
            colour: cmd.colour.to_array(),
        }
    }
}

fn draw_uniform_size() -> NonZeroU64 {
    NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64)
        .expect("DrawUniforms has non-zero size by construction")
}

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 2]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}
