//! [`Gpu`] on top of wgpu.
//!
//! wgpu has no global bind state, so this backend keeps it on the CPU side:
//! binds update the tracked state, uniform writes land in the bound
//! program's staging block and every draw records a snapshot of that block
//! together with the pipeline it needs. [`WgpuBackend::finish_frame`] then
//! replays the recorded draws into a single render pass, with all uniform
//! snapshots packed into one dynamic-offset buffer.

use std::{
    collections::HashMap,
    iter,
    num::NonZeroU64,
    time::Duration,
};

use anyhow::Context as _;
use wgpu::util::DeviceExt;

use crate::{
    backend::{
        BufferHandle, Gpu, ProgramHandle, ShaderError, TextureHandle, TextureImage,
        UniformLocation, UniformValue, VertexArrayHandle, WrapMode,
        reflect::{self, FRAGMENT_ENTRY_POINT, UniformBlock, VERTEX_ENTRY_POINT},
    },
    context::Context,
    data_structures::buffer::{AttributeKind, VertexAttribute, VertexBufferLayout},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PipelineKey {
    program: ProgramHandle,
    layout: VertexBufferLayout,
    culling: bool,
}

struct Program {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    uniforms: UniformBlock,
    staging: Vec<u8>,
}

struct VertexArray {
    buffer: BufferHandle,
    layout: VertexBufferLayout,
}

struct Texture {
    #[allow(unused)]
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

struct DrawCall {
    pipeline: PipelineKey,
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    texture: Option<TextureHandle>,
    uniforms: Vec<u8>,
    count: u32,
}

#[derive(Default)]
struct Frame {
    clear: Option<[f32; 4]>,
    draws: Vec<DrawCall>,
}

#[derive(Default)]
struct Bound {
    vertex_array: Option<VertexArrayHandle>,
    index_buffer: Option<BufferHandle>,
    program: Option<ProgramHandle>,
    texture: Option<TextureHandle>,
}

pub struct WgpuBackend {
    ctx: Context,
    uniform_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    default_texture: Texture,
    next_id: u32,
    buffers: HashMap<BufferHandle, wgpu::Buffer>,
    vertex_arrays: HashMap<VertexArrayHandle, VertexArray>,
    programs: HashMap<ProgramHandle, Program>,
    textures: HashMap<TextureHandle, Texture>,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    bound: Bound,
    culling: bool,
    frame: Frame,
}

impl WgpuBackend {
    pub fn new(ctx: Context) -> Self {
        let uniform_layout = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });
        let texture_layout = mk_texture_layout(&ctx.device);
        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_layout, &texture_layout],
                push_constant_ranges: &[],
            });
        let white = TextureImage {
            width: 1,
            height: 1,
            levels: vec![vec![255, 255, 255, 255]],
            wrap: WrapMode::Repeat,
        };
        let default_texture = mk_texture(&ctx.device, &ctx.queue, &texture_layout, &white, "default texture");

        Self {
            ctx,
            uniform_layout,
            texture_layout,
            pipeline_layout,
            default_texture,
            next_id: 0,
            buffers: HashMap::new(),
            vertex_arrays: HashMap::new(),
            programs: HashMap::new(),
            textures: HashMap::new(),
            pipelines: HashMap::new(),
            bound: Bound::default(),
            culling: false,
            frame: Frame::default(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn pipeline_for(&mut self, key: &PipelineKey) -> bool {
        if self.pipelines.contains_key(key) {
            return true;
        }
        let Some(program) = self.programs.get(&key.program) else {
            return false;
        };
        let attributes: Vec<wgpu::VertexAttribute> = key
            .layout
            .offsets()
            .filter_map(|(slot, offset, attribute)| match vertex_format(attribute) {
                Some(format) => Some(wgpu::VertexAttribute {
                    offset: offset as wgpu::BufferAddress,
                    shader_location: slot,
                    format,
                }),
                None => {
                    log::error!("unsupported vertex attribute {:?} in slot {}", attribute, slot);
                    None
                }
            })
            .collect();
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: key.layout.stride() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attributes,
        };
        let pipeline = mk_render_pipeline(
            &self.ctx.device,
            &self.pipeline_layout,
            program,
            &[vertex_layout],
            key.culling,
        );
        self.pipelines.insert(key.clone(), pipeline);
        true
    }

    /// Replays everything drawn since the last call into the frame target.
    pub fn finish_frame(&mut self) -> anyhow::Result<()> {
        let frame = std::mem::take(&mut self.frame);
        let alignment = self.ctx.device.limits().min_uniform_buffer_offset_alignment;
        let binding_size = frame
            .draws
            .iter()
            .map(|d| d.uniforms.len() as u32)
            .max()
            .unwrap_or(0)
            .max(16)
            .next_multiple_of(16);
        let slot_size = binding_size.next_multiple_of(alignment);

        let mut arena = vec![0u8; slot_size as usize * frame.draws.len().max(1)];
        for (i, draw) in frame.draws.iter().enumerate() {
            let start = i * slot_size as usize;
            arena[start..start + draw.uniforms.len()].copy_from_slice(&draw.uniforms);
        }
        let uniform_buffer = self
            .ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: &arena,
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let uniform_group = self.ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: NonZeroU64::new(binding_size as u64),
                }),
            }],
            label: Some("frame_uniform_bind_group"),
        });

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let colour_load = match frame.clear {
                Some([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color {
                    r: r as f64,
                    g: g as f64,
                    b: b as f64,
                    a: a as f64,
                }),
                None => wgpu::LoadOp::Load,
            };
            let depth_load = match frame.clear {
                Some(_) => wgpu::LoadOp::Clear(1.0),
                None => wgpu::LoadOp::Load,
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.ctx.target.view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: colour_load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (i, draw) in frame.draws.iter().enumerate() {
                let (Some(pipeline), Some(vertices), Some(indices)) = (
                    self.pipelines.get(&draw.pipeline),
                    self.buffers.get(&draw.vertex_buffer),
                    self.buffers.get(&draw.index_buffer),
                ) else {
                    log::warn!("skipping a draw whose resources were released mid-frame");
                    continue;
                };
                let texture = draw
                    .texture
                    .and_then(|t| self.textures.get(&t))
                    .unwrap_or(&self.default_texture);
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &uniform_group, &[i as u32 * slot_size]);
                render_pass.set_bind_group(1, &texture.bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertices.slice(..));
                render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..draw.count, 0, 0..1);
            }
        }
        self.ctx.queue.submit(iter::once(encoder.finish()));
        log::trace!("submitted frame with {} draws", frame.draws.len());
        Ok(())
    }

    /// Copies the frame target back to the CPU.
    pub async fn read_pixels(&self) -> anyhow::Result<image::RgbaImage> {
        let target = &self.ctx.target;
        let unpadded_row = 4 * target.width;
        let padded_row = unpadded_row.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let output_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            size: (padded_row * target.height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            label: Some("Readback Buffer"),
            mapped_at_creation: false,
        });
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(target.height),
                },
            },
            target.extent(),
        );
        self.ctx.queue.submit(iter::once(encoder.finish()));

        let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
        let buffer_slice = output_buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            tx.send(result).ok();
        });
        self.ctx
            .device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(Duration::from_secs(3)),
            })
            .context("device lost while reading back the frame")?;
        rx.receive()
            .await
            .context("readback channel closed")?
            .context("failed to map the readback buffer")?;

        let data = buffer_slice.get_mapped_range();
        let pixels: Vec<u8> = data
            .chunks(padded_row as usize)
            .flat_map(|row| &row[..unpadded_row as usize])
            .copied()
            .collect();
        drop(data);
        output_buffer.unmap();
        image::RgbaImage::from_raw(target.width, target.height, pixels)
            .context("readback size does not match the frame target")
    }
}

impl Gpu for WgpuBackend {
    fn create_vertex_buffer(&mut self, label: &str, data: &[u8]) -> BufferHandle {
        let handle = BufferHandle(self.next());
        let buffer = self
            .ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.buffers.insert(handle, buffer);
        handle
    }

    fn create_index_buffer(&mut self, label: &str, indices: &[u32]) -> BufferHandle {
        let handle = BufferHandle(self.next());
        let buffer = self
            .ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.buffers.insert(handle, buffer);
        handle
    }

    fn delete_buffer(&mut self, buffer: BufferHandle) {
        if let Some(buffer) = self.buffers.remove(&buffer) {
            buffer.destroy();
        }
    }

    fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        layout: &VertexBufferLayout,
    ) -> VertexArrayHandle {
        let handle = VertexArrayHandle(self.next());
        self.vertex_arrays.insert(
            handle,
            VertexArray {
                buffer,
                layout: layout.clone(),
            },
        );
        handle
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.vertex_arrays.remove(&vertex_array);
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayHandle>) {
        self.bound.vertex_array = vertex_array;
    }

    fn bind_index_buffer(&mut self, buffer: Option<BufferHandle>) {
        self.bound.index_buffer = buffer;
    }

    fn create_program(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle, ShaderError> {
        let linked = reflect::link_program(vertex_source, fragment_source)?;
        let vertex = self
            .ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Vertex Shader"),
                source: wgpu::ShaderSource::Wgsl(vertex_source.into()),
            });
        let fragment = self
            .ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Fragment Shader"),
                source: wgpu::ShaderSource::Wgsl(fragment_source.into()),
            });
        let handle = ProgramHandle(self.next());
        self.programs.insert(
            handle,
            Program {
                vertex,
                fragment,
                staging: vec![0; linked.uniforms.size as usize],
                uniforms: linked.uniforms,
            },
        );
        Ok(handle)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.programs.remove(&program);
        self.pipelines.retain(|key, _| key.program != program);
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.bound.program = program;
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let slot = self.programs.get(&program)?.uniforms.position(name)?;
        Some(UniformLocation {
            program,
            slot: slot as u32,
        })
    }

    fn set_uniform(&mut self, location: &UniformLocation, value: UniformValue) {
        if self.bound.program != Some(location.program) {
            log::warn!("uniform written while its program is not bound");
        }
        let Some(program) = self.programs.get_mut(&location.program) else {
            return;
        };
        let Some(field) = program.uniforms.fields.get(location.slot as usize) else {
            return;
        };
        let bytes = value.to_bytes();
        if bytes.len() != field.size as usize {
            log::warn!(
                "uniform `{}` is {} bytes but was given a {} byte value",
                field.name,
                field.size,
                bytes.len()
            );
        }
        let len = bytes.len().min(field.size as usize);
        let start = field.offset as usize;
        program.staging[start..start + len].copy_from_slice(&bytes[..len]);
    }

    fn create_texture(&mut self, image: &TextureImage) -> TextureHandle {
        let handle = TextureHandle(self.next());
        self.upload_texture(handle, image);
        handle
    }

    fn upload_texture(&mut self, texture: TextureHandle, image: &TextureImage) {
        let uploaded = mk_texture(
            &self.ctx.device,
            &self.ctx.queue,
            &self.texture_layout,
            image,
            &format!("{:?}", texture),
        );
        if let Some(previous) = self.textures.insert(texture, uploaded) {
            previous.texture.destroy();
        }
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        if let Some(texture) = self.textures.remove(&texture) {
            texture.texture.destroy();
        }
    }

    fn bind_texture(&mut self, _unit: u32, texture: Option<TextureHandle>) {
        self.bound.texture = texture;
    }

    fn set_culling(&mut self, enabled: bool) {
        self.culling = enabled;
    }

    fn clear(&mut self, colour: [f32; 4]) {
        // Anything drawn before a clear would be overwritten anyway.
        self.frame.draws.clear();
        self.frame.clear = Some(colour);
    }

    fn draw_indexed(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let (Some(program), Some(vertex_array), Some(index_buffer)) = (
            self.bound.program,
            self.bound.vertex_array,
            self.bound.index_buffer,
        ) else {
            log::warn!("draw_indexed called without a bound program, vertex array and index buffer");
            return;
        };
        let Some(array) = self.vertex_arrays.get(&vertex_array) else {
            log::warn!("draw_indexed called with a deleted vertex array");
            return;
        };
        let key = PipelineKey {
            program,
            layout: array.layout.clone(),
            culling: self.culling,
        };
        let vertex_buffer = array.buffer;
        if !self.pipeline_for(&key) {
            return;
        }
        let uniforms = self
            .programs
            .get(&program)
            .map(|p| p.staging.clone())
            .unwrap_or_default();
        self.frame.draws.push(DrawCall {
            pipeline: key,
            vertex_buffer,
            index_buffer,
            texture: self.bound.texture,
            uniforms,
            count,
        });
    }
}

fn vertex_format(attribute: &VertexAttribute) -> Option<wgpu::VertexFormat> {
    use wgpu::VertexFormat as F;
    Some(match (attribute.kind, attribute.count, attribute.normalized) {
        (AttributeKind::Float, 1, _) => F::Float32,
        (AttributeKind::Float, 2, _) => F::Float32x2,
        (AttributeKind::Float, 3, _) => F::Float32x3,
        (AttributeKind::Float, 4, _) => F::Float32x4,
        (AttributeKind::UnsignedInt, 1, _) => F::Uint32,
        (AttributeKind::UnsignedInt, 2, _) => F::Uint32x2,
        (AttributeKind::UnsignedInt, 3, _) => F::Uint32x3,
        (AttributeKind::UnsignedInt, 4, _) => F::Uint32x4,
        (AttributeKind::UnsignedByte, 2, true) => F::Unorm8x2,
        (AttributeKind::UnsignedByte, 4, true) => F::Unorm8x4,
        (AttributeKind::UnsignedByte, 2, false) => F::Uint8x2,
        (AttributeKind::UnsignedByte, 4, false) => F::Uint8x4,
        _ => return None,
    })
}

fn mk_texture_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("texture_bind_group_layout"),
    })
}

fn mk_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    image: &TextureImage,
    label: &str,
) -> Texture {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: image.levels.len().max(1) as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    for (level, pixels) in image.levels.iter().enumerate() {
        let width = (image.width >> level).max(1);
        let height = (image.height >> level).max(1);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: level as u32,
                origin: wgpu::Origin3d::ZERO,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    let address_mode = match image.wrap {
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    };
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: address_mode,
        address_mode_v: address_mode,
        address_mode_w: address_mode,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: if image.has_mipmaps() {
            wgpu::FilterMode::Linear
        } else {
            wgpu::FilterMode::Nearest
        },
        ..Default::default()
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
        label: Some(label),
    });
    Texture {
        texture,
        bind_group,
    }
}

fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    program: &Program,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    culling: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &program.vertex,
            entry_point: Some(VERTEX_ENTRY_POINT),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &program.fragment,
            entry_point: Some(FRAGMENT_ENTRY_POINT),
            targets: &[Some(wgpu::ColorTargetState {
                format: Context::COLOUR_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: culling.then_some(wgpu::Face::Back),
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: Context::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
