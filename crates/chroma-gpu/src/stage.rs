// Copyright 2026 the chroma-gpu authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! One fragment-shader pass of the pipeline (§4.C). Every stage shares the
//! same bind-group shape — binding 0 the upstream texture, binding 1 the
//! uniform buffer, no sampler, since stages never resize between each
//! other and a direct texel load is exact where a filtered sample would
//! just blur the edges — and the same fullscreen-triangle vertex shader.

use crate::context::GpuContext;

/// Every stage's render target and every uploaded source texture share this
/// format, so the rest of the pipeline only ever deals with one texture
/// kind regardless of how the image entered (§4.E).
pub const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");
const FULLSCREEN_VERTEX_WGSL: &str = include_str!("shaders/fullscreen_vertex.wgsl");

/// One pass in [`crate::renderer::PipelineRenderer`]'s linear stage chain.
///
/// A stage whose shader fails to compile nulls its own pipeline and logs
/// instead of propagating an error (§7) — [`PipelineRenderer::render`]
/// treats it exactly like a disabled stage.
pub struct FragmentStage {
    pub name: &'static str,
    pub enabled: bool,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline: Option<wgpu::RenderPipeline>,
    width: u32,
    height: u32,
}

impl FragmentStage {
    pub async fn new(
        ctx: &GpuContext,
        name: &'static str,
        fragment_source: &str,
        width: u32,
        height: u32,
    ) -> Self {
        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(name),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline = Self::compile_pipeline(ctx, name, fragment_source, &bind_group_layout).await;
        let (texture, view) = Self::create_target(&ctx.device, name, width, height);

        Self { name, enabled: true, texture, view, bind_group_layout, pipeline, width, height }
    }

    async fn compile_pipeline(
        ctx: &GpuContext,
        name: &str,
        fragment_source: &str,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Option<wgpu::RenderPipeline> {
        let source = format!("{COMMON_WGSL}\n{FULLSCREEN_VERTEX_WGSL}\n{fragment_source}");

        ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(name),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(name),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        match ctx.device.pop_error_scope().await {
            Some(error) => {
                log::error!("stage \"{name}\" failed to compile, disabling it: {error}");
                None
            }
            None => Some(pipeline),
        }
    }

    pub(crate) fn create_target(device: &wgpu::Device, name: &str, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    pub fn output_view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn output_texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn is_ready(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Destroys and reallocates the render target only; the pipeline and
    /// its layout are untouched (§4.C "never reallocates pipelines").
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.texture.destroy();
        let (texture, view) = Self::create_target(device, self.name, width, height);
        self.texture = texture;
        self.view = view;
        self.width = width;
        self.height = height;
    }

    /// Records this stage's render pass: clears the target, binds
    /// `input_view` and the shared uniform buffer, draws the fullscreen
    /// triangle. A no-op if the shader never compiled.
    pub fn encode(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        input_view: &wgpu::TextureView,
        uniform_buffer: &wgpu::Buffer,
    ) {
        let Some(pipeline) = &self.pipeline else {
            log::warn!("stage \"{}\" has no compiled pipeline, skipping", self.name);
            return;
        };

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(self.name),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(input_view) },
                wgpu::BindGroupEntry { binding: 1, resource: uniform_buffer.as_entire_binding() },
            ],
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.name),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &self.view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    pub fn destroy(&mut self) {
        self.texture.destroy();
    }
}
