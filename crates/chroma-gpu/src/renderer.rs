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

//! The ordered six-stage chain and the single command buffer it submits
//! once per frame (§4.D, §5). Also owns the shared uniform buffer and the
//! debounced pixel-readback path the inspector's probe tool uses.

use crate::context::GpuContext;
use crate::stage::FragmentStage;

/// Input Interpretation, Color Grade, RRT, ODT, Output Encoding, Display
/// Remap — fixed order, fixed count (§4.D).
pub const STAGE_COUNT: usize = 6;

const STAGE_NAMES: [&str; STAGE_COUNT] =
    ["input_interpretation", "color_grade", "rrt", "odt", "output_encoding", "display_remap"];

const STAGE_SOURCES: [&str; STAGE_COUNT] = [
    include_str!("shaders/input_interpretation.wgsl"),
    include_str!("shaders/color_grade.wgsl"),
    include_str!("shaders/rrt.wgsl"),
    include_str!("shaders/odt.wgsl"),
    include_str!("shaders/output_encoding.wgsl"),
    include_str!("shaders/display_remap.wgsl"),
];

/// Drives the six fixed stages through one shared uniform buffer and one
/// command-buffer submission per frame (§5 "one submission per render").
pub struct PipelineRenderer {
    stages: Vec<FragmentStage>,
    uniform_buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    pending_readback: std::cell::Cell<bool>,
}

impl PipelineRenderer {
    pub async fn new(ctx: &GpuContext, width: u32, height: u32) -> Self {
        let mut stages = Vec::with_capacity(STAGE_COUNT);
        for i in 0..STAGE_COUNT {
            stages.push(FragmentStage::new(ctx, STAGE_NAMES[i], STAGE_SOURCES[i], width, height).await);
        }

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pipeline uniform buffer"),
            size: chroma_core::UNIFORM_SIZE as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self { stages, uniform_buffer, width, height, pending_readback: std::cell::Cell::new(false) }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn stage_name(&self, index: usize) -> &'static str {
        self.stages[index].name
    }

    /// Enables or disables a stage. A disabled stage is bypassed: the next
    /// enabled stage samples whatever texture fed the disabled one (§4.D
    /// "bypass semantics").
    pub fn set_stage_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(stage) = self.stages.get_mut(index) {
            stage.enabled = enabled;
        }
    }

    /// First call allocates every stage's render target; later calls
    /// resize them. Pipelines are never recreated (§4.C).
    pub fn set_size(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        for stage in &mut self.stages {
            stage.resize(device, width, height);
        }
        self.width = width;
        self.height = height;
    }

    pub fn update_uniforms(&self, queue: &wgpu::Queue, bytes: &[u8; chroma_core::UNIFORM_SIZE]) {
        queue.write_buffer(&self.uniform_buffer, 0, bytes);
    }

    /// Renders every enabled, compiled stage in order inside one command
    /// encoder and submits once (§5). A stage that is disabled or never
    /// compiled is skipped and the chain's current input passes straight
    /// through to the next stage untouched.
    pub fn render(&self, ctx: &GpuContext, source_view: &wgpu::TextureView) {
        let mut encoder =
            ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("pipeline render") });

        let mut current_input = source_view;
        for stage in &self.stages {
            if stage.enabled && stage.is_ready() {
                stage.encode(&ctx.device, &mut encoder, current_input, &self.uniform_buffer);
                current_input = stage.output_view();
            }
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
    }

    /// The render target a viewer should show for stage `index`: that
    /// stage's own output if it ran, otherwise the nearest upstream stage
    /// that did. `None` means no stage up to and including `index` ran, so
    /// the caller's original source texture is still the right thing to
    /// display (§4.D "getStageOutput").
    pub fn get_stage_output(&self, index: usize) -> Option<&wgpu::TextureView> {
        self.stages[..=index].iter().rev().find(|s| s.enabled && s.is_ready()).map(|s| s.output_view())
    }

    pub fn get_stage_texture(&self, index: usize) -> Option<&wgpu::Texture> {
        self.stages[..=index].iter().rev().find(|s| s.enabled && s.is_ready()).map(|s| s.output_texture())
    }

    /// Reads back one texel as linear RGBA. Every render target in this
    /// pipeline is [`crate::stage::TARGET_FORMAT`] (half-float), so the
    /// decode policy never has to branch on format.
    ///
    /// Returns `None` immediately if a previous readback is still in
    /// flight, debouncing repeated probe requests (§4.D "single-slot
    /// pending-flag debounce"), or if `(x, y)` is out of bounds.
    pub fn read_pixel(&self, ctx: &GpuContext, texture: &wgpu::Texture, x: u32, y: u32) -> Option<[f32; 4]> {
        if self.pending_readback.replace(true) {
            return None;
        }
        let result = self.read_pixel_blocking(ctx, texture, x, y);
        self.pending_readback.set(false);
        result
    }

    fn read_pixel_blocking(&self, ctx: &GpuContext, texture: &wgpu::Texture, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= texture.width() || y >= texture.height() {
            return None;
        }

        const STAGING_SIZE: u64 = 256;
        let staging = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pixel readback staging buffer"),
            size: STAGING_SIZE,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder =
            ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("pixel readback") });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(256), rows_per_image: Some(1) },
            },
            wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
        );
        ctx.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        ctx.device.poll(wgpu::Maintain::Wait);

        let mapped = receiver.recv().ok()?;
        mapped.ok()?;

        let bytes = slice.get_mapped_range();
        let read_channel = |offset: usize| -> f32 {
            let raw = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
            chroma_core::decode_half(raw)
        };
        let pixel = [read_channel(0), read_channel(2), read_channel(4), read_channel(6)];
        drop(bytes);
        staging.unmap();

        Some(pixel)
    }
}
