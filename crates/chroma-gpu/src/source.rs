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

//! Upload paths that turn a CPU-side image into a render target in
//! [`crate::stage::TARGET_FORMAT`], the one texture kind every pipeline
//! stage reads (§4.E).

use crate::context::GpuContext;
use crate::stage::{FragmentStage, TARGET_FORMAT};

const DDS_DECOMPRESS_WGSL: &str = include_str!("shaders/dds_decompress.wgsl");
const FLOAT_UPLOAD_WGSL: &str = include_str!("shaders/float_upload.wgsl");

/// Upload entry points for the three ways a source image reaches the
/// pipeline (§4.E): a decoded float32 array, a decoded half-float array,
/// or a still block-compressed DDS image.
pub struct SourceLoader;

impl SourceLoader {
    /// Row-flips `pixels` (bottom-first source rows to top-first), uploads
    /// them as a temporary `Rgba32Float` texture, then runs a one-shot pass
    /// converting it down to [`TARGET_FORMAT`].
    pub fn upload_float32(ctx: &GpuContext, pixels: &[f32], width: u32, height: u32) -> wgpu::Texture {
        let mut flipped = pixels.to_vec();
        chroma_core::flip_rows_in_place(&mut flipped, height as usize, width as usize * 4);

        let source_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("float32 source upload"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &source_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&flipped),
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(width * 16), rows_per_image: Some(height) },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
        let source_view = source_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let output = one_shot_pass(
            ctx,
            FLOAT_UPLOAD_WGSL,
            "float32 upload pass",
            &source_view,
            wgpu::TextureSampleType::Float { filterable: false },
            width,
            height,
        );
        source_texture.destroy();
        output
    }

    /// Row-flips `pixels` (half-float bit patterns) and uploads them
    /// straight into [`TARGET_FORMAT`] — no conversion pass needed, since
    /// the source is already the pipeline's native texel format.
    pub fn upload_float16(ctx: &GpuContext, pixels: &[u16], width: u32, height: u32) -> wgpu::Texture {
        let mut flipped = pixels.to_vec();
        flip_rows_u16_in_place(&mut flipped, height as usize, width as usize * 4);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("float16 source upload"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&flipped),
            wgpu::TexelCopyBufferLayout { offset: 0, bytes_per_row: Some(width * 8), rows_per_image: Some(height) },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
        texture
    }

    /// Uploads a parsed DDS image (§4.B): an uncompressed image takes the
    /// same path as [`Self::upload_float32`]; a still block-compressed
    /// image is handed to the GPU's native BC decoder via a one-shot pass,
    /// then its compressed texture is destroyed.
    pub fn upload_dds(ctx: &GpuContext, parsed: &chroma_core::ParsedDds) -> wgpu::Texture {
        match parsed {
            chroma_core::ParsedDds::Uncompressed(img) => Self::upload_float32(ctx, &img.pixels, img.width, img.height),
            chroma_core::ParsedDds::Compressed(img) => upload_compressed(ctx, img),
        }
    }
}

fn upload_compressed(ctx: &GpuContext, img: &chroma_core::dds::CompressedImage) -> wgpu::Texture {
    let format = compressed_wgpu_format(img.format);
    let compressed_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(img.label),
        size: wgpu::Extent3d { width: img.width, height: img.height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &compressed_texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &img.blocks,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(img.blocks_per_row * img.block_size),
            rows_per_image: Some(img.blocks_per_col),
        },
        wgpu::Extent3d { width: img.width, height: img.height, depth_or_array_layers: 1 },
    );
    let view = compressed_texture.create_view(&wgpu::TextureViewDescriptor::default());

    let output = one_shot_pass(
        ctx,
        DDS_DECOMPRESS_WGSL,
        "dds decompress pass",
        &view,
        wgpu::TextureSampleType::Float { filterable: false },
        img.width,
        img.height,
    );
    compressed_texture.destroy();
    output
}

fn compressed_wgpu_format(format: chroma_core::dds::CompressedFormat) -> wgpu::TextureFormat {
    use chroma_core::dds::CompressedFormat::*;
    match format {
        Bc1 => wgpu::TextureFormat::Bc1RgbaUnorm,
        Bc2 => wgpu::TextureFormat::Bc2RgbaUnorm,
        Bc3 => wgpu::TextureFormat::Bc3RgbaUnorm,
        Bc4 => wgpu::TextureFormat::Bc4RUnorm,
        Bc5 => wgpu::TextureFormat::Bc5RgUnorm,
        Bc6h => wgpu::TextureFormat::Bc6hRgbUfloat,
        Bc7 => wgpu::TextureFormat::Bc7RgbaUnorm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_core::dds::CompressedFormat;

    #[test]
    fn compressed_format_maps_to_expected_wgpu_format() {
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc1), wgpu::TextureFormat::Bc1RgbaUnorm);
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc2), wgpu::TextureFormat::Bc2RgbaUnorm);
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc3), wgpu::TextureFormat::Bc3RgbaUnorm);
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc4), wgpu::TextureFormat::Bc4RUnorm);
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc5), wgpu::TextureFormat::Bc5RgUnorm);
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc6h), wgpu::TextureFormat::Bc6hRgbUfloat);
        assert_eq!(compressed_wgpu_format(CompressedFormat::Bc7), wgpu::TextureFormat::Bc7RgbaUnorm);
    }
}

fn flip_rows_u16_in_place(pixels: &mut [u16], height: usize, row_stride: usize) {
    for row in 0..height / 2 {
        let other = height - 1 - row;
        let (top, bottom) = pixels.split_at_mut(other * row_stride);
        let top_row = &mut top[row * row_stride..(row + 1) * row_stride];
        let bottom_row = &mut bottom[..row_stride];
        top_row.swap_with_slice(bottom_row);
    }
}

/// Samples `input_view` with the shared fullscreen-triangle vertex shader
/// and one bind-group slot (no uniform buffer — every one-shot upload pass
/// is a pure format conversion), writing into a fresh [`TARGET_FORMAT`]
/// texture.
fn one_shot_pass(
    ctx: &GpuContext,
    shader_source: &str,
    label: &str,
    input_view: &wgpu::TextureView,
    sample_type: wgpu::TextureSampleType,
    width: u32,
    height: u32,
) -> wgpu::Texture {
    let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture { sample_type, view_dimension: wgpu::TextureViewDimension::D2, multisampled: false },
            count: None,
        }],
    });

    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
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
            targets: &[Some(wgpu::ColorTargetState { format: TARGET_FORMAT, blend: None, write_mask: wgpu::ColorWrites::ALL })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    let (texture, view) = FragmentStage::create_target(&ctx.device, label, width, height);

    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(input_view) }],
    });

    let mut encoder = ctx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
    ctx.queue.submit(std::iter::once(encoder.finish()));

    texture
}
