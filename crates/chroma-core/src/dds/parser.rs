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

//! Top-level DDS decoding entry point: validates the container, dispatches
//! on pixel format, and produces either raw compressed blocks or a decoded
//! RGBA float32 pixel array (§4.B).

use super::decode::{
    decode_bitmask_channel, decode_half, decode_r11g11b10f, snorm16, snorm8,
};
use super::error::DdsError;
use super::formats::{CompressedFormat, DxgiFormat, FOURCC_DX10};
use super::header::{
    read_dx10_header, read_header, DDPF_ALPHAPIXELS, DDPF_FOURCC, DDPF_LUMINANCE, DDPF_RGB,
    BASE_HEADER_END, DX10_HEADER_SIZE,
};
use super::{CompressedImage, ParsedDds, UncompressedImage};

fn ceil_div(n: u32, d: u32) -> u32 {
    (n + d - 1) / d
}

pub fn parse_dds(bytes: &[u8]) -> Result<ParsedDds, DdsError> {
    let header = read_header(bytes)?;
    let pf = header.pixel_format;
    let width = header.width;
    let height = header.height;

    let is_dx10 = pf.flags & DDPF_FOURCC != 0 && pf.four_cc == FOURCC_DX10;
    let data_offset = if is_dx10 {
        BASE_HEADER_END + DX10_HEADER_SIZE
    } else {
        BASE_HEADER_END
    };

    if is_dx10 {
        let dx10 = read_dx10_header(bytes)?;
        let dxgi = DxgiFormat::from_u32(dx10.dxgi_format).ok_or_else(|| {
            DdsError::UnsupportedFormat(format!("unrecognised DXGI format {}", dx10.dxgi_format))
        })?;

        if let Some(compressed) = CompressedFormat::from_dxgi(dxgi) {
            return read_compressed(bytes, data_offset, width, height, compressed);
        }

        let pixels = decode_dxgi_uncompressed(bytes, data_offset, width, height, dxgi)?;
        return Ok(ParsedDds::Uncompressed(UncompressedImage {
            width,
            height,
            pixels,
            label: format!("{dxgi:?}"),
        }));
    }

    if pf.flags & DDPF_FOURCC != 0 {
        if let Some(compressed) = CompressedFormat::from_fourcc(pf.four_cc) {
            return read_compressed(bytes, data_offset, width, height, compressed);
        }
        return Err(DdsError::UnsupportedFormat(format!(
            "unrecognised legacy FourCC 0x{:08x}",
            pf.four_cc
        )));
    }

    if pf.flags & (DDPF_RGB | DDPF_LUMINANCE) != 0 {
        let pixels = decode_bitmask_uncompressed(bytes, data_offset, width, height, &pf)?;
        return Ok(ParsedDds::Uncompressed(UncompressedImage {
            width,
            height,
            pixels,
            label: "legacy bitmask".to_string(),
        }));
    }

    Err(DdsError::UnsupportedFormat(
        "pixel format declares neither FourCC, RGB, nor luminance".to_string(),
    ))
}

fn read_compressed(
    bytes: &[u8],
    data_offset: usize,
    width: u32,
    height: u32,
    format: CompressedFormat,
) -> Result<ParsedDds, DdsError> {
    let blocks_per_row = ceil_div(width, 4);
    let blocks_per_col = ceil_div(height, 4);
    let block_size = format.block_size();
    let total = (blocks_per_row * blocks_per_col * block_size) as usize;

    let blocks = bytes
        .get(data_offset..data_offset + total)
        .ok_or_else(|| {
            DdsError::Truncated(format!(
                "expected {total} bytes of {} block data, buffer holds {}",
                format.label(),
                bytes.len().saturating_sub(data_offset)
            ))
        })?
        .to_vec();

    Ok(ParsedDds::Compressed(CompressedImage {
        width,
        height,
        format,
        blocks,
        block_size,
        blocks_per_row,
        blocks_per_col,
        label: format.label(),
    }))
}

fn pixel_data<'a>(
    bytes: &'a [u8],
    data_offset: usize,
    width: u32,
    height: u32,
    bytes_per_pixel: u32,
) -> Result<&'a [u8], DdsError> {
    let total = (width as usize) * (height as usize) * (bytes_per_pixel as usize);
    bytes.get(data_offset..data_offset + total).ok_or_else(|| {
        DdsError::Truncated(format!(
            "expected {total} bytes of pixel data, buffer holds {}",
            bytes.len().saturating_sub(data_offset)
        ))
    })
}

fn decode_dxgi_uncompressed(
    bytes: &[u8],
    data_offset: usize,
    width: u32,
    height: u32,
    format: DxgiFormat,
) -> Result<Vec<f32>, DdsError> {
    use DxgiFormat::*;

    let pixel_count = (width as usize) * (height as usize);
    let mut out = Vec::with_capacity(pixel_count * 4);

    macro_rules! channel_bytes {
        ($bpp:expr) => {
            pixel_data(bytes, data_offset, width, height, $bpp)?
        };
    }

    match format {
        R32G32B32A32Float => {
            let data = channel_bytes!(16);
            for chunk in data.chunks_exact(16) {
                for i in 0..4 {
                    out.push(f32::from_le_bytes(chunk[i * 4..i * 4 + 4].try_into().unwrap()));
                }
            }
        }
        R32G32B32Float => {
            let data = channel_bytes!(12);
            for chunk in data.chunks_exact(12) {
                for i in 0..3 {
                    out.push(f32::from_le_bytes(chunk[i * 4..i * 4 + 4].try_into().unwrap()));
                }
                out.push(1.0);
            }
        }
        R16G16B16A16Float => {
            let data = channel_bytes!(8);
            for chunk in data.chunks_exact(8) {
                for i in 0..4 {
                    out.push(decode_half(u16::from_le_bytes(
                        chunk[i * 2..i * 2 + 2].try_into().unwrap(),
                    )));
                }
            }
        }
        R16G16B16A16Unorm => {
            let data = channel_bytes!(8);
            for chunk in data.chunks_exact(8) {
                for i in 0..4 {
                    let v = u16::from_le_bytes(chunk[i * 2..i * 2 + 2].try_into().unwrap());
                    out.push(v as f32 / 65535.0);
                }
            }
        }
        R16G16B16A16Snorm => {
            let data = channel_bytes!(8);
            for chunk in data.chunks_exact(8) {
                for i in 0..4 {
                    out.push(snorm16(u16::from_le_bytes(
                        chunk[i * 2..i * 2 + 2].try_into().unwrap(),
                    )));
                }
            }
        }
        R32G32Float => {
            let data = channel_bytes!(8);
            for chunk in data.chunks_exact(8) {
                out.push(f32::from_le_bytes(chunk[0..4].try_into().unwrap()));
                out.push(f32::from_le_bytes(chunk[4..8].try_into().unwrap()));
                out.push(0.0);
                out.push(1.0);
            }
        }
        R10G10B10A2Unorm => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                let bits = u32::from_le_bytes(chunk.try_into().unwrap());
                out.push((bits & 0x3FF) as f32 / 1023.0);
                out.push(((bits >> 10) & 0x3FF) as f32 / 1023.0);
                out.push(((bits >> 20) & 0x3FF) as f32 / 1023.0);
                out.push(((bits >> 30) & 0x3) as f32 / 3.0);
            }
        }
        R11G11B10Float => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                let bits = u32::from_le_bytes(chunk.try_into().unwrap());
                let (r, g, b) = decode_r11g11b10f(bits);
                out.push(r);
                out.push(g);
                out.push(b);
                out.push(1.0);
            }
        }
        R8G8B8A8Unorm | R8G8B8A8UnormSrgb => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                for &b in chunk {
                    out.push(b as f32 / 255.0);
                }
            }
        }
        R8G8B8A8Snorm => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                for &b in chunk {
                    out.push(snorm8(b));
                }
            }
        }
        R16G16Float => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                out.push(decode_half(u16::from_le_bytes(chunk[0..2].try_into().unwrap())));
                out.push(decode_half(u16::from_le_bytes(chunk[2..4].try_into().unwrap())));
                out.push(0.0);
                out.push(1.0);
            }
        }
        R16G16Unorm => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                let r = u16::from_le_bytes(chunk[0..2].try_into().unwrap());
                let g = u16::from_le_bytes(chunk[2..4].try_into().unwrap());
                out.push(r as f32 / 65535.0);
                out.push(g as f32 / 65535.0);
                out.push(0.0);
                out.push(1.0);
            }
        }
        R16G16Snorm => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                out.push(snorm16(u16::from_le_bytes(chunk[0..2].try_into().unwrap())));
                out.push(snorm16(u16::from_le_bytes(chunk[2..4].try_into().unwrap())));
                out.push(0.0);
                out.push(1.0);
            }
        }
        R32Float => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                out.push(f32::from_le_bytes(chunk.try_into().unwrap()));
                out.push(0.0);
                out.push(0.0);
                out.push(1.0);
            }
        }
        R8G8Unorm => {
            let data = channel_bytes!(2);
            for chunk in data.chunks_exact(2) {
                out.push(chunk[0] as f32 / 255.0);
                out.push(chunk[1] as f32 / 255.0);
                out.push(0.0);
                out.push(1.0);
            }
        }
        R8G8Snorm => {
            let data = channel_bytes!(2);
            for chunk in data.chunks_exact(2) {
                out.push(snorm8(chunk[0]));
                out.push(snorm8(chunk[1]));
                out.push(0.0);
                out.push(1.0);
            }
        }
        R16Float => {
            let data = channel_bytes!(2);
            for chunk in data.chunks_exact(2) {
                let v = decode_half(u16::from_le_bytes(chunk.try_into().unwrap()));
                out.push(v);
                out.push(v);
                out.push(v);
                out.push(1.0);
            }
        }
        R16Unorm => {
            let data = channel_bytes!(2);
            for chunk in data.chunks_exact(2) {
                let v = u16::from_le_bytes(chunk.try_into().unwrap()) as f32 / 65535.0;
                out.push(v);
                out.push(v);
                out.push(v);
                out.push(1.0);
            }
        }
        R16Snorm => {
            let data = channel_bytes!(2);
            for chunk in data.chunks_exact(2) {
                let v = snorm16(u16::from_le_bytes(chunk.try_into().unwrap()));
                out.push(v);
                out.push(v);
                out.push(v);
                out.push(1.0);
            }
        }
        R8Unorm => {
            let data = channel_bytes!(1);
            for &b in data {
                let v = b as f32 / 255.0;
                out.push(v);
                out.push(v);
                out.push(v);
                out.push(1.0);
            }
        }
        R8Snorm => {
            let data = channel_bytes!(1);
            for &b in data {
                let v = snorm8(b);
                out.push(v);
                out.push(v);
                out.push(v);
                out.push(1.0);
            }
        }
        A8Unorm => {
            let data = channel_bytes!(1);
            for &b in data {
                out.push(0.0);
                out.push(0.0);
                out.push(0.0);
                out.push(b as f32 / 255.0);
            }
        }
        B8G8R8A8Unorm | B8G8R8A8UnormSrgb => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                out.push(chunk[2] as f32 / 255.0);
                out.push(chunk[1] as f32 / 255.0);
                out.push(chunk[0] as f32 / 255.0);
                out.push(chunk[3] as f32 / 255.0);
            }
        }
        B8G8R8X8Unorm | B8G8R8X8UnormSrgb => {
            let data = channel_bytes!(4);
            for chunk in data.chunks_exact(4) {
                out.push(chunk[2] as f32 / 255.0);
                out.push(chunk[1] as f32 / 255.0);
                out.push(chunk[0] as f32 / 255.0);
                out.push(1.0);
            }
        }
        Bc1Unorm | Bc1UnormSrgb | Bc2Unorm | Bc2UnormSrgb | Bc3Unorm | Bc3UnormSrgb
        | Bc4Unorm | Bc4Snorm | Bc5Unorm | Bc5Snorm | Bc6hUf16 | Bc6hSf16 | Bc7Unorm
        | Bc7UnormSrgb => unreachable!("block-compressed formats are handled by read_compressed"),
    }

    Ok(out)
}

fn decode_bitmask_uncompressed(
    bytes: &[u8],
    data_offset: usize,
    width: u32,
    height: u32,
    pf: &super::header::PixelFormat,
) -> Result<Vec<f32>, DdsError> {
    let bytes_per_pixel = (pf.rgb_bit_count / 8).max(1);
    let data = pixel_data(bytes, data_offset, width, height, bytes_per_pixel)?;

    let has_alpha = pf.flags & DDPF_ALPHAPIXELS != 0;
    let is_luminance = pf.flags & DDPF_LUMINANCE != 0;

    let mut out = Vec::with_capacity((width as usize) * (height as usize) * 4);
    for chunk in data.chunks_exact(bytes_per_pixel as usize) {
        let mut raw = [0u8; 4];
        raw[..chunk.len().min(4)].copy_from_slice(&chunk[..chunk.len().min(4)]);
        let value = u32::from_le_bytes(raw);

        if is_luminance {
            let l = decode_bitmask_channel(value, pf.r_mask);
            let a = if has_alpha { decode_bitmask_channel(value, pf.a_mask) } else { 1.0 };
            out.push(l);
            out.push(l);
            out.push(l);
            out.push(a);
        } else {
            let r = decode_bitmask_channel(value, pf.r_mask);
            let g = decode_bitmask_channel(value, pf.g_mask);
            let b = decode_bitmask_channel(value, pf.b_mask);
            let a = if has_alpha { decode_bitmask_channel(value, pf.a_mask) } else { 1.0 };
            out.push(r);
            out.push(g);
            out.push(b);
            out.push(a);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dds::formats::FOURCC_DXT1;

    fn build_dx10_header(dxgi: u32, width: u32, height: u32) -> Vec<u8> {
        let mut buf = vec![0u8; BASE_HEADER_END + DX10_HEADER_SIZE];
        buf[0..4].copy_from_slice(b"DDS ");
        buf[4..8].copy_from_slice(&124u32.to_le_bytes());
        buf[12..16].copy_from_slice(&height.to_le_bytes());
        buf[16..20].copy_from_slice(&width.to_le_bytes());
        let pf_base = 4 + 72;
        buf[pf_base..pf_base + 4].copy_from_slice(&32u32.to_le_bytes());
        buf[pf_base + 4..pf_base + 8].copy_from_slice(&DDPF_FOURCC.to_le_bytes());
        buf[pf_base + 8..pf_base + 12].copy_from_slice(&FOURCC_DX10.to_le_bytes());
        buf[BASE_HEADER_END..BASE_HEADER_END + 4].copy_from_slice(&dxgi.to_le_bytes());
        buf
    }

    #[test]
    fn parses_rgba32f_uncompressed() {
        let mut buf = build_dx10_header(2, 1, 1); // R32G32B32A32Float
        buf.extend_from_slice(&1.0f32.to_le_bytes());
        buf.extend_from_slice(&0.5f32.to_le_bytes());
        buf.extend_from_slice(&0.25f32.to_le_bytes());
        buf.extend_from_slice(&1.0f32.to_le_bytes());

        let parsed = parse_dds(&buf).unwrap();
        match parsed {
            ParsedDds::Uncompressed(img) => {
                assert_eq!(img.pixels, vec![1.0, 0.5, 0.25, 1.0]);
            }
            _ => panic!("expected uncompressed"),
        }
    }

    #[test]
    fn parses_bc1_compressed_block_count() {
        let mut buf = vec![0u8; BASE_HEADER_END];
        buf[0..4].copy_from_slice(b"DDS ");
        buf[4..8].copy_from_slice(&124u32.to_le_bytes());
        buf[12..16].copy_from_slice(&8u32.to_le_bytes()); // height
        buf[16..20].copy_from_slice(&8u32.to_le_bytes()); // width
        let pf_base = 4 + 72;
        buf[pf_base..pf_base + 4].copy_from_slice(&32u32.to_le_bytes());
        buf[pf_base + 4..pf_base + 8].copy_from_slice(&DDPF_FOURCC.to_le_bytes());
        buf[pf_base + 8..pf_base + 12].copy_from_slice(&FOURCC_DXT1.to_le_bytes());
        buf.extend(std::iter::repeat(0u8).take(4 * 8)); // 2x2 blocks * 8 bytes

        let parsed = parse_dds(&buf).unwrap();
        match parsed {
            ParsedDds::Compressed(img) => {
                assert_eq!(img.blocks_per_row, 2);
                assert_eq!(img.blocks_per_col, 2);
                assert_eq!(img.blocks.len(), 32);
            }
            _ => panic!("expected compressed"),
        }
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let buf = build_dx10_header(2, 4, 4); // declares 4x4 but carries no pixel data
        assert!(matches!(parse_dds(&buf), Err(DdsError::Truncated(_))));
    }

    #[test]
    fn unrecognised_dxgi_format_is_rejected() {
        let buf = build_dx10_header(u32::MAX, 1, 1);
        assert!(matches!(parse_dds(&buf), Err(DdsError::UnsupportedFormat(_))));
    }
}
