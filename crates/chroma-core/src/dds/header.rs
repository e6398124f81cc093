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

//! Raw DDS header parsing: magic, the 124-byte `DDS_HEADER`, its nested
//! 32-byte pixel-format block, and the optional 20-byte DX10 extended header
//! (§6 "DDS file format").

use super::error::DdsError;

pub const MAGIC: &[u8; 4] = b"DDS ";
pub const HEADER_SIZE: usize = 124;
pub const PIXEL_FORMAT_SIZE: usize = 32;
pub const DX10_HEADER_SIZE: usize = 20;

pub const DDPF_ALPHAPIXELS: u32 = 0x1;
pub const DDPF_FOURCC: u32 = 0x4;
pub const DDPF_RGB: u32 = 0x40;
pub const DDPF_LUMINANCE: u32 = 0x20000;

#[derive(Debug, Clone, Copy)]
pub struct PixelFormat {
    pub flags: u32,
    pub four_cc: u32,
    pub rgb_bit_count: u32,
    pub r_mask: u32,
    pub g_mask: u32,
    pub b_mask: u32,
    pub a_mask: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct DdsHeader {
    pub height: u32,
    pub width: u32,
    pub pixel_format: PixelFormat,
}

#[derive(Debug, Clone, Copy)]
pub struct Dx10Header {
    pub dxgi_format: u32,
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, DdsError> {
    bytes
        .get(offset..offset + 4)
        .map(|s| u32::from_le_bytes(s.try_into().unwrap()))
        .ok_or_else(|| DdsError::Truncated(format!("expected 4 bytes at offset {offset}")))
}

/// Parses the magic + 124-byte header + 32-byte pixel format. Does not read
/// the DX10 extension; call [`read_dx10_header`] separately once the FourCC
/// is known to be `"DX10"`.
pub fn read_header(bytes: &[u8]) -> Result<DdsHeader, DdsError> {
    if bytes.len() < 4 || &bytes[0..4] != MAGIC {
        return Err(DdsError::InvalidContainer("missing 'DDS ' magic".into()));
    }

    let header_size = read_u32(bytes, 4)?;
    if header_size as usize != HEADER_SIZE {
        return Err(DdsError::InvalidContainer(format!(
            "header size {header_size} != {HEADER_SIZE}"
        )));
    }

    let height = read_u32(bytes, 4 + 8)?;
    let width = read_u32(bytes, 4 + 12)?;

    let pf_base = 4 + 72;
    let pf_size = read_u32(bytes, pf_base)?;
    if pf_size as usize != PIXEL_FORMAT_SIZE {
        return Err(DdsError::InvalidContainer(format!(
            "pixel format size {pf_size} != {PIXEL_FORMAT_SIZE}"
        )));
    }

    let pixel_format = PixelFormat {
        flags: read_u32(bytes, pf_base + 4)?,
        four_cc: read_u32(bytes, pf_base + 8)?,
        rgb_bit_count: read_u32(bytes, pf_base + 12)?,
        r_mask: read_u32(bytes, pf_base + 16)?,
        g_mask: read_u32(bytes, pf_base + 20)?,
        b_mask: read_u32(bytes, pf_base + 24)?,
        a_mask: read_u32(bytes, pf_base + 28)?,
    };

    Ok(DdsHeader { height, width, pixel_format })
}

/// Byte offset of the first byte past the base header (where the DX10
/// extension, if present, or the pixel data begins).
pub const BASE_HEADER_END: usize = 4 + HEADER_SIZE;

pub fn read_dx10_header(bytes: &[u8]) -> Result<Dx10Header, DdsError> {
    let dxgi_format = bytes
        .get(BASE_HEADER_END..BASE_HEADER_END + 4)
        .map(|s| u32::from_le_bytes(s.try_into().unwrap()))
        .ok_or_else(|| DdsError::Truncated("truncated DX10 header".into()))?;
    Ok(Dx10Header { dxgi_format })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header(fourcc: u32) -> Vec<u8> {
        let mut buf = vec![0u8; BASE_HEADER_END];
        buf[0..4].copy_from_slice(MAGIC);
        buf[4..8].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        buf[4 + 8..4 + 12].copy_from_slice(&4u32.to_le_bytes()); // height
        buf[4 + 12..4 + 16].copy_from_slice(&4u32.to_le_bytes()); // width
        let pf_base = 4 + 72;
        buf[pf_base..pf_base + 4].copy_from_slice(&(PIXEL_FORMAT_SIZE as u32).to_le_bytes());
        buf[pf_base + 4..pf_base + 8].copy_from_slice(&DDPF_FOURCC.to_le_bytes());
        buf[pf_base + 8..pf_base + 12].copy_from_slice(&fourcc.to_le_bytes());
        buf
    }

    #[test]
    fn rejects_missing_magic() {
        let bytes = vec![0u8; 200];
        assert!(matches!(read_header(&bytes), Err(DdsError::InvalidContainer(_))));
    }

    #[test]
    fn rejects_wrong_header_size() {
        let mut buf = minimal_header(0);
        buf[4..8].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(read_header(&buf), Err(DdsError::InvalidContainer(_))));
    }

    #[test]
    fn parses_minimal_valid_header() {
        let buf = minimal_header(super::super::formats::FOURCC_DXT1);
        let header = read_header(&buf).unwrap();
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 4);
        assert_eq!(header.pixel_format.four_cc, super::super::formats::FOURCC_DXT1);
    }
}
