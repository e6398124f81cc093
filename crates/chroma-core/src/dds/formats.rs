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

//! FourCC codes and DXGI format numbers recognised by the DDS parser (§4.B).
//!
//! The DXGI numeric values below are the standard DirectX values (e.g.
//! `DXGI_FORMAT_BC7_UNORM = 98`); the parser recognises the formats the
//! inspector actually needs, not the full DXGI enum.

#![allow(non_upper_case_globals)]

/// Reads a 4-byte little-endian FourCC tag as a `u32`, the way it appears in
/// a DDS pixel-format header.
const fn fourcc(tag: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*tag)
}

pub const FOURCC_DXT1: u32 = fourcc(b"DXT1");
pub const FOURCC_DXT3: u32 = fourcc(b"DXT3");
pub const FOURCC_DXT5: u32 = fourcc(b"DXT5");
pub const FOURCC_ATI1: u32 = fourcc(b"ATI1");
pub const FOURCC_BC4U: u32 = fourcc(b"BC4U");
pub const FOURCC_ATI2: u32 = fourcc(b"ATI2");
pub const FOURCC_BC5U: u32 = fourcc(b"BC5U");
pub const FOURCC_DX10: u32 = fourcc(b"DX10");

/// A DXGI numeric format tag, restricted to the values §4.B documents as
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DxgiFormat {
    R32G32B32A32Float = 2,
    R32G32B32Float = 6,
    R16G16B16A16Float = 10,
    R16G16B16A16Unorm = 11,
    R16G16B16A16Snorm = 13,
    R32G32Float = 16,
    R10G10B10A2Unorm = 24,
    R11G11B10Float = 26,
    R8G8B8A8Unorm = 28,
    R8G8B8A8UnormSrgb = 29,
    R8G8B8A8Snorm = 31,
    R16G16Float = 34,
    R16G16Unorm = 35,
    R16G16Snorm = 37,
    R32Float = 41,
    R8G8Unorm = 49,
    R8G8Snorm = 51,
    R16Float = 54,
    R16Unorm = 56,
    R16Snorm = 58,
    R8Unorm = 61,
    R8Snorm = 63,
    A8Unorm = 65,
    Bc1Unorm = 71,
    Bc1UnormSrgb = 72,
    Bc2Unorm = 74,
    Bc2UnormSrgb = 75,
    Bc3Unorm = 77,
    Bc3UnormSrgb = 78,
    Bc4Unorm = 80,
    Bc4Snorm = 81,
    Bc5Unorm = 83,
    Bc5Snorm = 84,
    B8G8R8A8Unorm = 87,
    B8G8R8X8Unorm = 88,
    B8G8R8A8UnormSrgb = 91,
    B8G8R8X8UnormSrgb = 93,
    Bc6hUf16 = 95,
    Bc6hSf16 = 96,
    Bc7Unorm = 98,
    Bc7UnormSrgb = 99,
}

impl DxgiFormat {
    pub fn from_u32(value: u32) -> Option<Self> {
        use DxgiFormat::*;
        Some(match value {
            2 => R32G32B32A32Float,
            6 => R32G32B32Float,
            10 => R16G16B16A16Float,
            11 => R16G16B16A16Unorm,
            13 => R16G16B16A16Snorm,
            16 => R32G32Float,
            24 => R10G10B10A2Unorm,
            26 => R11G11B10Float,
            28 => R8G8B8A8Unorm,
            29 => R8G8B8A8UnormSrgb,
            31 => R8G8B8A8Snorm,
            34 => R16G16Float,
            35 => R16G16Unorm,
            37 => R16G16Snorm,
            41 => R32Float,
            49 => R8G8Unorm,
            51 => R8G8Snorm,
            54 => R16Float,
            56 => R16Unorm,
            58 => R16Snorm,
            61 => R8Unorm,
            63 => R8Snorm,
            65 => A8Unorm,
            71 => Bc1Unorm,
            72 => Bc1UnormSrgb,
            74 => Bc2Unorm,
            75 => Bc2UnormSrgb,
            77 => Bc3Unorm,
            78 => Bc3UnormSrgb,
            80 => Bc4Unorm,
            81 => Bc4Snorm,
            83 => Bc5Unorm,
            84 => Bc5Snorm,
            87 => B8G8R8A8Unorm,
            88 => B8G8R8X8Unorm,
            91 => B8G8R8A8UnormSrgb,
            93 => B8G8R8X8UnormSrgb,
            95 => Bc6hUf16,
            96 => Bc6hSf16,
            98 => Bc7Unorm,
            99 => Bc7UnormSrgb,
            _ => return None,
        })
    }

    pub fn is_block_compressed(&self) -> bool {
        matches!(
            self,
            DxgiFormat::Bc1Unorm
                | DxgiFormat::Bc1UnormSrgb
                | DxgiFormat::Bc2Unorm
                | DxgiFormat::Bc2UnormSrgb
                | DxgiFormat::Bc3Unorm
                | DxgiFormat::Bc3UnormSrgb
                | DxgiFormat::Bc4Unorm
                | DxgiFormat::Bc4Snorm
                | DxgiFormat::Bc5Unorm
                | DxgiFormat::Bc5Snorm
                | DxgiFormat::Bc6hUf16
                | DxgiFormat::Bc6hSf16
                | DxgiFormat::Bc7Unorm
                | DxgiFormat::Bc7UnormSrgb
        )
    }
}

/// The compressed block-format tag stored on [`crate::dds::CompressedImage`],
/// independent of whether it was discovered via legacy FourCC or a DX10 DXGI
/// code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressedFormat {
    Bc1,
    Bc2,
    Bc3,
    Bc4,
    Bc5,
    Bc6h,
    Bc7,
}

impl CompressedFormat {
    /// Block size in bytes: 8 for BC1/BC4, 16 for everything else (§4.B).
    pub fn block_size(&self) -> u32 {
        match self {
            CompressedFormat::Bc1 | CompressedFormat::Bc4 => 8,
            _ => 16,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompressedFormat::Bc1 => "BC1",
            CompressedFormat::Bc2 => "BC2",
            CompressedFormat::Bc3 => "BC3",
            CompressedFormat::Bc4 => "BC4",
            CompressedFormat::Bc5 => "BC5",
            CompressedFormat::Bc6h => "BC6H",
            CompressedFormat::Bc7 => "BC7",
        }
    }

    pub fn from_dxgi(format: DxgiFormat) -> Option<Self> {
        use DxgiFormat::*;
        Some(match format {
            Bc1Unorm | Bc1UnormSrgb => CompressedFormat::Bc1,
            Bc2Unorm | Bc2UnormSrgb => CompressedFormat::Bc2,
            Bc3Unorm | Bc3UnormSrgb => CompressedFormat::Bc3,
            Bc4Unorm | Bc4Snorm => CompressedFormat::Bc4,
            Bc5Unorm | Bc5Snorm => CompressedFormat::Bc5,
            Bc6hUf16 | Bc6hSf16 => CompressedFormat::Bc6h,
            Bc7Unorm | Bc7UnormSrgb => CompressedFormat::Bc7,
            _ => return None,
        })
    }

    pub fn from_fourcc(value: u32) -> Option<Self> {
        match value {
            FOURCC_DXT1 => Some(CompressedFormat::Bc1),
            FOURCC_DXT3 => Some(CompressedFormat::Bc2),
            FOURCC_DXT5 => Some(CompressedFormat::Bc3),
            FOURCC_ATI1 | FOURCC_BC4U => Some(CompressedFormat::Bc4),
            FOURCC_ATI2 | FOURCC_BC5U => Some(CompressedFormat::Bc5),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_sizes_match_spec() {
        assert_eq!(CompressedFormat::Bc1.block_size(), 8);
        assert_eq!(CompressedFormat::Bc4.block_size(), 8);
        assert_eq!(CompressedFormat::Bc2.block_size(), 16);
        assert_eq!(CompressedFormat::Bc7.block_size(), 16);
    }

    #[test]
    fn dxgi_round_trip() {
        assert_eq!(DxgiFormat::from_u32(98), Some(DxgiFormat::Bc7Unorm));
        assert_eq!(DxgiFormat::from_u32(u32::MAX), None);
    }
}
