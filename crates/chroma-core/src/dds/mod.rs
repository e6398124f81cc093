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

//! DDS container parsing: legacy FourCC and DX10-extended DXGI formats,
//! block-compressed (BC1–BC7) and uncompressed pixel layouts (§4.B).

mod decode;
mod error;
mod formats;
mod header;
mod parser;

pub use decode::{decode_half, flip_rows_in_place};
pub use error::DdsError;
pub use formats::{CompressedFormat, DxgiFormat};
pub use parser::parse_dds;

/// Raw, still block-compressed image data read straight off the DDS blocks —
/// decompression happens on the GPU, not here.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub width: u32,
    pub height: u32,
    pub format: CompressedFormat,
    pub blocks: Vec<u8>,
    pub block_size: u32,
    pub blocks_per_row: u32,
    pub blocks_per_col: u32,
    pub label: &'static str,
}

/// A fully decoded RGBA float32 image, `pixels.len() == width * height * 4`,
/// row-major, top row first.
#[derive(Debug, Clone)]
pub struct UncompressedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<f32>,
    pub label: String,
}

/// The result of parsing a DDS container: either raw compressed blocks ready
/// for upload to a GPU-native compressed texture, or a decoded float array.
#[derive(Debug, Clone)]
pub enum ParsedDds {
    Compressed(CompressedImage),
    Uncompressed(UncompressedImage),
}

impl ParsedDds {
    pub fn width(&self) -> u32 {
        match self {
            ParsedDds::Compressed(img) => img.width,
            ParsedDds::Uncompressed(img) => img.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ParsedDds::Compressed(img) => img.height,
            ParsedDds::Uncompressed(img) => img.height,
        }
    }
}
