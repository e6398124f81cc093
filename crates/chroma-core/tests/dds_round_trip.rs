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

//! DDS round-trip scenario from the testable-properties list: bytes a
//! writer would have produced go in, the same values come back out.
//!
//! Exercised at the crate boundary (only `parse_dds`/`ParsedDds`, no
//! private header helpers) since the property spans header parsing, format
//! dispatch, and pixel decode together.

use chroma_core::{parse_dds, ParsedDds};

const DX10_FOURCC: u32 = u32::from_le_bytes(*b"DX10");
const DXT1_FOURCC: u32 = u32::from_le_bytes(*b"DXT1");
const DDPF_FOURCC: u32 = 0x4;
const DXGI_FORMAT_R32G32B32A32_FLOAT: u32 = 2;
const BASE_HEADER_END: usize = 128;
const DX10_HEADER_SIZE: usize = 20;

fn dx10_header(dxgi_format: u32, width: u32, height: u32) -> Vec<u8> {
    let mut buf = vec![0u8; BASE_HEADER_END + DX10_HEADER_SIZE];
    buf[0..4].copy_from_slice(b"DDS ");
    buf[4..8].copy_from_slice(&124u32.to_le_bytes());
    buf[12..16].copy_from_slice(&height.to_le_bytes());
    buf[16..20].copy_from_slice(&width.to_le_bytes());

    let pf_base = 4 + 72;
    buf[pf_base..pf_base + 4].copy_from_slice(&32u32.to_le_bytes());
    buf[pf_base + 4..pf_base + 8].copy_from_slice(&DDPF_FOURCC.to_le_bytes());
    buf[pf_base + 8..pf_base + 12].copy_from_slice(&DX10_FOURCC.to_le_bytes());

    buf[BASE_HEADER_END..BASE_HEADER_END + 4].copy_from_slice(&dxgi_format.to_le_bytes());
    buf
}

fn legacy_dxt1_header(width: u32, height: u32) -> Vec<u8> {
    let mut buf = vec![0u8; BASE_HEADER_END];
    buf[0..4].copy_from_slice(b"DDS ");
    buf[4..8].copy_from_slice(&124u32.to_le_bytes());
    buf[12..16].copy_from_slice(&height.to_le_bytes());
    buf[16..20].copy_from_slice(&width.to_le_bytes());

    let pf_base = 4 + 72;
    buf[pf_base..pf_base + 4].copy_from_slice(&32u32.to_le_bytes());
    buf[pf_base + 4..pf_base + 8].copy_from_slice(&DDPF_FOURCC.to_le_bytes());
    buf[pf_base + 8..pf_base + 12].copy_from_slice(&DXT1_FOURCC.to_le_bytes());
    buf
}

#[test]
fn rgba32f_gradient_round_trips_byte_for_byte() {
    let width = 2;
    let height = 2;
    let gradient: [f32; 16] = [
        0.0, 0.0, 0.0, 1.0, // (0,0)
        0.25, 0.25, 0.25, 1.0, // (1,0)
        0.5, 0.75, 1.0, 1.0, // (0,1)
        1.0, 0.5, 0.0, 0.75, // (1,1)
    ];

    let mut bytes = dx10_header(DXGI_FORMAT_R32G32B32A32_FLOAT, width, height);
    for value in gradient {
        bytes.extend_from_slice(&value.to_le_bytes());
    }

    let parsed = parse_dds(&bytes).expect("well-formed RGBA32F DDS parses");
    match parsed {
        ParsedDds::Uncompressed(img) => {
            assert_eq!(img.width, width);
            assert_eq!(img.height, height);
            assert_eq!(img.pixels, gradient.to_vec());
        }
        ParsedDds::Compressed(_) => panic!("RGBA32F is not block-compressed"),
    }
}

#[test]
fn bc1_block_stream_yields_exact_byte_count() {
    let width = 8;
    let height = 8;
    let blocks_per_row = 2; // (8 + 3) / 4
    let blocks_per_col = 2;
    let block_size = 8; // BC1 is 8 bytes per 4x4 block
    let expected_bytes = blocks_per_row * blocks_per_col * block_size;

    let mut bytes = legacy_dxt1_header(width, height);
    let block_stream: Vec<u8> = (0..expected_bytes).map(|i| (i % 256) as u8).collect();
    bytes.extend_from_slice(&block_stream);

    let parsed = parse_dds(&bytes).expect("well-formed BC1 DDS parses");
    match parsed {
        ParsedDds::Compressed(img) => {
            assert_eq!(img.blocks_per_row, blocks_per_row);
            assert_eq!(img.blocks_per_col, blocks_per_col);
            assert_eq!(img.blocks.len(), expected_bytes as usize);
            assert_eq!(img.blocks, block_stream);
        }
        ParsedDds::Uncompressed(_) => panic!("DXT1 is block-compressed"),
    }
}
