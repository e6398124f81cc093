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

//! The single authoritative description of the 512-byte binary layout every
//! pipeline-stage fragment shader's uniform block mirrors (§4.A, §6).
//!
//! [`serialize`] is the only place in the crate that knows the byte offsets;
//! everything else addresses fields by name through [`PipelineSettings`].

use crate::settings::PipelineSettings;

/// Total size of the packed uniform buffer, fixed by §4.A.
pub const UNIFORM_SIZE: usize = 512;

/// Byte offset where the nine vec3 grading fields begin, each occupying a
/// 16-byte slot (§4.A "Layout rules").
const GRADING_VEC3_BASE: usize = 48;
const VEC3_SLOT: usize = 16;

/// The scalar/vec3 kind a layout entry describes, for [`layout_descriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    I32,
    F32,
    /// A `vec3` occupying 16 bytes (12 bytes of data, 4 bytes of zero pad).
    Vec3Padded,
}

/// One row of the uniform layout, as consumed by tests that diff this
/// description against a shader's `struct` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub name: &'static str,
    pub ty: FieldType,
    pub offset: usize,
    pub size: usize,
}

const fn entry(name: &'static str, ty: FieldType, offset: usize) -> LayoutEntry {
    let size = match ty {
        FieldType::I32 | FieldType::F32 => 4,
        FieldType::Vec3Padded => 16,
    };
    LayoutEntry { name, ty, offset, size }
}

/// The ordered field layout, offsets exactly as given in §6.
pub const LAYOUT: [LayoutEntry; 34] = [
    entry("inputSpace", FieldType::I32, 0),
    entry("gradingSpace", FieldType::I32, 4),
    entry("gradeExposure", FieldType::F32, 8),
    entry("contrast", FieldType::F32, 12),
    entry("saturation", FieldType::F32, 16),
    entry("temperature", FieldType::F32, 20),
    entry("tint", FieldType::F32, 24),
    entry("highlights", FieldType::F32, 28),
    entry("shadows", FieldType::F32, 32),
    entry("vibrance", FieldType::F32, 36),
    entry("lift", FieldType::Vec3Padded, GRADING_VEC3_BASE),
    entry("gamma", FieldType::Vec3Padded, GRADING_VEC3_BASE + VEC3_SLOT),
    entry("gain", FieldType::Vec3Padded, GRADING_VEC3_BASE + VEC3_SLOT * 2),
    entry("offset", FieldType::Vec3Padded, GRADING_VEC3_BASE + VEC3_SLOT * 3),
    entry("shadowColor", FieldType::Vec3Padded, GRADING_VEC3_BASE + VEC3_SLOT * 4),
    entry("midtoneColor", FieldType::Vec3Padded, GRADING_VEC3_BASE + VEC3_SLOT * 5),
    entry("highlightColor", FieldType::Vec3Padded, GRADING_VEC3_BASE + VEC3_SLOT * 6),
    entry("highlightSoftClip", FieldType::F32, 160),
    entry("shadowSoftClip", FieldType::F32, 164),
    entry("highlightKnee", FieldType::F32, 168),
    entry("shadowKnee", FieldType::F32, 172),
    entry("outputSpace", FieldType::I32, 176),
    entry("tonemapOp", FieldType::I32, 180),
    entry("tonemapExposure", FieldType::F32, 184),
    entry("whitePoint", FieldType::F32, 188),
    entry("paperWhite", FieldType::F32, 192),
    entry("peakBrightness", FieldType::F32, 196),
    entry("blackLevel", FieldType::F32, 200),
    entry("whiteLevel", FieldType::F32, 204),
    entry("bcEnabled", FieldType::I32, 208),
    entry("rrtEnabled", FieldType::I32, 212),
    entry("odtEnabled", FieldType::I32, 216),
    entry("bcFormat", FieldType::I32, 220),
    entry("bcQuality", FieldType::I32, 224),
    entry("viewExposure", FieldType::F32, 228),
];

/// Returns the ordered `(name, type, byteOffset, size)` description of the
/// uniform layout (§4.A).
pub fn layout_descriptor() -> &'static [LayoutEntry] {
    &LAYOUT
}

#[inline]
fn write_i32(buf: &mut [u8; UNIFORM_SIZE], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn write_f32(buf: &mut [u8; UNIFORM_SIZE], offset: usize, value: f32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
fn write_vec3(buf: &mut [u8; UNIFORM_SIZE], offset: usize, v: crate::math::Vec3) {
    write_f32(buf, offset, v.x);
    write_f32(buf, offset + 4, v.y);
    write_f32(buf, offset + 8, v.z);
    write_f32(buf, offset + 12, 0.0);
}

/// Packs a [`PipelineSettings`] value into the fixed 512-byte layout every
/// stage's shader reads (§4.A).
///
/// Allocation-free: callers on a hot update path can keep reusing the
/// returned array's backing storage by writing into an existing `&mut
/// [u8; UNIFORM_SIZE]` via [`serialize_into`] instead.
pub fn serialize(settings: &PipelineSettings) -> [u8; UNIFORM_SIZE] {
    let mut buf = [0u8; UNIFORM_SIZE];
    serialize_into(settings, &mut buf);
    buf
}

/// Same as [`serialize`], writing into caller-owned storage so the buffer can
/// be reused frame to frame without reallocating.
pub fn serialize_into(settings: &PipelineSettings, buf: &mut [u8; UNIFORM_SIZE]) {
    *buf = [0u8; UNIFORM_SIZE];

    write_i32(buf, 0, settings.input_space as i32);
    write_i32(buf, 4, settings.grading_space as i32);
    write_f32(buf, 8, settings.grade_exposure);
    write_f32(buf, 12, settings.contrast);
    write_f32(buf, 16, settings.saturation);
    write_f32(buf, 20, settings.temperature);
    write_f32(buf, 24, settings.tint);
    write_f32(buf, 28, settings.highlights);
    write_f32(buf, 32, settings.shadows);
    write_f32(buf, 36, settings.vibrance);
    // bytes 40..48 are explicit padding, left zeroed.

    write_vec3(buf, GRADING_VEC3_BASE, settings.lift);
    write_vec3(buf, GRADING_VEC3_BASE + VEC3_SLOT, settings.gamma);
    write_vec3(buf, GRADING_VEC3_BASE + VEC3_SLOT * 2, settings.gain);
    write_vec3(buf, GRADING_VEC3_BASE + VEC3_SLOT * 3, settings.offset);
    write_vec3(buf, GRADING_VEC3_BASE + VEC3_SLOT * 4, settings.shadow_color);
    write_vec3(buf, GRADING_VEC3_BASE + VEC3_SLOT * 5, settings.midtone_color);
    write_vec3(buf, GRADING_VEC3_BASE + VEC3_SLOT * 6, settings.highlight_color);

    write_f32(buf, 160, settings.highlight_soft_clip);
    write_f32(buf, 164, settings.shadow_soft_clip);
    write_f32(buf, 168, settings.highlight_knee);
    write_f32(buf, 172, settings.shadow_knee);

    write_i32(buf, 176, settings.output_space as i32);
    write_i32(buf, 180, settings.tonemap_op as i32);
    write_f32(buf, 184, settings.tonemap_exposure);
    write_f32(buf, 188, settings.white_point);
    write_f32(buf, 192, settings.paper_white);
    write_f32(buf, 196, settings.peak_brightness);
    write_f32(buf, 200, settings.black_level);
    write_f32(buf, 204, settings.white_level);

    write_i32(buf, 208, settings.bc_enabled as i32);
    write_i32(buf, 212, settings.rrt_enabled as i32);
    write_i32(buf, 216, settings.odt_enabled as i32);
    write_i32(buf, 220, settings.bc_format as i32);
    write_i32(buf, 224, settings.bc_quality as i32);
    write_f32(buf, 228, settings.view_exposure);
    // bytes 232..512 are unused tail, left zeroed.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::settings::{BcFormat, BcQuality, ColorSpace, GradingSpace, TonemapOp};

    fn read_i32(buf: &[u8; UNIFORM_SIZE], offset: usize) -> i32 {
        i32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    fn read_f32(buf: &[u8; UNIFORM_SIZE], offset: usize) -> f32 {
        f32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn buffer_is_exactly_512_bytes() {
        let buf = serialize(&PipelineSettings::default());
        assert_eq!(buf.len(), UNIFORM_SIZE);
    }

    #[test]
    fn scalars_land_at_documented_offsets() {
        let mut s = PipelineSettings::default();
        s.grade_exposure = 1.5;
        s.contrast = 1.1;
        s.saturation = 0.9;
        s.temperature = -5.0;
        s.tint = 3.0;
        s.highlights = 0.2;
        s.shadows = -0.3;
        s.vibrance = 0.4;
        s.black_level = 0.05;
        s.white_level = 0.95;

        let buf = serialize(&s);
        assert_eq!(read_f32(&buf, 8), 1.5);
        assert_eq!(read_f32(&buf, 12), 1.1);
        assert_eq!(read_f32(&buf, 16), 0.9);
        assert_eq!(read_f32(&buf, 20), -5.0);
        assert_eq!(read_f32(&buf, 24), 3.0);
        assert_eq!(read_f32(&buf, 28), 0.2);
        assert_eq!(read_f32(&buf, 32), -0.3);
        assert_eq!(read_f32(&buf, 36), 0.4);
        assert_eq!(read_f32(&buf, 200), 0.05);
        assert_eq!(read_f32(&buf, 204), 0.95);
    }

    #[test]
    fn vec3_fields_are_contiguous_on_16_byte_boundaries_from_48() {
        let mut s = PipelineSettings::default();
        s.lift = Vec3::new(1.0, 2.0, 3.0);
        s.gamma = Vec3::new(4.0, 5.0, 6.0);
        s.highlight_color = Vec3::new(7.0, 8.0, 9.0);

        let buf = serialize(&s);
        assert_eq!(read_f32(&buf, 48), 1.0);
        assert_eq!(read_f32(&buf, 52), 2.0);
        assert_eq!(read_f32(&buf, 56), 3.0);
        assert_eq!(read_f32(&buf, 60), 0.0, "vec3 pad word must be zero");

        assert_eq!(read_f32(&buf, 64), 4.0);
        assert_eq!(read_f32(&buf, 76), 0.0);

        // highlightColor is the 7th vec3 slot: 48 + 6*16 = 144.
        assert_eq!(read_f32(&buf, 144), 7.0);
        assert_eq!(read_f32(&buf, 148), 8.0);
        assert_eq!(read_f32(&buf, 152), 9.0);
        assert_eq!(read_f32(&buf, 156), 0.0);
    }

    #[test]
    fn enum_discriminants_match_spec_numbering() {
        let mut s = PipelineSettings::default();
        s.input_space = ColorSpace::AcesCg;
        s.output_space = ColorSpace::PqRec2020;
        s.grading_space = GradingSpace::Linear;
        s.tonemap_op = TonemapOp::AgX;
        s.bc_format = BcFormat::Bc6h;
        s.bc_quality = BcQuality::High;

        let buf = serialize(&s);
        assert_eq!(read_i32(&buf, 0), 2);
        assert_eq!(read_i32(&buf, 176), 6);
        assert_eq!(read_i32(&buf, 4), 1);
        assert_eq!(read_i32(&buf, 180), 4);
        assert_eq!(read_i32(&buf, 220), 5);
        assert_eq!(read_i32(&buf, 224), 2);
    }

    #[test]
    fn booleans_pack_as_signed_32_bit() {
        let mut s = PipelineSettings::default();
        s.bc_enabled = true;
        s.rrt_enabled = false;
        s.odt_enabled = true;

        let buf = serialize(&s);
        assert_eq!(read_i32(&buf, 208), 1);
        assert_eq!(read_i32(&buf, 212), 0);
        assert_eq!(read_i32(&buf, 216), 1);
    }

    #[test]
    fn unused_tail_is_zero() {
        let buf = serialize(&PipelineSettings::default());
        assert!(buf[232..UNIFORM_SIZE].iter().all(|&b| b == 0));
    }

    #[test]
    fn layout_descriptor_matches_hand_assembled_offsets() {
        let descriptor = layout_descriptor();
        assert_eq!(descriptor.len(), 34);
        let lift = descriptor.iter().find(|e| e.name == "lift").unwrap();
        assert_eq!(lift.offset, 48);
        assert_eq!(lift.size, 16);
        let view_exposure = descriptor.iter().find(|e| e.name == "viewExposure").unwrap();
        assert_eq!(view_exposure.offset, 228);
        assert_eq!(view_exposure.size, 4);
    }

    #[test]
    fn serialize_into_reuses_buffer_without_stale_bytes() {
        let mut buf = [0xFFu8; UNIFORM_SIZE];
        serialize_into(&PipelineSettings::default(), &mut buf);
        assert!(buf[232..UNIFORM_SIZE].iter().all(|&b| b == 0));
        assert_eq!(read_i32(&buf, 0), ColorSpace::LinearRec709 as i32);
    }
}
