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

//! The complete configuration surface for the color pipeline: [`PipelineSettings`]
//! and the small fixed-domain enums it is built from.
//!
//! This is the only configuration surface the core has — no file, no
//! environment variable, no CLI flag feeds into the pipeline outside of a
//! `PipelineSettings` value supplied by the caller.

use crate::math::Vec3;

/// A color space an image can enter or leave the pipeline in.
///
/// Discriminants are part of the wire contract: they are written verbatim
/// into the shared uniform buffer (§6) and must match what the fragment
/// shaders switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ColorSpace {
    LinearRec709 = 0,
    LinearRec2020 = 1,
    AcesCg = 2,
    AcesCc = 3,
    AcesCct = 4,
    Srgb = 5,
    PqRec2020 = 6,
    HlgRec2020 = 7,
    ScRgb = 8,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 9] = [
        ColorSpace::LinearRec709,
        ColorSpace::LinearRec2020,
        ColorSpace::AcesCg,
        ColorSpace::AcesCc,
        ColorSpace::AcesCct,
        ColorSpace::Srgb,
        ColorSpace::PqRec2020,
        ColorSpace::HlgRec2020,
        ColorSpace::ScRgb,
    ];

    pub fn from_discriminant(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| *c as i32 == value)
    }
}

/// The working space the grading sub-operations in stage 2 are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GradingSpace {
    /// ACEScct log encoding.
    Log = 0,
    /// ACEScg linear encoding.
    Linear = 1,
}

impl GradingSpace {
    pub fn from_discriminant(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Log),
            1 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// The reference rendering transform operator selected for stage 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TonemapOp {
    None = 0,
    AcesFit = 1,
    Aces13 = 2,
    Aces20 = 3,
    AgX = 4,
    GranTurismo = 5,
    Uncharted2 = 6,
    KhronosPbrNeutral = 7,
    Lottes = 8,
    Reinhard = 9,
    ReinhardExtended = 10,
    HejlBurgess = 11,
}

impl TonemapOp {
    pub const ALL: [TonemapOp; 12] = [
        TonemapOp::None,
        TonemapOp::AcesFit,
        TonemapOp::Aces13,
        TonemapOp::Aces20,
        TonemapOp::AgX,
        TonemapOp::GranTurismo,
        TonemapOp::Uncharted2,
        TonemapOp::KhronosPbrNeutral,
        TonemapOp::Lottes,
        TonemapOp::Reinhard,
        TonemapOp::ReinhardExtended,
        TonemapOp::HejlBurgess,
    ];

    pub fn from_discriminant(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|op| *op as i32 == value)
    }

    /// Stage 3/4 dispatch: true for the two operators that hand AP1 data to
    /// stage 4's ODT instead of finished Linear Rec.709 (§4.D).
    pub fn is_full_aces(&self) -> bool {
        matches!(self, TonemapOp::Aces13 | TonemapOp::Aces20)
    }
}

/// BC texture format selected for the optional compression stage. Read only
/// by the external BC encoder (§9 Open Questions) — opaque to every
/// pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BcFormat {
    Bc1 = 0,
    Bc2 = 1,
    Bc3 = 2,
    Bc4 = 3,
    Bc5 = 4,
    Bc6h = 5,
    Bc7 = 6,
}

impl BcFormat {
    pub fn from_discriminant(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Bc1),
            1 => Some(Self::Bc2),
            2 => Some(Self::Bc3),
            3 => Some(Self::Bc4),
            4 => Some(Self::Bc5),
            5 => Some(Self::Bc6h),
            6 => Some(Self::Bc7),
            _ => None,
        }
    }
}

/// Compression effort for the optional BC encoder. Opaque to every pipeline
/// stage, same as [`BcFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BcQuality {
    Fast = 0,
    Normal = 1,
    High = 2,
}

impl BcQuality {
    pub fn from_discriminant(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Fast),
            1 => Some(Self::Normal),
            2 => Some(Self::High),
            _ => None,
        }
    }
}

/// The full flat settings record controlling every stage of the pipeline.
///
/// Field order here intentionally matches the grouping in §6's layout table
/// (grading scalars, then grading colors, then soft-clip, then output/tonemap,
/// then display remap, then the externally-owned BC/view fields) so that
/// [`crate::uniform::UniformPack::serialize`] reads as a straight top-to-bottom
/// transcription rather than a lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub input_space: ColorSpace,
    pub grading_space: GradingSpace,

    pub grade_exposure: f32,
    pub contrast: f32,
    pub saturation: f32,
    pub temperature: f32,
    pub tint: f32,
    pub highlights: f32,
    pub shadows: f32,
    pub vibrance: f32,

    pub lift: Vec3,
    pub gamma: Vec3,
    pub gain: Vec3,
    pub offset: Vec3,
    pub shadow_color: Vec3,
    pub midtone_color: Vec3,
    pub highlight_color: Vec3,

    pub highlight_soft_clip: f32,
    pub shadow_soft_clip: f32,
    pub highlight_knee: f32,
    pub shadow_knee: f32,

    pub output_space: ColorSpace,
    pub tonemap_op: TonemapOp,
    pub tonemap_exposure: f32,
    pub white_point: f32,
    pub paper_white: f32,
    pub peak_brightness: f32,
    pub black_level: f32,
    pub white_level: f32,

    pub bc_enabled: bool,
    pub rrt_enabled: bool,
    pub odt_enabled: bool,
    pub bc_format: BcFormat,
    pub bc_quality: BcQuality,
    pub view_exposure: f32,
}

/// An invalid [`PipelineSettings`] value, returned by [`PipelineSettings::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// `black_level` was greater than `white_level`.
    BlackAboveWhite { black: String, white: String },
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::BlackAboveWhite { black, white } => write!(
                f,
                "blackLevel ({black}) must not exceed whiteLevel ({white})"
            ),
        }
    }
}

impl std::error::Error for SettingsError {}

impl Default for PipelineSettings {
    /// The grading-identity defaults from §8's stage-5 passthrough invariant,
    /// plus the documented defaults for the remaining scalar ranges.
    fn default() -> Self {
        Self {
            input_space: ColorSpace::LinearRec709,
            grading_space: GradingSpace::Log,

            grade_exposure: 0.0,
            contrast: 1.0,
            saturation: 1.0,
            temperature: 0.0,
            tint: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            vibrance: 0.0,

            lift: Vec3::ZERO,
            gamma: Vec3::ONE,
            gain: Vec3::ONE,
            offset: Vec3::ZERO,
            shadow_color: Vec3::ZERO,
            midtone_color: Vec3::ZERO,
            highlight_color: Vec3::ZERO,

            highlight_soft_clip: 0.0,
            shadow_soft_clip: 0.0,
            highlight_knee: 0.0,
            shadow_knee: 0.0,

            output_space: ColorSpace::LinearRec709,
            tonemap_op: TonemapOp::None,
            tonemap_exposure: 0.0,
            white_point: 1.0,
            paper_white: 100.0,
            peak_brightness: 1000.0,
            black_level: 0.0,
            white_level: 1.0,

            bc_enabled: false,
            rrt_enabled: true,
            odt_enabled: true,
            bc_format: BcFormat::Bc7,
            bc_quality: BcQuality::Normal,
            view_exposure: 0.0,
        }
    }
}

impl PipelineSettings {
    /// Checks the one cross-field invariant called out in §3:
    /// `blackLevel ≤ whiteLevel`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.black_level > self.white_level {
            return Err(SettingsError::BlackAboveWhite {
                black: self.black_level.to_string(),
                white: self.white_level.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(PipelineSettings::default().validate().is_ok());
    }

    #[test]
    fn black_above_white_is_rejected() {
        let mut s = PipelineSettings::default();
        s.black_level = 0.9;
        s.white_level = 0.1;
        assert!(s.validate().is_err());
    }

    #[test]
    fn color_space_discriminants_match_spec_order() {
        assert_eq!(ColorSpace::LinearRec709 as i32, 0);
        assert_eq!(ColorSpace::LinearRec2020 as i32, 1);
        assert_eq!(ColorSpace::AcesCg as i32, 2);
        assert_eq!(ColorSpace::AcesCc as i32, 3);
        assert_eq!(ColorSpace::AcesCct as i32, 4);
        assert_eq!(ColorSpace::Srgb as i32, 5);
        assert_eq!(ColorSpace::PqRec2020 as i32, 6);
        assert_eq!(ColorSpace::HlgRec2020 as i32, 7);
        assert_eq!(ColorSpace::ScRgb as i32, 8);
    }

    #[test]
    fn tonemap_op_discriminants_match_spec_order() {
        assert_eq!(TonemapOp::None as i32, 0);
        assert_eq!(TonemapOp::AcesFit as i32, 1);
        assert_eq!(TonemapOp::Aces13 as i32, 2);
        assert_eq!(TonemapOp::Aces20 as i32, 3);
        assert_eq!(TonemapOp::AgX as i32, 4);
        assert_eq!(TonemapOp::GranTurismo as i32, 5);
        assert_eq!(TonemapOp::Uncharted2 as i32, 6);
        assert_eq!(TonemapOp::KhronosPbrNeutral as i32, 7);
        assert_eq!(TonemapOp::Lottes as i32, 8);
        assert_eq!(TonemapOp::Reinhard as i32, 9);
        assert_eq!(TonemapOp::ReinhardExtended as i32, 10);
        assert_eq!(TonemapOp::HejlBurgess as i32, 11);
    }

    #[test]
    fn from_discriminant_round_trips() {
        for cs in ColorSpace::ALL {
            assert_eq!(ColorSpace::from_discriminant(cs as i32), Some(cs));
        }
        for op in TonemapOp::ALL {
            assert_eq!(TonemapOp::from_discriminant(op as i32), Some(op));
        }
        assert_eq!(ColorSpace::from_discriminant(99), None);
    }

    #[test]
    fn only_full_aces_ops_defer_to_odt() {
        assert!(TonemapOp::Aces13.is_full_aces());
        assert!(TonemapOp::Aces20.is_full_aces());
        assert!(!TonemapOp::AcesFit.is_full_aces());
        assert!(!TonemapOp::Reinhard.is_full_aces());
    }
}
