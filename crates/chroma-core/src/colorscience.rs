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

//! A CPU-side mirror of the handful of color operations the fragment shaders
//! perform on the GPU (grading lift/gamma/gain, the AP1↔Rec.709 change of
//! basis, two tonemap operators, and the final display remap). None of this
//! runs on the render path — it exists so the concrete numeric properties
//! §8 calls out have a host-side oracle to check against, since the shaders
//! themselves can only be exercised with a GPU device.

use crate::math::{Mat3, Vec3};

/// AP1 (ACEScg) primaries to linear Rec.709, the matrix the RRT/ODT and
/// Output Encoding stages apply when `outputSpace` is a Rec.709-family space.
pub const AP1_TO_REC709: Mat3 = Mat3::from_rows(
    (1.6410233797, -0.3248032942, -0.2364246952),
    (-0.6636628587, 1.6153315917, 0.0167563477),
    (0.0117218943, -0.0082844420, 0.9883948585),
);

/// Linear Rec.709 back to AP1, used when grading in ACEScg from a Rec.709
/// source.
pub const REC709_TO_AP1: Mat3 = Mat3::from_rows(
    (0.6624541811, 0.1340042065, 0.1561876870),
    (0.2722287168, 0.6740817658, 0.0536895174),
    (-0.0055746495, 0.0040607335, 1.0103391003),
);

/// Lift/gamma/gain grading, applied per channel: `((color + lift) * gain) ^ (1/gamma)`.
/// With the identity defaults (`lift = 0`, `gamma = 1`, `gain = 1`) this reduces
/// to the identity, matching the stage-2 passthrough invariant (§8).
pub fn apply_lift_gamma_gain(color: Vec3, lift: Vec3, gamma: Vec3, gain: Vec3) -> Vec3 {
    let adjusted = (color + lift) * gain;
    Vec3::new(
        adjusted.x.max(0.0).powf(1.0 / gamma.x),
        adjusted.y.max(0.0).powf(1.0 / gamma.y),
        adjusted.z.max(0.0).powf(1.0 / gamma.z),
    )
}

/// The Narkowicz ACES Fit approximation used by `TonemapOp::AcesFit`.
pub fn aces_fit(color: Vec3) -> Vec3 {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;

    color
        .map(|x| ((x * (A * x + B)) / (x * (C * x + D) + E)).clamp(0.0, 1.0))
}

/// Plain Reinhard tonemapping (`TonemapOp::Reinhard`): `color / (1 + color)`.
/// Maps zero to zero and has no finite horizon.
pub fn reinhard(color: Vec3) -> Vec3 {
    color.map(|x| x / (1.0 + x))
}

/// Extended Reinhard with a white point (`TonemapOp::ReinhardExtended`):
/// `color * (1 + color / whitePoint^2) / (1 + color)`.
pub fn reinhard_extended(color: Vec3, white_point: f32) -> Vec3 {
    let wp2 = white_point * white_point;
    color.map(|x| (x * (1.0 + x / wp2)) / (1.0 + x))
}

/// Stage-6 display remap: linearly rescales `[blackLevel, whiteLevel]` to
/// `[0, 1]` — or, read the other way, expands `[0, 1]` into the target
/// display's black/white levels.
pub fn display_remap(color: Vec3, black_level: f32, white_level: f32) -> Vec3 {
    color * (white_level - black_level) + Vec3::splat(black_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq_eps;

    #[test]
    fn identity_grade_on_mid_gray_is_passthrough() {
        let mid_gray = Vec3::splat(0.18);
        let graded = apply_lift_gamma_gain(mid_gray, Vec3::ZERO, Vec3::ONE, Vec3::ONE);
        assert!(approx_eq_eps(graded.x, mid_gray.x, 1e-6));
        assert!(approx_eq_eps(graded.y, mid_gray.y, 1e-6));
        assert!(approx_eq_eps(graded.z, mid_gray.z, 1e-6));
    }

    #[test]
    fn aces_cg_white_maps_through_rec709_matrix() {
        let acescg_white = Vec3::ONE;
        let rec709 = AP1_TO_REC709 * acescg_white;
        assert!(approx_eq_eps(rec709.x, 1.0, 1e-4));
        assert!(approx_eq_eps(rec709.y, 1.0, 1e-4));
        assert!(approx_eq_eps(rec709.z, 1.0, 1e-4));
    }

    #[test]
    fn aces_fit_of_white_is_about_point_eight() {
        let fitted = aces_fit(Vec3::ONE);
        assert!(approx_eq_eps(fitted.x, 0.8038, 1e-3));
    }

    #[test]
    fn display_remap_maps_endpoints() {
        let black = 0.1;
        let white = 0.9;
        let at_zero = display_remap(Vec3::ZERO, black, white);
        let at_one = display_remap(Vec3::ONE, black, white);
        assert!(approx_eq_eps(at_zero.x, black, 1e-6));
        assert!(approx_eq_eps(at_one.x, white, 1e-6));
    }

    #[test]
    fn reinhard_identity_at_zero() {
        let mapped = reinhard(Vec3::ZERO);
        assert_eq!(mapped.x, 0.0);
        assert_eq!(mapped.y, 0.0);
        assert_eq!(mapped.z, 0.0);
    }
}
