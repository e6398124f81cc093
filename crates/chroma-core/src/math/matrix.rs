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

//! A column-major 3x3 matrix, used for color-space primary conversions.

use super::Vec3;
use std::ops::Mul;

/// A 3x3 column-major matrix.
///
/// Color-space conversions (AP1 ↔ Rec.709, Rec.2020 ↔ Rec.709, and so on) are
/// all linear maps between RGB primaries and are represented this way, mirroring
/// how the fragment shaders declare their constant matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Columns of the matrix; `cols[0]` is the first column.
    pub cols: [Vec3; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        cols: [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
    };

    #[inline]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    /// Builds a matrix from row-major literals, as color-science references
    /// (ACES, BT.2020 specs) always publish their primaries matrices.
    #[inline]
    pub const fn from_rows(
        r0: (f32, f32, f32),
        r1: (f32, f32, f32),
        r2: (f32, f32, f32),
    ) -> Self {
        Self {
            cols: [
                Vec3::new(r0.0, r1.0, r2.0),
                Vec3::new(r0.1, r1.1, r2.1),
                Vec3::new(r0.2, r1.2, r2.2),
            ],
        }
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        Mat3::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_noop() {
        let v = Vec3::new(0.3, 0.6, 0.9);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn from_rows_matches_manual_dot() {
        let m = Mat3::from_rows((1.0, 2.0, 3.0), (0.0, 1.0, 0.0), (0.0, 0.0, 1.0));
        let v = Vec3::new(1.0, 1.0, 1.0);
        let result = m * v;
        assert_eq!(result, Vec3::new(6.0, 1.0, 1.0));
    }
}
