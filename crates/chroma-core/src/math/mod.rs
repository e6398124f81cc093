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

//! Small math primitives shared by the grading settings, the uniform pack, and
//! the CPU color-science mirror. Deliberately narrow: only what color-space
//! conversions and the uniform layout need, not a general-purpose linear
//! algebra library.

mod matrix;
mod vector;

pub use matrix::Mat3;
pub use vector::Vec3;

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// Clamps a value to a specified minimum and maximum range.
#[inline]
pub fn clamp(value: f32, min_val: f32, max_val: f32) -> f32 {
    value.clamp(min_val, max_val)
}

/// Clamps a floating-point value to the `[0.0, 1.0]` range.
#[inline]
pub fn saturate(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Approximate equality with a caller-supplied tolerance.
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Approximate equality using [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
