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

//! # Chroma Core
//!
//! GPU-independent contracts for the HDR color pipeline inspector: the
//! settings surface, the shared uniform buffer layout, DDS container
//! parsing, and a CPU mirror of the pipeline's color math used to validate
//! the GPU shaders from the host side.

#![warn(missing_docs)]

pub mod colorscience;
pub mod dds;
pub mod math;
pub mod settings;
pub mod uniform;

pub use dds::{decode_half, flip_rows_in_place, parse_dds, DdsError, ParsedDds};
pub use settings::{BcFormat, BcQuality, ColorSpace, GradingSpace, PipelineSettings, SettingsError, TonemapOp};
pub use uniform::UNIFORM_SIZE;
