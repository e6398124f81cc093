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

//! # Chroma GPU
//!
//! The wgpu-backed runtime for the HDR color pipeline inspector: headless
//! adapter/device acquisition, the six-stage fragment pipeline, and the
//! upload paths that get a source image into the pipeline's native texture
//! format in the first place.
//!
//! The core never opens a window: every render target here is an owned
//! texture, never a surface.

#![warn(missing_docs)]

mod context;
mod error;
mod renderer;
mod source;
mod stage;

pub use context::GpuContext;
pub use error::GpuInitError;
pub use renderer::{PipelineRenderer, STAGE_COUNT};
pub use source::SourceLoader;
pub use stage::{FragmentStage, TARGET_FORMAT};
