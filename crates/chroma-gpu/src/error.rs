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

//! The one fatal, structural error kind the GPU backend can raise (§7
//! "InitFailure"). Per-stage shader failures are not modelled as `Result`s —
//! [`crate::stage::FragmentStage`] nulls its own pipeline and logs instead,
//! since they must not abort the running application.

use std::fmt;

/// Why GPU initialisation failed: no adapter matched the request, the
/// adapter refused to produce a device, or the device's limits were
/// insufficient. Fatal, with no retry path (§7).
#[derive(Debug)]
pub enum GpuInitError {
    NoAdapter,
    DeviceRequestFailed(String),
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuInitError::NoAdapter => write!(f, "no compatible GPU adapter was found"),
            GpuInitError::DeviceRequestFailed(msg) => {
                write!(f, "device request was refused: {msg}")
            }
        }
    }
}

impl std::error::Error for GpuInitError {}
