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

//! Errors `parse_dds` can return (§4.B, §7).

use std::fmt;

/// Why a DDS byte buffer was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdsError {
    /// Magic, header size, or pixel-format size mismatch.
    InvalidContainer(String),
    /// The FourCC or DXGI format is outside the supported set (§4.B).
    UnsupportedFormat(String),
    /// Declared block or pixel bytes exceed the buffer actually supplied.
    Truncated(String),
}

impl fmt::Display for DdsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DdsError::InvalidContainer(msg) => write!(f, "invalid DDS container: {msg}"),
            DdsError::UnsupportedFormat(msg) => write!(f, "unsupported DDS format: {msg}"),
            DdsError::Truncated(msg) => write!(f, "truncated DDS data: {msg}"),
        }
    }
}

impl std::error::Error for DdsError {}
