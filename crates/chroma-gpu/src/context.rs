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

//! Adapter and device acquisition (§5 "suspension point 1"). The inspector
//! never presents to a window — every stage renders into an owned texture —
//! so there is no surface here, only the instance/adapter/device triple.

use crate::error::GpuInitError;

/// The GPU connection every [`crate::renderer::PipelineRenderer`] and
/// [`crate::source::SourceLoader`] call renders through.
#[derive(Debug)]
pub struct GpuContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Requests a high-performance adapter and a device with BC texture
    /// compression enabled if the adapter supports it (needed by
    /// `uploadDDS` to hand compressed blocks straight to the GPU).
    pub async fn new() -> Result<Self, GpuInitError> {
        log::info!("Requesting GPU instance and adapter for the color pipeline runtime...");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuInitError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using adapter \"{}\" (backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let optional_features = wgpu::Features::TEXTURE_COMPRESSION_BC;
        let required_features = adapter.features() & optional_features;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("chroma-gpu pipeline device"),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| GpuInitError::DeviceRequestFailed(e.to_string()))?;

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("uncaptured wgpu error: {e:?}");
        }));

        log::info!(
            "GPU device acquired; BC texture compression {}",
            if required_features.contains(wgpu::Features::TEXTURE_COMPRESSION_BC) {
                "available"
            } else {
                "unavailable"
            }
        );

        Ok(Self { instance, adapter, device, queue })
    }

    pub fn supports_bc(&self) -> bool {
        self.device.features().contains(wgpu::Features::TEXTURE_COMPRESSION_BC)
    }
}
