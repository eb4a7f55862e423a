// SPDX-License-Identifier: CEPL-1.0
#![deny(unsafe_op_in_unsafe_fn)]
//! Vulkan bootstrap: instance, optional validation messenger, and
//! physical device selection.

pub mod api;
mod ash_api;
pub mod capability;
pub mod device;
pub mod instance;
mod lifecycle;
pub mod messenger;

pub use api::{
    AppInfo, DeviceProperties, InstanceRequest, MessengerDesc, MessengerEntryPoints, VulkanApi,
};
pub use ash_api::AshApi;
pub use device::{PhysicalDeviceDescriptor, QueueFamilyIndices};
pub use lifecycle::RendererLifecycle;

/// The production renderer: the lifecycle driven by the system loader.
pub type VkRenderer = RendererLifecycle<AshApi>;

impl VkRenderer {
    pub fn load(config: bvr_render::RenderConfig) -> Result<Self, bvr_render::RenderError> {
        Ok(RendererLifecycle::new(AshApi::load()?, config))
    }
}
