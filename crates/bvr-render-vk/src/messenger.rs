// SPDX-License-Identifier: CEPL-1.0
use std::ffi::{c_void, CStr};

use ash::vk;
use bvr_render::RenderError;
use tracing::{debug, error, info, warn};

use crate::api::{MessengerDesc, VulkanApi};
use crate::instance::EntryPointsOf;

pub const CREATE_MESSENGER_FN: &str = "vkCreateDebugUtilsMessengerEXT";
pub const DESTROY_MESSENGER_FN: &str = "vkDestroyDebugUtilsMessengerEXT";

/// Owns a debug-utils messenger and the entry points needed to release it.
/// Must be destroyed while its instance is still alive.
pub struct DiagnosticsMessenger<V: VulkanApi> {
    entry_points: EntryPointsOf<V>,
    handle: Option<V::Messenger>,
}

impl<V: VulkanApi> DiagnosticsMessenger<V> {
    pub fn attach(
        api: &V,
        instance: &V::Instance,
        entry_points: EntryPointsOf<V>,
        desc: &MessengerDesc,
    ) -> Result<Self, RenderError> {
        let create = entry_points
            .create
            .ok_or(RenderError::DiagnosticsSetup(CREATE_MESSENGER_FN))?;
        let handle = api.create_messenger(instance, create, desc)?;
        info!("vk: debug messenger attached");
        Ok(Self {
            entry_points,
            handle: Some(handle),
        })
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Releases the messenger if both the handle and the destroy entry point
    /// exist. Repeated calls do nothing.
    pub fn destroy(&mut self, api: &V, instance: &V::Instance) {
        match (self.entry_points.destroy, self.handle.take()) {
            (Some(destroy), Some(handle)) => {
                api.destroy_messenger(instance, destroy, handle);
                debug!("vk: debug messenger destroyed");
            }
            (None, Some(_)) => {
                warn!(
                    "vk: {} unavailable, messenger released with instance",
                    DESTROY_MESSENGER_FN
                );
            }
            (_, None) => {}
        }
    }
}

/// Short tag for the message category, most specific first.
pub fn message_category(types: vk::DebugUtilsMessageTypeFlagsEXT) -> &'static str {
    if types.contains(vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION) {
        "validation"
    } else if types.contains(vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE) {
        "performance"
    } else if types.contains(vk::DebugUtilsMessageTypeFlagsEXT::DEVICE_ADDRESS_BINDING) {
        "device-address-binding"
    } else {
        "general"
    }
}

/// Sends a validation message to the tracing level matching its severity.
pub fn forward_message(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    types: vk::DebugUtilsMessageTypeFlagsEXT,
    message: &str,
) {
    let category = message_category(types);
    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        error!("[vulkan/{category}] {message}");
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        warn!("[vulkan/{category}] {message}");
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        info!("[vulkan/{category}] {message}");
    } else {
        debug!("[vulkan/{category}] {message}");
    }
}

/// Callback registered with the validation layer. Never asks the layer to
/// abort the triggering call.
pub(crate) unsafe extern "system" fn debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    types: vk::DebugUtilsMessageTypeFlagsEXT,
    data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user: *mut c_void,
) -> vk::Bool32 {
    // SAFETY: the layer passes either null or a callback data struct valid
    // for the duration of this call.
    let message = unsafe {
        match data.as_ref() {
            Some(d) if !d.p_message.is_null() => CStr::from_ptr(d.p_message).to_string_lossy(),
            _ => "<no message>".into(),
        }
    };
    forward_message(severity, types, &message);
    vk::FALSE
}
