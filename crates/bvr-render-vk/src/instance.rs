// SPDX-License-Identifier: CEPL-1.0
use bvr_render::RenderError;
use tracing::info;

use crate::api::{AppInfo, InstanceRequest, MessengerDesc, MessengerEntryPoints, VulkanApi};
use crate::capability::{ensure_instance_extensions, ensure_instance_layers};

pub const DEBUG_UTILS_EXTENSION: &str = "VK_EXT_debug_utils";

pub type EntryPointsOf<V> = MessengerEntryPoints<
    <V as VulkanApi>::CreateMessengerFn,
    <V as VulkanApi>::DestroyMessengerFn,
>;

/// A freshly created instance plus the messenger entry points resolved
/// against it. The entry points are only looked up when diagnostics are on.
pub struct CreatedInstance<V: VulkanApi> {
    pub instance: V::Instance,
    pub messenger_entry_points: Option<EntryPointsOf<V>>,
}

/// The extension list actually requested from the platform: the window
/// system's list plus debug-utils when diagnostics are enabled.
pub fn instance_extensions(required: &[String], diagnostics: bool) -> Vec<String> {
    let mut exts = required.to_vec();
    if diagnostics && !exts.iter().any(|e| e == DEBUG_UTILS_EXTENSION) {
        exts.push(DEBUG_UTILS_EXTENSION.to_owned());
    }
    exts
}

/// Validates extensions then layers, and only then creates the instance.
/// `diagnostics` is chained into creation when present; it must be `Some`
/// exactly when `layers` is non-empty.
pub fn create_instance<V: VulkanApi>(
    api: &V,
    app: &AppInfo,
    required_extensions: &[String],
    layers: &[String],
    diagnostics: Option<MessengerDesc>,
) -> Result<CreatedInstance<V>, RenderError> {
    debug_assert_eq!(diagnostics.is_some(), !layers.is_empty());

    let extensions = instance_extensions(required_extensions, diagnostics.is_some());
    ensure_instance_extensions(api, &extensions)?;
    ensure_instance_layers(api, layers)?;

    let request = InstanceRequest {
        app,
        extensions: &extensions,
        layers,
        diagnostics,
    };
    let instance = api.create_instance(&request)?;
    info!(
        "vk: instance created for {} (extensions: {:?}, layers: {:?})",
        app.name, extensions, layers
    );

    let messenger_entry_points = diagnostics
        .is_some()
        .then(|| api.resolve_messenger_entry_points(&instance));

    Ok(CreatedInstance {
        instance,
        messenger_entry_points,
    })
}
