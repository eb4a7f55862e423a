// SPDX-License-Identifier: CEPL-1.0
use ash::vk;
use bvr_render::RenderError;

/// Application metadata baked into the instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: u32,
    pub engine_name: String,
    pub engine_version: u32,
    pub api_version: u32,
}

impl AppInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: vk::make_api_version(0, 0, 1, 0),
            engine_name: "N/A".to_owned(),
            engine_version: vk::make_api_version(0, 0, 1, 0),
            api_version: vk::API_VERSION_1_1,
        }
    }
}

/// Which messages a debug-utils messenger asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessengerDesc {
    pub severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    pub types: vk::DebugUtilsMessageTypeFlagsEXT,
}

impl MessengerDesc {
    pub fn all() -> Self {
        Self {
            severity: vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            types: vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        }
    }
}

/// Everything `vkCreateInstance` needs, already validated.
#[derive(Clone, Debug)]
pub struct InstanceRequest<'a> {
    pub app: &'a AppInfo,
    pub extensions: &'a [String],
    pub layers: &'a [String],
    /// Chained into the create info so messages emitted during instance
    /// creation are captured too.
    pub diagnostics: Option<MessengerDesc>,
}

/// Messenger entry points looked up through the instance. Either may be
/// missing; callers decide what that means.
#[derive(Clone, Copy, Debug)]
pub struct MessengerEntryPoints<C, D> {
    pub create: Option<C>,
    pub destroy: Option<D>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceProperties {
    pub name: String,
    pub device_type: vk::PhysicalDeviceType,
}

/// The Vulkan calls the bootstrap makes. Handles are moved into the
/// `destroy_*` calls, so each can be released at most once.
pub trait VulkanApi {
    type Instance;
    type Messenger;
    type PhysicalDevice: Copy;
    type CreateMessengerFn: Copy;
    type DestroyMessengerFn: Copy;

    fn enumerate_instance_extensions(&self) -> Result<Vec<String>, RenderError>;

    fn enumerate_instance_layers(&self) -> Result<Vec<String>, RenderError>;

    fn create_instance(&self, request: &InstanceRequest<'_>)
        -> Result<Self::Instance, RenderError>;

    fn destroy_instance(&self, instance: Self::Instance);

    fn resolve_messenger_entry_points(
        &self,
        instance: &Self::Instance,
    ) -> MessengerEntryPoints<Self::CreateMessengerFn, Self::DestroyMessengerFn>;

    fn create_messenger(
        &self,
        instance: &Self::Instance,
        create: Self::CreateMessengerFn,
        desc: &MessengerDesc,
    ) -> Result<Self::Messenger, RenderError>;

    fn destroy_messenger(
        &self,
        instance: &Self::Instance,
        destroy: Self::DestroyMessengerFn,
        messenger: Self::Messenger,
    );

    fn enumerate_physical_devices(
        &self,
        instance: &Self::Instance,
    ) -> Result<Vec<Self::PhysicalDevice>, RenderError>;

    fn physical_device_properties(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> DeviceProperties;

    fn queue_family_properties(
        &self,
        instance: &Self::Instance,
        device: Self::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties>;
}

/// Wraps a failed `vk::Result` with the name of the call that produced it.
pub(crate) fn api_error(call: &'static str) -> impl FnOnce(vk::Result) -> RenderError {
    move |res| RenderError::Api {
        call,
        reason: res.to_string(),
    }
}
