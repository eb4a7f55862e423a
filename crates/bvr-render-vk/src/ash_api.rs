// SPDX-License-Identifier: CEPL-1.0
use std::ffi::{c_char, CStr, CString};

use ash::{vk, Entry, Instance};
use bvr_render::RenderError;
use tracing::debug;

use crate::api::{
    api_error, DeviceProperties, InstanceRequest, MessengerDesc, MessengerEntryPoints, VulkanApi,
};
use crate::messenger::debug_callback;

/// `VulkanApi` backed by the system Vulkan loader.
pub struct AshApi {
    entry: Entry,
}

impl AshApi {
    /// Loads the Vulkan loader library at runtime.
    pub fn load() -> Result<Self, RenderError> {
        // SAFETY: the loader is kept alive by `entry` for as long as any
        // handle created through this value.
        let entry = unsafe { Entry::load() }
            .map_err(|e| RenderError::Initialization(format!("load Vulkan loader: {e}")))?;
        Ok(Self { entry })
    }
}

fn to_cstrings(names: &[String]) -> Result<Vec<CString>, RenderError> {
    names
        .iter()
        .map(|n| {
            CString::new(n.as_str())
                .map_err(|_| RenderError::Initialization(format!("invalid name {n:?}")))
        })
        .collect()
}

fn messenger_create_info<'a>(desc: &MessengerDesc) -> vk::DebugUtilsMessengerCreateInfoEXT<'a> {
    vk::DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(desc.severity)
        .message_type(desc.types)
        .pfn_user_callback(Some(debug_callback))
}

fn name_to_string(name: Result<&CStr, std::ffi::FromBytesUntilNulError>) -> String {
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "<unnamed>".to_owned())
}

impl VulkanApi for AshApi {
    type Instance = Instance;
    type Messenger = vk::DebugUtilsMessengerEXT;
    type PhysicalDevice = vk::PhysicalDevice;
    type CreateMessengerFn = vk::PFN_vkCreateDebugUtilsMessengerEXT;
    type DestroyMessengerFn = vk::PFN_vkDestroyDebugUtilsMessengerEXT;

    fn enumerate_instance_extensions(&self) -> Result<Vec<String>, RenderError> {
        let props = unsafe { self.entry.enumerate_instance_extension_properties(None) }
            .map_err(api_error("vkEnumerateInstanceExtensionProperties"))?;
        Ok(props
            .iter()
            .map(|p| name_to_string(p.extension_name_as_c_str()))
            .collect())
    }

    fn enumerate_instance_layers(&self) -> Result<Vec<String>, RenderError> {
        let props = unsafe { self.entry.enumerate_instance_layer_properties() }
            .map_err(api_error("vkEnumerateInstanceLayerProperties"))?;
        Ok(props
            .iter()
            .map(|p| name_to_string(p.layer_name_as_c_str()))
            .collect())
    }

    fn create_instance(&self, request: &InstanceRequest<'_>) -> Result<Instance, RenderError> {
        let app_name = CString::new(request.app.name.as_str())
            .map_err(|_| RenderError::Initialization("application name contains NUL".into()))?;
        let engine_name = CString::new(request.app.engine_name.as_str())
            .map_err(|_| RenderError::Initialization("engine name contains NUL".into()))?;

        let app_info = vk::ApplicationInfo::default()
            .application_name(&app_name)
            .application_version(request.app.version)
            .engine_name(&engine_name)
            .engine_version(request.app.engine_version)
            .api_version(request.app.api_version);

        let extensions = to_cstrings(request.extensions)?;
        let layers = to_cstrings(request.layers)?;
        let ext_ptrs: Vec<*const c_char> = extensions.iter().map(|e| e.as_ptr()).collect();
        let layer_ptrs: Vec<*const c_char> = layers.iter().map(|l| l.as_ptr()).collect();

        let mut create_info = vk::InstanceCreateInfo::default()
            .application_info(&app_info)
            .enabled_extension_names(&ext_ptrs)
            .enabled_layer_names(&layer_ptrs);

        // Chained so messages from vkCreateInstance itself are reported.
        let mut debug_info = request.diagnostics.as_ref().map(messenger_create_info);
        if let Some(info) = debug_info.as_mut() {
            create_info = create_info.push_next(info);
        }

        // SAFETY: every pointer in `create_info` borrows locals that outlive
        // this call.
        unsafe { self.entry.create_instance(&create_info, None) }
            .map_err(api_error("vkCreateInstance"))
    }

    fn destroy_instance(&self, instance: Instance) {
        // SAFETY: the instance is consumed; every child object has already
        // been destroyed by the lifecycle.
        unsafe { instance.destroy_instance(None) };
    }

    fn resolve_messenger_entry_points(
        &self,
        instance: &Instance,
    ) -> MessengerEntryPoints<Self::CreateMessengerFn, Self::DestroyMessengerFn> {
        let handle = instance.handle();
        // SAFETY: the returned pointers are reinterpreted as the exact
        // signatures the Vulkan registry declares for these names.
        let create = unsafe {
            self.entry
                .get_instance_proc_addr(handle, c"vkCreateDebugUtilsMessengerEXT".as_ptr())
                .map(|f| std::mem::transmute::<_, vk::PFN_vkCreateDebugUtilsMessengerEXT>(f))
        };
        let destroy = unsafe {
            self.entry
                .get_instance_proc_addr(handle, c"vkDestroyDebugUtilsMessengerEXT".as_ptr())
                .map(|f| std::mem::transmute::<_, vk::PFN_vkDestroyDebugUtilsMessengerEXT>(f))
        };
        debug!(
            "vk: messenger entry points resolved (create={}, destroy={})",
            create.is_some(),
            destroy.is_some()
        );
        MessengerEntryPoints { create, destroy }
    }

    fn create_messenger(
        &self,
        instance: &Instance,
        create: Self::CreateMessengerFn,
        desc: &MessengerDesc,
    ) -> Result<vk::DebugUtilsMessengerEXT, RenderError> {
        let info = messenger_create_info(desc);
        let mut messenger = vk::DebugUtilsMessengerEXT::null();
        // SAFETY: `create` was resolved against this instance.
        unsafe { create(instance.handle(), &info, std::ptr::null(), &mut messenger) }
            .result()
            .map_err(api_error("vkCreateDebugUtilsMessengerEXT"))?;
        Ok(messenger)
    }

    fn destroy_messenger(
        &self,
        instance: &Instance,
        destroy: Self::DestroyMessengerFn,
        messenger: vk::DebugUtilsMessengerEXT,
    ) {
        // SAFETY: `messenger` was created from this instance and is consumed.
        unsafe { destroy(instance.handle(), messenger, std::ptr::null()) };
    }

    fn enumerate_physical_devices(
        &self,
        instance: &Instance,
    ) -> Result<Vec<vk::PhysicalDevice>, RenderError> {
        unsafe { instance.enumerate_physical_devices() }
            .map_err(api_error("vkEnumeratePhysicalDevices"))
    }

    fn physical_device_properties(
        &self,
        instance: &Instance,
        device: vk::PhysicalDevice,
    ) -> DeviceProperties {
        let props = unsafe { instance.get_physical_device_properties(device) };
        DeviceProperties {
            name: name_to_string(props.device_name_as_c_str()),
            device_type: props.device_type,
        }
    }

    fn queue_family_properties(
        &self,
        instance: &Instance,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        unsafe { instance.get_physical_device_queue_family_properties(device) }
    }
}
