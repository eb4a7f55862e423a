// SPDX-License-Identifier: CEPL-1.0
use bvr_render::{LifecycleState, RenderConfig, RenderError, Renderer};
use tracing::info;

use crate::api::{AppInfo, MessengerDesc, VulkanApi};
use crate::device::{select_physical_device, PhysicalDeviceDescriptor};
use crate::instance::create_instance;
use crate::messenger::DiagnosticsMessenger;

/// Owns every handle the bootstrap creates.
///
/// STRICT ORDER:
/// - init:    instance -> messenger (if layers) -> physical device -> ready
/// - cleanup: messenger -> device -> instance
///
/// Each handle is stored the moment it exists, so `cleanup` after a failed
/// `init` releases exactly what was created.
pub struct RendererLifecycle<V: VulkanApi> {
    api: V,
    config: RenderConfig,
    app: AppInfo,
    state: LifecycleState,
    // set by the first `init`, successful or not
    attempted: bool,
    instance: Option<V::Instance>,
    messenger: Option<DiagnosticsMessenger<V>>,
    device: Option<PhysicalDeviceDescriptor<V::PhysicalDevice>>,
}

impl<V: VulkanApi> RendererLifecycle<V> {
    pub fn new(api: V, config: RenderConfig) -> Self {
        let app = AppInfo::new(config.app_name.clone());
        Self {
            api,
            config,
            app,
            state: LifecycleState::Uninitialized,
            attempted: false,
            instance: None,
            messenger: None,
            device: None,
        }
    }

    pub fn instance(&self) -> Option<&V::Instance> {
        self.instance.as_ref()
    }

    pub fn has_messenger(&self) -> bool {
        self.messenger.as_ref().is_some_and(|m| m.is_live())
    }

    pub fn physical_device(&self) -> Option<&PhysicalDeviceDescriptor<V::PhysicalDevice>> {
        self.device.as_ref()
    }

    fn diagnostics_desc(&self) -> Option<MessengerDesc> {
        self.config
            .validation_enabled()
            .then(MessengerDesc::all)
    }

    fn run_stages(&mut self, required_extensions: &[String]) -> Result<(), RenderError> {
        let diagnostics = self.diagnostics_desc();

        let created = create_instance(
            &self.api,
            &self.app,
            required_extensions,
            &self.config.validation_layers,
            diagnostics,
        )?;
        let instance = &*self.instance.insert(created.instance);
        self.state = LifecycleState::InstanceCreated;

        if let (Some(desc), Some(entry_points)) = (diagnostics, created.messenger_entry_points) {
            let messenger = DiagnosticsMessenger::attach(&self.api, instance, entry_points, &desc)?;
            self.messenger = Some(messenger);
            self.state = LifecycleState::DiagnosticsAttached;
        }

        let device = select_physical_device(&self.api, instance)?;
        self.device = Some(device);
        self.state = LifecycleState::DeviceSelected;

        self.state = LifecycleState::Ready;
        Ok(())
    }
}

impl<V: VulkanApi> Renderer for RendererLifecycle<V> {
    fn init(&mut self, required_extensions: &[String]) -> Result<(), RenderError> {
        if self.attempted {
            return Err(RenderError::AlreadyInitialized(self.state));
        }
        self.attempted = true;
        self.run_stages(required_extensions)?;
        info!(
            "vk: renderer ready ({}x{}, validation={})",
            self.config.size.width,
            self.config.size.height,
            self.config.validation_enabled()
        );
        Ok(())
    }

    fn cleanup(&mut self) {
        if let Some(mut messenger) = self.messenger.take() {
            if let Some(instance) = self.instance.as_ref() {
                messenger.destroy(&self.api, instance);
            }
        }
        self.device = None;
        if let Some(instance) = self.instance.take() {
            self.api.destroy_instance(instance);
            info!("vk: instance destroyed");
        }
        if self.state != LifecycleState::Uninitialized {
            self.state = LifecycleState::TornDown;
        }
    }

    fn render_frame(&mut self) -> Result<(), RenderError> {
        match self.state {
            // nothing to draw until a pipeline exists
            LifecycleState::Ready => Ok(()),
            other => Err(RenderError::NotReady(other)),
        }
    }

    fn state(&self) -> LifecycleState {
        self.state
    }
}

impl<V: VulkanApi> Drop for RendererLifecycle<V> {
    fn drop(&mut self) {
        self.cleanup();
    }
}
