// SPDX-License-Identifier: CEPL-1.0
use std::fmt;

mod error;

pub use error::{CapabilityKind, RenderError};

/// Name of the Khronos validation layer.
pub const KHRONOS_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Window size in logical pixels. Both sides are at least 1 once loaded
/// from config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSize {
    pub width: u32,
    pub height: u32,
}

/// Startup configuration handed to a renderer once. An empty
/// `validation_layers` list disables diagnostics entirely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    pub size: RenderSize,
    pub app_name: String,
    pub validation_layers: Vec<String>,
}

impl RenderConfig {
    pub fn new(app_name: impl Into<String>, size: RenderSize, validation: bool) -> Self {
        let validation_layers = if validation {
            vec![KHRONOS_VALIDATION_LAYER.to_owned()]
        } else {
            Vec::new()
        };
        Self {
            size,
            app_name: app_name.into(),
            validation_layers,
        }
    }

    pub fn with_validation_layers(mut self, layers: Vec<String>) -> Self {
        self.validation_layers = layers;
        self
    }

    pub fn validation_enabled(&self) -> bool {
        !self.validation_layers.is_empty()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::new(
            "BVR",
            RenderSize {
                width: 1280,
                height: 720,
            },
            cfg!(debug_assertions),
        )
    }
}

/// Bootstrap progress of a renderer. Stages are only ever entered in
/// declaration order; `TornDown` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Uninitialized,
    InstanceCreated,
    DiagnosticsAttached,
    DeviceSelected,
    Ready,
    TornDown,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::InstanceCreated => "instance created",
            LifecycleState::DiagnosticsAttached => "diagnostics attached",
            LifecycleState::DeviceSelected => "device selected",
            LifecycleState::Ready => "ready",
            LifecycleState::TornDown => "torn down",
        };
        f.write_str(s)
    }
}

pub trait Renderer {
    /// Runs every bootstrap stage in order. `required_extensions` are the
    /// instance extensions the windowing system needs.
    fn init(&mut self, required_extensions: &[String]) -> Result<(), RenderError>;

    /// Releases whatever `init` managed to create, in reverse order.
    fn cleanup(&mut self);

    fn render_frame(&mut self) -> Result<(), RenderError>;

    fn state(&self) -> LifecycleState;
}
