// SPDX-License-Identifier: CEPL-1.0
#![deny(unsafe_op_in_unsafe_fn)]
//! Window-system glue. Owns nothing Vulkan; only reports what the window
//! system needs from the instance.

use std::ffi::CStr;

use bvr_render::{RenderConfig, RenderError};
use raw_window_handle::HasDisplayHandle;
use tracing::debug;

pub use winit;

use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes};

/// Attributes for the single, fixed-size application window.
pub fn window_attributes(config: &RenderConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.app_name.as_str())
        .with_inner_size(LogicalSize::new(config.size.width, config.size.height))
        .with_resizable(false)
}

/// Instance extensions the window system needs to present to `display`.
pub fn required_instance_extensions(
    display: &dyn HasDisplayHandle,
) -> Result<Vec<String>, RenderError> {
    let raw = display
        .display_handle()
        .map_err(|e| RenderError::Initialization(format!("display handle: {e}")))?
        .as_raw();
    let names = ash_window::enumerate_required_extensions(raw).map_err(|e| {
        RenderError::Initialization(format!("enumerate_required_extensions: {e}"))
    })?;

    let exts: Vec<String> = names
        .iter()
        // SAFETY: ash-window returns pointers to static NUL-terminated names.
        .map(|&p| unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned())
        .collect();
    debug!("platform: window system requires {:?}", exts);
    Ok(exts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bvr_render::RenderSize;
    use winit::dpi::Size;

    #[test]
    fn window_is_fixed_size_and_titled() {
        let cfg = RenderConfig::new(
            "BVR",
            RenderSize {
                width: 1280,
                height: 720,
            },
            false,
        );
        let attrs = window_attributes(&cfg);
        assert_eq!(attrs.title, "BVR");
        assert!(!attrs.resizable);
        assert_eq!(
            attrs.inner_size,
            Some(Size::from(LogicalSize::new(1280, 720)))
        );
    }
}
