// SPDX-License-Identifier: CEPL-1.0
use std::fs;
use std::path::Path;

use bvr_render::{RenderConfig, RenderSize, KHRONOS_VALIDATION_LAYER};
use serde::Deserialize;
use tracing::warn;

pub const CONFIG_FILE: &str = "bvr.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct WindowCfg {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenderCfg {
    /// Populates the validation layer list. Debug builds default to on.
    #[serde(default = "default_validation")]
    pub validation: bool,
    #[serde(default = "default_layers")]
    pub validation_layers: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct AppCfg {
    #[serde(default)]
    pub window: WindowCfg,
    #[serde(default)]
    pub render: RenderCfg,
}

impl Default for WindowCfg {
    fn default() -> Self {
        WindowCfg {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for RenderCfg {
    fn default() -> Self {
        RenderCfg {
            validation: default_validation(),
            validation_layers: default_layers(),
        }
    }
}

fn default_title() -> String {
    "BVR".to_owned()
}
fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}
fn default_validation() -> bool {
    cfg!(debug_assertions)
}
fn default_layers() -> Vec<String> {
    vec![KHRONOS_VALIDATION_LAYER.to_owned()]
}

impl AppCfg {
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Missing file means defaults; a malformed one is reported and ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => AppCfg::parse(&s).unwrap_or_else(|e| {
                warn!("{}: {e}; using defaults", path.display());
                AppCfg::default()
            }),
            Err(_) => AppCfg::default(),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let size = RenderSize {
            width: self.window.width.max(1),
            height: self.window.height.max(1),
        };
        let layers = if self.render.validation {
            self.render.validation_layers.clone()
        } else {
            Vec::new()
        };
        RenderConfig::new(self.window.title.clone(), size, false).with_validation_layers(layers)
    }
}
