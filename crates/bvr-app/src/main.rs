// SPDX-License-Identifier: CEPL-1.0
#![deny(unsafe_op_in_unsafe_fn)]
use std::path::Path;

use anyhow::{Context, Result};
use bvr_core::init_tracing;
use bvr_platform::{required_instance_extensions, window_attributes};
use bvr_render::{RenderConfig, RenderError, Renderer};
use bvr_render_vk::VkRenderer;
use clap::Parser;
use tracing::{error, info};

use bvr_platform::winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod config;

use config::{AppCfg, CONFIG_FILE};

/// Vulkan bootstrap demo. Settings are read from bvr.toml.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {}

struct App {
    config: RenderConfig,
    // Field order matters: the renderer must go before the window.
    renderer: Option<VkRenderer>,
    window: Option<Window>,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: RenderConfig) -> Self {
        App {
            config,
            renderer: None,
            window: None,
            failure: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = event_loop
            .create_window(window_attributes(&self.config))
            .map_err(|e| RenderError::Initialization(format!("create window: {e}")))?;
        let extensions = required_instance_extensions(&window)?;

        // STRICT ORDER: window exists before any Vulkan call, and is stored
        // before the renderer so a failed init still tears down cleanly.
        self.window = Some(window);

        let mut renderer = VkRenderer::load(self.config.clone())?;
        let res = renderer.init(&extensions);
        self.renderer = Some(renderer);
        res.context("renderer init")?;
        Ok(())
    }

    /// Releases graphics resources, then the window.
    fn shutdown(&mut self) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.cleanup();
        }
        self.window = None;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.failure.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        if let Err(e) = self.start(event_loop) {
            error!("init failed: {e:#}");
            self.shutdown();
            self.failure = Some(e);
            event_loop.exit();
            return;
        }
        info!("initialized ({}x{})", self.config.size.width, self.config.size.height);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(window) = &self.window {
            if window_id != window.id() {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("CloseRequested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.render_frame() {
                        error!("render error: {e}");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let _args = Args::parse();

    let cfg = AppCfg::load(Path::new(CONFIG_FILE));
    let render_config = cfg.render_config();
    info!(
        "validation = {} ({:?})",
        render_config.validation_enabled(),
        render_config.validation_layers
    );

    let event_loop: EventLoop<()> = EventLoop::new()
        .map_err(|e| RenderError::Initialization(format!("windowing system: {e}")))?;

    let mut app = App::new(render_config);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.failure.take() {
        return Err(e);
    }
    Ok(())
}
