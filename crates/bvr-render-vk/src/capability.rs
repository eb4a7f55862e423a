// SPDX-License-Identifier: CEPL-1.0
use bvr_render::{CapabilityKind, RenderError};
use tracing::debug;

use crate::api::VulkanApi;

/// Checks that every requested name appears in `available`, by exact
/// case-sensitive match. Reports the first missing name in request order.
pub fn validate_capabilities<R, A>(
    kind: CapabilityKind,
    requested: &[R],
    available: &[A],
) -> Result<(), RenderError>
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    for want in requested {
        let want = want.as_ref();
        if !available.iter().any(|have| have.as_ref() == want) {
            return Err(RenderError::unsupported(kind, want));
        }
    }
    Ok(())
}

pub fn ensure_instance_extensions<V: VulkanApi>(
    api: &V,
    requested: &[String],
) -> Result<(), RenderError> {
    let available = api.enumerate_instance_extensions()?;
    debug!("vk: {} instance extensions available", available.len());
    validate_capabilities(CapabilityKind::Extension, requested, &available)
}

pub fn ensure_instance_layers<V: VulkanApi>(
    api: &V,
    requested: &[String],
) -> Result<(), RenderError> {
    let available = api.enumerate_instance_layers()?;
    debug!("vk: {} instance layers available", available.len());
    validate_capabilities(CapabilityKind::Layer, requested, &available)
}
