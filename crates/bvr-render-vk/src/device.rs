// SPDX-License-Identifier: CEPL-1.0
use ash::vk;
use bvr_render::RenderError;
use tracing::{debug, info};

use crate::api::{DeviceProperties, VulkanApi};

/// The only device class accepted. There is deliberately no fallback tier.
pub const REQUIRED_DEVICE_TYPE: vk::PhysicalDeviceType = vk::PhysicalDeviceType::DISCRETE_GPU;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: Option<u32>,
}

impl QueueFamilyIndices {
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some()
    }
}

/// The physical device kept for the rest of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalDeviceDescriptor<P> {
    pub handle: P,
    pub name: String,
    pub device_type: vk::PhysicalDeviceType,
    pub queue_families: QueueFamilyIndices,
}

/// Scans families in enumeration order and stops as soon as every index we
/// care about is known.
pub fn find_queue_families(families: &[vk::QueueFamilyProperties]) -> QueueFamilyIndices {
    let mut indices = QueueFamilyIndices::default();
    for (i, family) in families.iter().enumerate() {
        if family.queue_count > 0 && family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
            indices.graphics = Some(i as u32);
        }
        if indices.is_complete() {
            break;
        }
    }
    indices
}

/// Why a candidate was turned down, if it was.
fn rejection(props: &DeviceProperties, indices: &QueueFamilyIndices) -> Option<&'static str> {
    if props.device_type != REQUIRED_DEVICE_TYPE {
        Some("not a discrete GPU")
    } else if !indices.is_complete() {
        Some("no graphics queue family")
    } else {
        None
    }
}

pub fn is_device_suitable(props: &DeviceProperties, indices: &QueueFamilyIndices) -> bool {
    rejection(props, indices).is_none()
}

/// Picks the first suitable device in enumeration order.
pub fn select_physical_device<V: VulkanApi>(
    api: &V,
    instance: &V::Instance,
) -> Result<PhysicalDeviceDescriptor<V::PhysicalDevice>, RenderError> {
    let devices = api.enumerate_physical_devices(instance)?;
    debug!("vk: {} physical device(s) found", devices.len());

    for &handle in &devices {
        let props = api.physical_device_properties(instance, handle);
        let families = api.queue_family_properties(instance, handle);
        let queue_families = find_queue_families(&families);

        if let Some(reason) = rejection(&props, &queue_families) {
            debug!(
                "vk: skipping {} ({:?}): {}",
                props.name, props.device_type, reason
            );
            continue;
        }

        info!(
            "vk: selected {} ({:?}), graphics family {:?}",
            props.name, props.device_type, queue_families.graphics
        );
        return Ok(PhysicalDeviceDescriptor {
            handle,
            name: props.name,
            device_type: props.device_type,
            queue_families,
        });
    }

    Err(RenderError::NoSuitableDevice {
        candidates: devices.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(flags: vk::QueueFlags, count: u32) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_flags: flags,
            queue_count: count,
            ..Default::default()
        }
    }

    fn props(device_type: vk::PhysicalDeviceType) -> DeviceProperties {
        DeviceProperties {
            name: "gpu".to_owned(),
            device_type,
        }
    }

    #[test]
    fn first_graphics_family_is_recorded() {
        let families = [
            family(vk::QueueFlags::COMPUTE, 4),
            family(vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE, 16),
            family(vk::QueueFlags::GRAPHICS, 1),
        ];
        assert_eq!(find_queue_families(&families).graphics, Some(1));
    }

    #[test]
    fn empty_graphics_family_is_ignored() {
        let families = [
            family(vk::QueueFlags::GRAPHICS, 0),
            family(vk::QueueFlags::GRAPHICS, 2),
        ];
        assert_eq!(find_queue_families(&families).graphics, Some(1));
    }

    #[test]
    fn compute_only_device_is_incomplete() {
        let families = [
            family(vk::QueueFlags::COMPUTE, 8),
            family(vk::QueueFlags::TRANSFER, 2),
        ];
        let indices = find_queue_families(&families);
        assert!(!indices.is_complete());
        assert!(!find_queue_families(&[]).is_complete());
    }

    #[test]
    fn suitability_needs_discrete_and_graphics() {
        let complete = QueueFamilyIndices { graphics: Some(0) };
        let incomplete = QueueFamilyIndices::default();

        assert!(is_device_suitable(
            &props(vk::PhysicalDeviceType::DISCRETE_GPU),
            &complete
        ));
        assert!(!is_device_suitable(
            &props(vk::PhysicalDeviceType::DISCRETE_GPU),
            &incomplete
        ));
        assert!(!is_device_suitable(
            &props(vk::PhysicalDeviceType::INTEGRATED_GPU),
            &complete
        ));
        assert!(!is_device_suitable(
            &props(vk::PhysicalDeviceType::CPU),
            &complete
        ));
    }
}
