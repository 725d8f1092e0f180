//! Device selection for the posture classifier.

use candle_core::Device;
use tracing::debug;

/// Returns the device the classifier runs on.
///
/// GPU backends are only tried when the crate is built with the `metal` or
/// `cuda` feature; a missing GPU falls back to the CPU.
#[must_use]
pub fn get_device() -> Device {
    #[cfg(feature = "metal")]
    if let Ok(device) = Device::new_metal(0) {
        debug!("Posture classifier on {}", device_name(&device));
        return device;
    }

    #[cfg(feature = "cuda")]
    if let Ok(device) = Device::new_cuda(0) {
        debug!("Posture classifier on {}", device_name(&device));
        return device;
    }

    let device = Device::Cpu;
    debug!("Posture classifier on {}", device_name(&device));
    device
}

/// Short human-readable name of a device, used in logs.
#[must_use]
pub fn device_name(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Cuda(_) => "cuda",
        Device::Metal(_) => "metal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_name() {
        assert_eq!(device_name(&Device::Cpu), "cpu");
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    #[test]
    fn test_default_build_uses_cpu() {
        assert!(matches!(get_device(), Device::Cpu));
    }
}
