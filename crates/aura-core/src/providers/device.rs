use crate::config::DeviceSetting;
use std::path::Path;
use std::sync::Arc;

/// Reports whether accelerated compute is present. Consulted only to pick the
/// fusion mode.
pub trait DeviceProbe: Send + Sync {
    fn accelerator_available(&self) -> bool;
    fn name(&self) -> &'static str;
}

/// Detects a visible NVIDIA/CUDA device on the host.
#[derive(Debug, Clone, Default)]
pub struct CudaProbe;

const NVIDIA_MARKERS: &[&str] = &["/proc/driver/nvidia/version", "/dev/nvidia0"];

impl CudaProbe {
    fn visible_devices_allow(value: Option<&str>) -> bool {
        match value.map(str::trim) {
            None => true,
            Some("") | Some("-1") => false,
            Some(_) => true,
        }
    }
}

impl DeviceProbe for CudaProbe {
    fn accelerator_available(&self) -> bool {
        let visible = std::env::var("CUDA_VISIBLE_DEVICES").ok();
        if !Self::visible_devices_allow(visible.as_deref()) {
            tracing::debug!("CUDA_VISIBLE_DEVICES hides all devices");
            return false;
        }
        let found = NVIDIA_MARKERS.iter().any(|p| Path::new(p).exists());
        tracing::debug!(found, "probed for CUDA device");
        found
    }

    fn name(&self) -> &'static str {
        "cuda"
    }
}

/// Fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl DeviceProbe for StaticProbe {
    fn accelerator_available(&self) -> bool {
        self.0
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

pub fn probe_for(setting: DeviceSetting) -> Arc<dyn DeviceProbe> {
    match setting {
        DeviceSetting::Auto => Arc::new(CudaProbe),
        DeviceSetting::Off => Arc::new(StaticProbe(false)),
    }
}
