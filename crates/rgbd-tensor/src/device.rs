/// Device where a tensor buffer lives.
///
/// Only host memory is backed by an allocator today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Device {
    /// CPU device
    #[default]
    Cpu,
}

impl Device {
    /// Returns the device type as a string.
    pub fn device_type(&self) -> &str {
        match self {
            Device::Cpu => "CPU",
        }
    }

    /// Returns the device index.
    pub fn device_id(&self) -> usize {
        match self {
            Device::Cpu => 0,
        }
    }

    /// Returns true if the device is CPU.
    pub fn is_cpu(&self) -> bool {
        matches!(self, Device::Cpu)
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.device_type(), self.device_id())
    }
}
