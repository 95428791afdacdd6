use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel understood by the capture engine as "every interface".
pub const ALL_INTERFACES: &str = "any";

/// Interface selection for a capture session.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CaptureInterface {
    /// Capture on every interface of the host.
    All,
    /// Capture on a single named interface (e.g. `eth0`).
    Named(String),
}

impl CaptureInterface {
    /// Value passed to the capture engine's interface argument.
    pub fn as_engine_arg(&self) -> &str {
        match self {
            CaptureInterface::All => ALL_INTERFACES,
            CaptureInterface::Named(name) => name,
        }
    }
}

impl Default for CaptureInterface {
    fn default() -> Self {
        CaptureInterface::All
    }
}

impl FromStr for CaptureInterface {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_INTERFACES {
            Ok(CaptureInterface::All)
        } else {
            Ok(CaptureInterface::Named(s.to_string()))
        }
    }
}

impl fmt::Display for CaptureInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_engine_arg())
    }
}
