use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where a classifier runs its forward pass.
///
/// Always passed explicitly by the caller; there is no implicit default
/// device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeTarget {
    Cpu,
    Gpu(u32),
}

impl ComputeTarget {
    pub fn is_cpu(&self) -> bool {
        matches!(self, ComputeTarget::Cpu)
    }
}

impl fmt::Display for ComputeTarget {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ComputeTarget::Cpu => write!(f, "cpu"),
            ComputeTarget::Gpu(ordinal) => write!(f, "gpu:{ordinal}"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown compute target: {0}")]
pub struct ParseComputeTargetError(String);

impl FromStr for ComputeTarget {
    type Err = ParseComputeTargetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "cpu" => Ok(ComputeTarget::Cpu),
            "gpu" | "cuda" => Ok(ComputeTarget::Gpu(0)),
            other => other
                .strip_prefix("gpu:")
                .or_else(|| other.strip_prefix("cuda:"))
                .and_then(|ordinal| ordinal.parse::<u32>().ok())
                .map(ComputeTarget::Gpu)
                .ok_or_else(|| ParseComputeTargetError(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("cpu".parse::<ComputeTarget>(), Ok(ComputeTarget::Cpu));
        assert_eq!("CUDA".parse::<ComputeTarget>(), Ok(ComputeTarget::Gpu(0)));
        assert_eq!("gpu:3".parse::<ComputeTarget>(), Ok(ComputeTarget::Gpu(3)));
        assert!("tpu".parse::<ComputeTarget>().is_err());
        assert!("gpu:x".parse::<ComputeTarget>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for target in [ComputeTarget::Cpu, ComputeTarget::Gpu(1)] {
            assert_eq!(target.to_string().parse::<ComputeTarget>(), Ok(target));
        }
    }

    #[test]
    fn test_serde_representation() {
        let cpu: ComputeTarget = serde_json::from_str("\"cpu\"").unwrap();
        let gpu: ComputeTarget = serde_json::from_str("{\"gpu\": 2}").unwrap();
        assert_eq!(cpu, ComputeTarget::Cpu);
        assert_eq!(gpu, ComputeTarget::Gpu(2));
    }
}
