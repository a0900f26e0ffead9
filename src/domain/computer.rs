use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MIN_CODE_LEN: usize = 3;

/// Inventory tag of a lab machine, e.g. `LAB1-PC07`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerCode(String);

impl TryFrom<&str> for ComputerCode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        if value.encode_utf16().count() < MIN_CODE_LEN {
            anyhow::bail!("code must be at least {MIN_CODE_LEN} characters");
        }
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for ComputerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for ComputerCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputerStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    Retired,
}

impl ComputerStatus {
    pub const ALL: [ComputerStatus; 4] = [
        ComputerStatus::Available,
        ComputerStatus::InUse,
        ComputerStatus::Maintenance,
        ComputerStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComputerStatus::Available => "available",
            ComputerStatus::InUse => "in_use",
            ComputerStatus::Maintenance => "maintenance",
            ComputerStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for ComputerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ComputerStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ComputerStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown computer status `{}`", s))
    }
}

impl TryFrom<String> for ComputerStatus {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
