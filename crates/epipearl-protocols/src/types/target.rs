//! Addressable resources on the device.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A channel or a recorder, identified by its numeric id as the device
/// reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum DeviceTarget {
    Channel(String),
    Recorder(String),
}

impl DeviceTarget {
    pub fn channel(id: impl Into<String>) -> Self {
        Self::Channel(id.into())
    }

    pub fn recorder(id: impl Into<String>) -> Self {
        Self::Recorder(id.into())
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Channel(id) | Self::Recorder(id) => id,
        }
    }
}

impl fmt::Display for DeviceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Channel(id) => write!(f, "channel{id}"),
            Self::Recorder(id) => write!(f, "recorder{id}"),
        }
    }
}
