use serde::{Deserialize, Serialize};

/// A photo or avatar the player attached, by path on this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub path: String,
    pub size_bytes: u64,
}
