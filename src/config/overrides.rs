use serde::Serialize;

/// Settings passed on the command line
///
/// Only the fields that were actually given are serialized, so merging this over
/// the other layers leaves everything else alone. `exclude` is appended to the
/// configured patterns rather than replacing them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_ignore_file: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.marker.is_none() && self.use_ignore_file.is_none() && self.exclude.is_empty()
    }
}
