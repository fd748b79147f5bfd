use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

/// Stable key for a county.
/// Keeps the original GEOID text (with leading zeros) but avoids repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoId(Arc<str>); // e.g., "31001"

impl GeoId {
    pub fn new(id: impl AsRef<str>) -> Self { Self(Arc::from(id.as_ref())) }

    /// Get the raw GEOID text.
    #[inline] pub fn id(&self) -> &str { &self.0 }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for GeoId {
    fn from(id: &str) -> Self { Self::new(id) }
}

impl From<String> for GeoId {
    fn from(id: String) -> Self { Self(Arc::from(id)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_leading_zeros() {
        let id = GeoId::from("06037");
        assert_eq!(id.id(), "06037");
        assert_eq!(id.to_string(), "06037");
        assert_eq!(id, GeoId::from(String::from("06037")));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&GeoId::new("06037")).unwrap();
        assert_eq!(json, "\"06037\"");
    }
}
