use std::fmt;

/// Logical name of a reference collection held by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Crops,
    Equipment,
    Locations,
    TraySizes,
    Named(String),
}

impl ReferenceKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "crops" => ReferenceKind::Crops,
            "equipment" => ReferenceKind::Equipment,
            "locations" => ReferenceKind::Locations,
            "tray_sizes" => ReferenceKind::TraySizes,
            other => ReferenceKind::Named(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            ReferenceKind::Crops => "crops",
            ReferenceKind::Equipment => "equipment",
            ReferenceKind::Locations => "locations",
            ReferenceKind::TraySizes => "tray_sizes",
            ReferenceKind::Named(name) => name,
        }
    }

    pub fn noun(&self) -> String {
        self.key().replace('_', " ")
    }

    pub fn fetch_error_message(&self) -> String {
        format!("Unable to fetch {}.", self.noun())
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
