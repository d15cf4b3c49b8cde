use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// A named reference to a directory holding one managed environment.
///
/// Two installations are the same entity when their names match, whatever
/// their roots say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installation {
    pub name: String,
    pub root: String,
}

impl Installation {
    pub fn new(name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn root_path(&self) -> &Path {
        Path::new(&self.root)
    }
}

impl PartialEq for Installation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Installation {}

impl Hash for Installation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Installation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.root)
    }
}
