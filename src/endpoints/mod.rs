//! # Known Endpoints
//!
//! Catalog of well-known remote interfaces (registry, DGC, JMX, ...). The
//! catalog is loaded once and passed by reference to whoever needs it; a
//! lookup miss is a normal `None`.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../../resources/known_endpoints.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownEndpoint {
    pub name: String,
    pub class_names: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub remote_methods: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
}

#[derive(Debug, Clone, Default)]
pub struct KnownEndpointCatalog {
    endpoints: Vec<Arc<KnownEndpoint>>,
    by_class: HashMap<String, usize>,
}

impl KnownEndpointCatalog {
    pub fn from_endpoints(endpoints: Vec<KnownEndpoint>) -> Self {
        let mut by_class = HashMap::new();
        for (index, endpoint) in endpoints.iter().enumerate() {
            for class_name in &endpoint.class_names {
                by_class.entry(class_name.clone()).or_insert(index);
            }
        }

        Self {
            endpoints: endpoints.into_iter().map(Arc::new).collect(),
            by_class,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let endpoints: Vec<KnownEndpoint> = serde_json::from_str(json)?;
        Ok(Self::from_endpoints(endpoints))
    }

    /// Catalog shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            endpoints = catalog.len(),
            "Loaded known endpoint catalog"
        );
        Ok(catalog)
    }

    pub fn lookup(&self, class_name: &str) -> Option<Arc<KnownEndpoint>> {
        self.by_class
            .get(class_name)
            .map(|index| Arc::clone(&self.endpoints[*index]))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SPRING_REMOTING_INTERFACE;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = KnownEndpointCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());

        let registry = catalog.lookup("sun.rmi.registry.RegistryImpl_Stub").unwrap();
        assert_eq!(registry.name, "RMI Registry");
        assert!(catalog.lookup(SPRING_REMOTING_INTERFACE).is_some());
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let catalog = KnownEndpointCatalog::builtin().unwrap();
        assert!(catalog.lookup("eu.example.CustomService").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"[{"name": "Custom", "class_names": ["a.B"], "description": "custom"}]"#,
        )
        .unwrap();

        let catalog = KnownEndpointCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("a.B").unwrap().vulnerabilities.is_empty());
    }
}
