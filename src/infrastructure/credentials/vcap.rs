//! Cloud Foundry service registry (`VCAP_SERVICES`) parsing.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::domain::errors::{DomainError, DomainResult};

/// Environment variable holding the bound service instances.
pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

/// One bound service instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceBinding {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub credentials: Value,
}

/// All bound services, keyed by service label.
#[derive(Debug, Clone, Default)]
pub struct VcapServices {
    services: HashMap<String, Vec<ServiceBinding>>,
}

impl VcapServices {
    /// Read and parse `VCAP_SERVICES` from the process environment.
    pub fn from_env() -> DomainResult<Self> {
        let raw = std::env::var(VCAP_SERVICES).map_err(|_| {
            DomainError::Configuration(format!("{VCAP_SERVICES} is not set"))
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> DomainResult<Self> {
        let services: HashMap<String, Vec<ServiceBinding>> = serde_json::from_str(raw)
            .map_err(|e| DomainError::Configuration(format!("Invalid {VCAP_SERVICES}: {e}")))?;
        Ok(Self { services })
    }

    /// Find a binding by instance name across all labels.
    pub fn find(&self, name: &str) -> Option<&ServiceBinding> {
        self.services
            .values()
            .flatten()
            .find(|binding| binding.name == name)
    }

    pub fn len(&self) -> usize {
        self.services.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
