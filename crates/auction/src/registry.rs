//! Adapter Registry
//!
//! Wrapper adapters in registration order. The trait fixes the method set;
//! registration checks the rest.

use crate::error::{RegistrationError, Result};
use herald_ports::WrapperAdapter;
use log::{info, warn};
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn WrapperAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter
    ///
    /// Rejections are logged and leave the registry unchanged.
    pub fn register(&mut self, adapter: Arc<dyn WrapperAdapter>) -> Result<()> {
        if let Err(e) = self.validate(adapter.as_ref()) {
            warn!("Rejected wrapper adapter: {}", e);
            return Err(e);
        }
        info!(
            "Registered wrapper adapter {} (partner {})",
            adapter.name(),
            adapter.partner()
        );
        self.adapters.push(adapter);
        Ok(())
    }

    fn validate(&self, adapter: &dyn WrapperAdapter) -> Result<()> {
        let name = adapter.name();
        if name.trim().is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if adapter.partner().trim().is_empty() {
            return Err(RegistrationError::MissingPartner(name.to_string()));
        }
        if self.get(name).is_some() {
            return Err(RegistrationError::Duplicate(name.to_string()));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn WrapperAdapter>> {
        self.adapters.iter().find(|a| a.name() == name)
    }

    /// Adapter names, registration order
    pub fn names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn WrapperAdapter>> {
        self.adapters.iter()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
