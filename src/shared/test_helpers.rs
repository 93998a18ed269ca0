#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::core::config::{DeletePolicy, StoreConfig};

#[cfg(test)]
use crate::core::database::Registry;

/// A disposable registry preloaded with the seed data, zero latency.
#[cfg(test)]
pub fn seeded_registry() -> Arc<Registry> {
    Arc::new(Registry::with_seed(&StoreConfig::instant()).expect("seed data loads"))
}

/// A disposable empty registry, zero latency, restrict deletes.
#[cfg(test)]
pub fn empty_registry() -> Arc<Registry> {
    Arc::new(Registry::empty(&StoreConfig::instant()))
}

/// A disposable empty registry with cascading deletes.
#[cfg(test)]
pub fn cascading_registry() -> Arc<Registry> {
    let config = StoreConfig {
        delete_policy: DeletePolicy::Cascade,
        ..StoreConfig::instant()
    };
    Arc::new(Registry::empty(&config))
}
