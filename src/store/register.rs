use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

use once_cell::sync::Lazy;

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::store::SortedAggregateStore;

pub type BoxedStoreFuture =
    Pin<Box<dyn Future<Output = Result<Arc<dyn SortedAggregateStore>>> + Send>>;
pub type StoreConstructor = Arc<dyn Fn(StoreConfig) -> BoxedStoreFuture + Send + Sync>;

static STORE_REGISTRY: Lazy<RwLock<HashMap<String, StoreConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_store_plugin<S: Into<String>>(name: S, constructor: StoreConstructor) {
    let name = name.into();
    let mut registry = STORE_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name, constructor);
}

pub fn get_store_plugin(name: &str) -> Option<StoreConstructor> {
    STORE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

pub fn registered_store_plugins() -> Vec<String> {
    let mut names: Vec<String> = STORE_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}

pub fn debug_store_registry() {
    let names = registered_store_plugins();
    if names.is_empty() {
        tracing::debug!("No Store plugins registered.");
    } else {
        tracing::debug!("Registered Store plugins:");
        for name in names {
            tracing::debug!(" - {}", name);
        }
    }
}
