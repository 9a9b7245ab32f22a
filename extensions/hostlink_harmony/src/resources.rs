//! HarmonyOS resource context
//!
//! The page hands over its resource manager (for rawfile access) and the
//! app cache directory before the engine may start.

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use hostlink_platform::{HostError, ResourceManagerHandle, Result};

/// Resource manager and cache directory taken from the ability context
#[derive(Clone, Debug)]
pub struct ResourceContext {
    cache_dir: PathBuf,
    /// Resource manager pointer (NativeResourceManager*)
    resource_manager: ResourceManagerHandle,
}

impl ResourceContext {
    /// Create from a resource manager obtained through N-API
    pub fn new(cache_dir: impl Into<PathBuf>, resource_manager: *mut c_void) -> Result<Self> {
        let resource_manager = ResourceManagerHandle::from_raw(resource_manager);
        if resource_manager.is_null() {
            return Err(HostError::Other(
                "Resource manager not initialized".to_string(),
            ));
        }
        Ok(Self {
            cache_dir: cache_dir.into(),
            resource_manager,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn resource_manager(&self) -> ResourceManagerHandle {
        self.resource_manager
    }
}
