//! Application (session) enumeration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{DeviceError, DeviceResult};

/// Identifier of an application hosted on a device.
pub type ApplicationHandle = i32;

/// Applications hosted on a device at query time, in ascending handle order.
pub type ApplicationList = Vec<ApplicationHandle>;

/// The only application handle a single-application transport reports.
pub const SINGLE_APPLICATION_HANDLE: ApplicationHandle = 1;

/// Allocation table mapping application handles to transport endpoints.
///
/// Handles are allocated monotonically starting at 1 and are never reused
/// while the table lives, so a stale handle cannot alias a newer session.
/// Inserting an endpoint that is already present returns its existing handle.
/// Once `i32::MAX` has been handed out the table refuses new endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ApplicationTableRepr<E>")]
pub struct ApplicationTable<E> {
    entries: BTreeMap<ApplicationHandle, E>,
    /// Next handle to allocate; `None` once the handle space is spent.
    next_handle: Option<ApplicationHandle>,
}

/// Unchecked wire form of [`ApplicationTable`].
#[derive(Deserialize)]
struct ApplicationTableRepr<E> {
    entries: BTreeMap<ApplicationHandle, E>,
    next_handle: Option<ApplicationHandle>,
}

impl<E> TryFrom<ApplicationTableRepr<E>> for ApplicationTable<E> {
    type Error = DeviceError;

    fn try_from(repr: ApplicationTableRepr<E>) -> DeviceResult<Self> {
        if let Some(&lowest) = repr.entries.keys().next()
            && lowest < 1
        {
            return Err(DeviceError::invalid_application_table(format!(
                "handle {lowest} is below 1"
            )));
        }
        match (repr.next_handle, repr.entries.keys().next_back()) {
            (Some(next), _) if next < 1 => Err(DeviceError::invalid_application_table(format!(
                "next handle {next} is below 1"
            ))),
            (Some(next), Some(&highest)) if next <= highest => {
                Err(DeviceError::invalid_application_table(format!(
                    "next handle {next} would reuse live handle {highest}"
                )))
            }
            _ => Ok(Self {
                entries: repr.entries,
                next_handle: repr.next_handle,
            }),
        }
    }
}

impl<E: PartialEq> ApplicationTable<E> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_handle: Some(1),
        }
    }

    /// Register `endpoint`, returning its application handle.
    ///
    /// Returns `None` if the endpoint is new and no handle is left.
    pub fn insert(&mut self, endpoint: E) -> Option<ApplicationHandle> {
        if let Some(handle) = self.handle_of(&endpoint) {
            return Some(handle);
        }
        let handle = self.next_handle?;
        self.next_handle = handle.checked_add(1);
        self.entries.insert(handle, endpoint);
        Some(handle)
    }

    /// Whether new endpoints can still be registered.
    #[must_use]
    pub fn has_free_handles(&self) -> bool {
        self.next_handle.is_some()
    }

    /// Remove the application with `handle`, returning its endpoint.
    pub fn remove(&mut self, handle: ApplicationHandle) -> Option<E> {
        self.entries.remove(&handle)
    }

    /// Remove the application bound to `endpoint`, returning its handle.
    pub fn remove_endpoint(&mut self, endpoint: &E) -> Option<ApplicationHandle> {
        let handle = self.handle_of(endpoint)?;
        self.entries.remove(&handle);
        Some(handle)
    }

    /// Handle bound to `endpoint`, if any.
    #[must_use]
    pub fn handle_of(&self, endpoint: &E) -> Option<ApplicationHandle> {
        self.entries
            .iter()
            .find(|(_, existing)| *existing == endpoint)
            .map(|(handle, _)| *handle)
    }

    /// Endpoint bound to `handle`, if any.
    #[must_use]
    pub fn get(&self, handle: ApplicationHandle) -> Option<&E> {
        self.entries.get(&handle)
    }

    /// Current handles in ascending order.
    #[must_use]
    pub fn handles(&self) -> ApplicationList {
        self.entries.keys().copied().collect()
    }

    /// Number of live applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no application is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: PartialEq> Default for ApplicationTable<E> {
    fn default() -> Self {
        Self::new()
    }
}
