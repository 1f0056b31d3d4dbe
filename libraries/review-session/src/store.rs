//! Batch store
//!
//! Insertion-ordered items plus a single activity gate. Processing, saving
//! and deleting each hold the gate for their whole run, so at most one of
//! them touches the batch at a time.

use crate::error::{Result, SessionError};
use crate::types::ReviewItem;
use review_core::{GroupKey, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Long-running activity currently holding the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Activity {
    /// Nothing running
    #[default]
    Idle,
    /// Fetching and processing a batch
    Processing,
    /// Uploading processed items
    Saving,
    /// Deleting an item through the deletion collaborator
    Deleting,
}

/// Review items keyed by id, in insertion order
#[derive(Debug, Default)]
pub struct BatchStore {
    order: Vec<ItemId>,
    items: HashMap<ItemId, ReviewItem>,
    activity: Activity,
}

impl BatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activity currently holding the gate
    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Take the gate for `activity`
    ///
    /// # Errors
    /// Returns [`SessionError::Busy`] when another activity holds it.
    pub fn begin(&mut self, activity: Activity) -> Result<()> {
        if self.activity != Activity::Idle {
            return Err(SessionError::Busy(self.activity));
        }
        debug!(?activity, "Batch activity started");
        self.activity = activity;
        Ok(())
    }

    /// Release the gate if `activity` holds it
    pub fn finish(&mut self, activity: Activity) {
        if self.activity == activity {
            debug!(?activity, "Batch activity finished");
            self.activity = Activity::Idle;
        }
    }

    /// Take the gate for `activity` until the returned guard drops
    ///
    /// The gate is released even when the future holding the guard is
    /// dropped mid-run.
    pub fn scoped(&mut self, activity: Activity) -> Result<ActivityGuard<'_>> {
        self.begin(activity)?;
        Ok(ActivityGuard {
            store: self,
            activity,
        })
    }

    /// Fail with [`SessionError::Busy`] unless the gate is free
    pub fn ensure_idle(&self) -> Result<()> {
        match self.activity {
            Activity::Idle => Ok(()),
            other => Err(SessionError::Busy(other)),
        }
    }

    /// Insert an item, replacing any item with the same id in place
    pub fn insert(&mut self, item: ReviewItem) -> Option<ReviewItem> {
        let id = item.id().clone();
        let previous = self.items.insert(id.clone(), item);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn get(&self, id: &ItemId) -> Option<&ReviewItem> {
        self.items.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ItemId) -> Option<&mut ReviewItem> {
        self.items.get_mut(id)
    }

    /// Remove an item, keeping the order of the rest
    pub fn remove(&mut self, id: &ItemId) -> Option<ReviewItem> {
        let removed = self.items.remove(id)?;
        self.order.retain(|other| other != id);
        Some(removed)
    }

    /// Item ids in insertion order
    pub fn ids(&self) -> Vec<ItemId> {
        self.order.clone()
    }

    /// Items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ReviewItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Ids of every item in `group`, in insertion order
    pub fn group_members(&self, group: &GroupKey) -> Vec<ItemId> {
        self.iter()
            .filter(|item| item.group() == group)
            .map(|item| item.id().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop every item
    pub fn clear(&mut self) {
        self.order.clear();
        self.items.clear();
    }
}

/// Exclusive access to the store while an activity holds the gate
pub struct ActivityGuard<'a> {
    store: &'a mut BatchStore,
    activity: Activity,
}

impl ActivityGuard<'_> {
    pub fn activity(&self) -> Activity {
        self.activity
    }
}

impl Deref for ActivityGuard<'_> {
    type Target = BatchStore;

    fn deref(&self) -> &BatchStore {
        self.store
    }
}

impl DerefMut for ActivityGuard<'_> {
    fn deref_mut(&mut self) -> &mut BatchStore {
        self.store
    }
}

impl Drop for ActivityGuard<'_> {
    fn drop(&mut self) {
        self.store.finish(self.activity);
    }
}
