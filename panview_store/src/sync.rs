// Copyright 2025 the Panview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Last-value-wins transform sharing between linked views.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use panview_geometry::Transform;

/// Opaque name of a set of linked views.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkGroup(String);

impl LinkGroup {
    /// Group with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Group name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LinkGroup {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LinkGroup {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for LinkGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one subscriber on a [`SyncBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Membership of one store in one link group.
///
/// Returned by [`SyncBus::subscribe`] and handed back to
/// [`SyncBus::unsubscribe`].
#[derive(Debug)]
pub struct Subscription {
    group: LinkGroup,
    id: SubscriberId,
    /// Revision of the last value delivered to or published by this member.
    seen: u64,
}

impl Subscription {
    /// Group joined.
    #[must_use]
    pub fn group(&self) -> &LinkGroup {
        &self.group
    }

    /// Subscriber identity.
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }
}

#[derive(Debug, Default)]
struct Slot {
    value: Option<Transform>,
    revision: u64,
    publisher: Option<SubscriberId>,
    members: usize,
}

#[derive(Debug, Default)]
struct Inner {
    groups: HashMap<LinkGroup, Slot>,
    next_subscriber: u64,
    next_group: u64,
}

/// Shared broadcast channel keyed by [`LinkGroup`].
///
/// Each group keeps only its latest transform. Publishing a value equal to
/// the latest one is dropped, and a member that falls behind sees only the
/// newest value when it polls. A member never receives its own publication.
///
/// The bus is a cheap handle: clones share the same groups. It is meant for
/// views living on one thread and is neither `Send` nor `Sync`.
#[derive(Clone, Debug, Default)]
pub struct SyncBus {
    inner: Rc<RefCell<Inner>>,
}

impl SyncBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a group name not used on this bus yet.
    #[must_use]
    pub fn new_group(&self) -> LinkGroup {
        let mut inner = self.inner.borrow_mut();
        loop {
            inner.next_group += 1;
            let group = LinkGroup(format!("link-{}", inner.next_group));
            if !inner.groups.contains_key(&group) {
                return group;
            }
        }
    }

    /// Joins `group`, creating it if needed.
    ///
    /// A group that already carries a value delivers it on the first
    /// [`SyncBus::poll`].
    pub fn subscribe(&self, group: LinkGroup) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscriber += 1;
        let id = SubscriberId(inner.next_subscriber);
        inner.groups.entry(group.clone()).or_default().members += 1;
        log::debug!("subscriber {} joined link group {group}", id.0);
        Subscription { group, id, seen: 0 }
    }

    /// Leaves the subscription's group; the group is dropped with its last
    /// member.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut inner = self.inner.borrow_mut();
        let Subscription { group, id, .. } = subscription;
        if let Some(slot) = inner.groups.get_mut(&group) {
            slot.members = slot.members.saturating_sub(1);
            if slot.members == 0 {
                inner.groups.remove(&group);
            }
        }
        log::debug!("subscriber {} left link group {group}", id.0);
    }

    /// Publishes `transform` to the subscription's group.
    ///
    /// Returns `false` when the group already holds an equal value.
    pub fn publish(&self, subscription: &mut Subscription, transform: Transform) -> bool {
        let mut inner = self.inner.borrow_mut();
        let slot = inner.groups.entry(subscription.group.clone()).or_default();
        if slot.value == Some(transform) {
            return false;
        }
        slot.value = Some(transform);
        slot.revision += 1;
        slot.publisher = Some(subscription.id);
        subscription.seen = slot.revision;
        log::trace!("published {transform:?} to {}", subscription.group);
        true
    }

    /// Newest value of the subscription's group not yet seen by it.
    pub fn poll(&self, subscription: &mut Subscription) -> Option<Transform> {
        let inner = self.inner.borrow();
        let slot = inner.groups.get(&subscription.group)?;
        if slot.revision <= subscription.seen {
            return None;
        }
        subscription.seen = slot.revision;
        if slot.publisher == Some(subscription.id) {
            return None;
        }
        slot.value
    }

    /// Latest value of `group`.
    #[must_use]
    pub fn latest(&self, group: &LinkGroup) -> Option<Transform> {
        self.inner.borrow().groups.get(group).and_then(|slot| slot.value)
    }

    /// Number of members in `group`.
    #[must_use]
    pub fn members(&self, group: &LinkGroup) -> usize {
        self.inner
            .borrow()
            .groups
            .get(group)
            .map_or(0, |slot| slot.members)
    }
}
