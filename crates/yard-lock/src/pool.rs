//! `SwitchLockPool` and its RAII guard.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};

use yard_core::{SwitchId, TrainId};

use crate::{LockError, LockResult};

// ── Slot ──────────────────────────────────────────────────────────────────────

struct Slot {
    lock:   Arc<Mutex<()>>,
    /// `TrainId` currently holding the lock, or `TrainId::INVALID.0`.
    /// Written only by the guard's owner; read by observers and tests.
    holder: AtomicU32,
}

impl Slot {
    fn new() -> Self {
        Self {
            lock:   Arc::new(Mutex::new(())),
            holder: AtomicU32::new(TrainId::INVALID.0),
        }
    }

    fn holder(&self) -> Option<TrainId> {
        let raw = self.holder.load(Ordering::Acquire);
        (raw != TrainId::INVALID.0).then_some(TrainId(raw))
    }
}

// ── SwitchLockPool ────────────────────────────────────────────────────────────

/// Fixed bank of exclusive, timeout-capable switch locks.
///
/// Cloning is cheap and every clone shares the same locks.
#[derive(Clone)]
pub struct SwitchLockPool {
    slots: Arc<[Slot]>,
}

impl SwitchLockPool {
    /// Create locks for switches `1..=switch_count` (plus reserved slot 0).
    pub fn new(switch_count: u32) -> Self {
        let slots: Vec<Slot> = (0..=switch_count).map(|_| Slot::new()).collect();
        Self { slots: slots.into() }
    }

    /// Highest valid switch id.
    pub fn switch_count(&self) -> u32 {
        (self.slots.len() - 1) as u32
    }

    /// Wait up to `timeout` for exclusive use of `switch` on behalf of `train`.
    ///
    /// Returns `Ok(None)` if the timeout elapses first; nothing is held in
    /// that case.  Only the calling task is suspended while waiting.
    /// `TrainId::INVALID` marks a free slot and is rejected.
    pub async fn try_acquire(
        &self,
        switch:  SwitchId,
        train:   TrainId,
        timeout: Duration,
    ) -> LockResult<Option<SwitchGuard>> {
        let slot = self.slot(switch)?;
        if !train.is_valid() {
            return Err(LockError::InvalidTrain(train));
        }

        let permit = match tokio::time::timeout(timeout, Arc::clone(&slot.lock).lock_owned()).await {
            Ok(permit) => permit,
            Err(_elapsed) => return Ok(None),
        };

        let previous = slot.holder.swap(train.0, Ordering::AcqRel);
        debug_assert_eq!(previous, TrainId::INVALID.0, "{switch} had a stale holder");

        Ok(Some(SwitchGuard {
            slots:   Arc::clone(&self.slots),
            switch,
            train,
            _permit: permit,
        }))
    }

    /// The train currently holding `switch`, if any.
    ///
    /// Returns `None` for the reserved slot and out-of-range ids.
    pub fn holder(&self, switch: SwitchId) -> Option<TrainId> {
        self.slot(switch).ok().and_then(Slot::holder)
    }

    /// Every switch `train` holds right now, in ascending id order.
    pub fn held_by(&self, train: TrainId) -> Vec<SwitchId> {
        self.switches()
            .filter(|&s| self.holder(s) == Some(train))
            .collect()
    }

    /// Number of switches held by anyone.
    pub fn held_count(&self) -> usize {
        self.switches().filter(|&s| self.holder(s).is_some()).count()
    }

    fn switches(&self) -> impl Iterator<Item = SwitchId> {
        (1..=self.switch_count()).map(SwitchId)
    }

    fn slot(&self, switch: SwitchId) -> LockResult<&Slot> {
        if switch == SwitchId::RESERVED {
            return Err(self.unknown(switch));
        }
        self.slots.get(switch.index()).ok_or_else(|| self.unknown(switch))
    }

    fn unknown(&self, switch: SwitchId) -> LockError {
        LockError::UnknownSwitch { switch, switch_count: self.switch_count() }
    }
}

impl fmt::Debug for SwitchLockPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchLockPool")
            .field("switch_count", &self.switch_count())
            .field("held", &self.held_count())
            .finish()
    }
}

// ── SwitchGuard ───────────────────────────────────────────────────────────────

/// Exclusive hold on one switch.  Dropping the guard releases the switch.
#[must_use = "dropping a SwitchGuard releases the switch immediately"]
pub struct SwitchGuard {
    slots:   Arc<[Slot]>,
    switch:  SwitchId,
    train:   TrainId,
    _permit: OwnedMutexGuard<()>,
}

impl SwitchGuard {
    #[inline]
    pub fn switch(&self) -> SwitchId {
        self.switch
    }

    #[inline]
    pub fn train(&self) -> TrainId {
        self.train
    }

    /// Give the switch back.  Equivalent to dropping the guard.
    pub fn release(self) {}
}

impl Drop for SwitchGuard {
    fn drop(&mut self) {
        // Cleared before `_permit` drops, so a new holder never sees ours.
        self.slots[self.switch.index()]
            .holder
            .store(TrainId::INVALID.0, Ordering::Release);
    }
}

impl fmt::Debug for SwitchGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchGuard")
            .field("switch", &self.switch)
            .field("train", &self.train)
            .finish()
    }
}
