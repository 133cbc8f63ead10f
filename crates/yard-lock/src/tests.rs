//! Unit tests for the switch lock pool.
//!
//! All timing tests run on tokio's paused clock, so timeouts elapse
//! instantly and deterministically once every task is idle.

use std::time::Duration;

use yard_core::{SwitchId, TrainId};

use crate::{LockError, SwitchLockPool};

const SHORT: Duration = Duration::from_millis(50);

#[cfg(test)]
mod acquire {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn free_switch_is_acquired_and_released() {
        let pool = SwitchLockPool::new(10);
        let guard = pool.try_acquire(SwitchId(3), TrainId(1), SHORT).await.unwrap().unwrap();
        assert_eq!(guard.switch(), SwitchId(3));
        assert_eq!(guard.train(), TrainId(1));
        assert_eq!(pool.holder(SwitchId(3)), Some(TrainId(1)));

        guard.release();
        assert_eq!(pool.holder(SwitchId(3)), None);
        assert_eq!(pool.held_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn held_switch_times_out_without_side_effects() {
        let pool = SwitchLockPool::new(10);
        let _held = pool.try_acquire(SwitchId(2), TrainId(1), SHORT).await.unwrap().unwrap();

        let start = tokio::time::Instant::now();
        let second = pool.try_acquire(SwitchId(2), TrainId(2), SHORT).await.unwrap();
        assert!(second.is_none());
        assert!(start.elapsed() >= SHORT);
        assert_eq!(pool.holder(SwitchId(2)), Some(TrainId(1)));
        assert!(pool.held_by(TrainId(2)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn waiter_gets_switch_once_released_within_timeout() {
        let pool = SwitchLockPool::new(10);
        let held = pool.try_acquire(SwitchId(5), TrainId(1), SHORT).await.unwrap().unwrap();

        let waiter_pool = pool.clone();
        let waiter = tokio::spawn(async move {
            waiter_pool
                .try_acquire(SwitchId(5), TrainId(2), Duration::from_millis(200))
                .await
                .unwrap()
                .map(|g| g.train())
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(held);
        assert_eq!(waiter.await.unwrap(), Some(TrainId(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn independent_switches_do_not_block() {
        let pool = SwitchLockPool::new(10);
        let a = pool.try_acquire(SwitchId(1), TrainId(1), SHORT).await.unwrap();
        let b = pool.try_acquire(SwitchId(2), TrainId(2), SHORT).await.unwrap();
        assert!(a.is_some() && b.is_some());
        assert_eq!(pool.held_count(), 2);
        assert_eq!(pool.held_by(TrainId(1)), vec![SwitchId(1)]);
    }
}

#[cfg(test)]
mod range {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn reserved_slot_rejected() {
        let pool = SwitchLockPool::new(10);
        let err = pool.try_acquire(SwitchId(0), TrainId(1), SHORT).await.unwrap_err();
        assert!(matches!(err, LockError::UnknownSwitch { switch: SwitchId(0), switch_count: 10 }));
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_rejected() {
        let pool = SwitchLockPool::new(10);
        assert!(pool.try_acquire(SwitchId(11), TrainId(1), SHORT).await.is_err());
        assert!(pool.try_acquire(SwitchId(10), TrainId(1), SHORT).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn sentinel_train_cannot_hold() {
        let pool = SwitchLockPool::new(4);
        let err = pool.try_acquire(SwitchId(1), TrainId::INVALID, SHORT).await.unwrap_err();
        assert!(matches!(err, LockError::InvalidTrain(TrainId::INVALID)));
        assert_eq!(pool.held_count(), 0);

        // The switch is still free for a real train.
        let guard = pool.try_acquire(SwitchId(1), TrainId(4), SHORT).await.unwrap().unwrap();
        assert_eq!(pool.holder(SwitchId(1)), Some(TrainId(4)));
        drop(guard);
    }

    #[test]
    fn holder_of_unknown_switch_is_none() {
        let pool = SwitchLockPool::new(4);
        assert_eq!(pool.switch_count(), 4);
        assert_eq!(pool.holder(SwitchId(0)), None);
        assert_eq!(pool.holder(SwitchId(99)), None);
    }
}

#[cfg(test)]
mod cancellation {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn aborted_task_releases_what_it_held() {
        let pool = SwitchLockPool::new(10);
        let task_pool = pool.clone();
        let task = tokio::spawn(async move {
            let _g = task_pool.try_acquire(SwitchId(4), TrainId(9), SHORT).await;
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(pool.holder(SwitchId(4)), Some(TrainId(9)));

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert_eq!(pool.holder(SwitchId(4)), None);
        assert!(pool.try_acquire(SwitchId(4), TrainId(1), SHORT).await.unwrap().is_some());
    }
}
