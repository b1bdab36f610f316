//! Concurrent acquisition, release, and mode changes.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use powersafe::Mode;
use powersafe_test_utils::{assert_counter_invariants, recording_guard};

const WORKERS: usize = 8;
const ROUNDS: usize = 500;

#[test]
fn counters_return_to_zero_after_concurrent_handles() {
    let (guard, device) = recording_guard(Mode::EagerUnmount);
    let granted = AtomicUsize::new(0);

    thread::scope(|s| {
        for worker in 0..WORKERS {
            let guard = &guard;
            let granted = &granted;
            s.spawn(move || {
                for round in 0..ROUNDS {
                    let forced = (worker + round) % 3 == 0;
                    let mount = guard.mount(forced);
                    if mount.mounted() {
                        granted.fetch_add(1, Ordering::Relaxed);
                        let write = guard.write(forced);
                        assert!(write.active());
                    }
                }
            });
        }
    });

    assert_eq!(granted.load(Ordering::Relaxed), WORKERS * ROUNDS);
    assert_eq!(guard.pending_mounts(), 0);
    assert_eq!(guard.pending_writes(), 0);
    assert!(!guard.is_mounted());
    assert_eq!(device.redundant_calls(), 0);
    assert_eq!(device.mount_calls(), device.unmount_calls());
}

#[test]
fn mode_flips_during_traffic_keep_invariants() {
    let (guard, device) = recording_guard(Mode::Normal);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let guard = &guard;
        let done = &done;

        s.spawn(move || {
            let tour = [
                Mode::EagerUnmount,
                Mode::LameDuck,
                Mode::Normal,
                Mode::Shutdown,
                Mode::Disabled,
                Mode::Normal,
            ];
            for round in 0..ROUNDS {
                guard.set_mode(tour[round % tour.len()]);
                assert_counter_invariants(guard);
            }
            guard.set_mode(Mode::Normal);
            done.store(true, Ordering::SeqCst);
        });

        for worker in 0..WORKERS {
            s.spawn(move || {
                let mut round = 0;
                while !done.load(Ordering::SeqCst) {
                    let forced = (worker + round) % 2 == 0;
                    let mut mount = guard.mount(forced);
                    let held = mount.transfer();
                    let _write = guard.write(forced);
                    drop(mount);
                    drop(held);
                    round += 1;
                }
            });
        }
    });

    assert_eq!(guard.pending_mounts(), 0);
    assert_eq!(guard.pending_writes(), 0);
    assert_counter_invariants(&guard);
    assert_eq!(guard.is_mounted(), device.is_physically_mounted());
    assert_eq!(device.redundant_calls(), 0);
}

#[test]
fn handles_can_be_sent_across_threads() {
    let (guard, _device) = recording_guard(Mode::Normal);

    thread::scope(|s| {
        let mount = guard.mount(false);
        let write = guard.write(false);
        s.spawn(move || {
            assert!(mount.mounted());
            assert!(write.active());
        });
    });

    assert_eq!(guard.pending_mounts(), 0);
    assert_eq!(guard.pending_writes(), 0);
}
