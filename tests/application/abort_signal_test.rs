use std::time::Duration;

use ledgerlens::application::ports::{AbortHandle, AbortSignal};

#[tokio::test]
async fn given_handle_when_aborting_then_every_signal_observes_it() {
    let (handle, signal) = AbortHandle::new();
    let late_signal = handle.signal();

    assert!(!signal.is_aborted());
    handle.abort();

    assert!(signal.is_aborted());
    assert!(late_signal.is_aborted());
    tokio::time::timeout(Duration::from_secs(1), signal.aborted())
        .await
        .expect("aborted() should resolve once the handle fires");
}

#[tokio::test]
async fn given_abort_on_drop_guard_when_dropped_then_signal_fires() {
    let (handle, signal) = AbortHandle::new();
    let guard = handle.abort_on_drop();

    drop(guard);

    assert!(signal.is_aborted());
}

#[tokio::test]
async fn given_disarmed_guard_when_dropped_then_signal_stays_quiet() {
    let (handle, signal) = AbortHandle::new();
    let guard = handle.abort_on_drop();

    guard.disarm();

    assert!(!signal.is_aborted());
}

#[tokio::test(start_paused = true)]
async fn given_never_signal_when_awaiting_then_it_does_not_resolve() {
    let signal = AbortSignal::never();

    let result = tokio::time::timeout(Duration::from_secs(60), signal.aborted()).await;

    assert!(result.is_err());
    assert!(!signal.is_aborted());
}
