use tokio::sync::watch;

/// Owner side of a cancellation flag. Aborting is sticky.
#[derive(Debug)]
pub struct AbortHandle {
    sender: watch::Sender<bool>,
}

/// Observer side handed down the pipeline. Checked only at retry boundaries
/// and before persisting, never in the middle of a remote call.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: watch::Receiver<bool>,
}

impl AbortHandle {
    pub fn new() -> (Self, AbortSignal) {
        let (sender, receiver) = watch::channel(false);
        (Self { sender }, AbortSignal { receiver })
    }

    pub fn abort(&self) {
        self.sender.send_replace(true);
    }

    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn abort_on_drop(self) -> AbortOnDrop {
        AbortOnDrop { handle: Some(self) }
    }
}

impl AbortSignal {
    /// A signal nobody can fire.
    pub fn never() -> Self {
        let (_sender, receiver) = watch::channel(false);
        Self { receiver }
    }

    pub fn is_aborted(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once the handle aborts. Pends forever if the handle is
    /// dropped without aborting.
    pub async fn aborted(&self) {
        let mut receiver = self.receiver.clone();
        let fired = receiver.wait_for(|aborted| *aborted).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    }
}

/// Fires the abort when dropped, e.g. when an HTTP handler future is
/// cancelled by a client disconnect.
#[derive(Debug)]
pub struct AbortOnDrop {
    handle: Option<AbortHandle>,
}

impl AbortOnDrop {
    pub fn signal(&self) -> AbortSignal {
        match &self.handle {
            Some(handle) => handle.signal(),
            None => AbortSignal::never(),
        }
    }

    /// Drops the guard without aborting.
    pub fn disarm(mut self) {
        self.handle.take();
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
