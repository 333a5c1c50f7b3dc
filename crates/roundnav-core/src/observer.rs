use async_channel::Sender;

/// Receives the index of every tapped tab.
///
/// A ring holds at most one observer; registering a new one replaces the old.
pub trait SelectionObserver {
    fn selection_changed(&mut self, index: usize);
}

impl<F: FnMut(usize)> SelectionObserver for F {
    fn selection_changed(&mut self, index: usize) {
        self(index)
    }
}

/// Forwards selections into an `async_channel`, for consumers living on an
/// executor rather than inside the draw/update cycle.
#[derive(Debug, Clone)]
pub struct ChannelObserver(Sender<usize>);

impl From<Sender<usize>> for ChannelObserver {
    fn from(tx: Sender<usize>) -> Self {
        Self(tx)
    }
}

impl SelectionObserver for ChannelObserver {
    fn selection_changed(&mut self, index: usize) {
        if let Err(e) = self.0.try_send(index) {
            log::warn!("Dropped selection change {}: {}", index, e);
        }
    }
}
