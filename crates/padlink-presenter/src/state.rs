// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Watch-channel backed observable state.

use tokio::sync::watch;

/// Holds the latest published value of a view model.
///
/// Values are replaced whole; receivers always observe a complete snapshot.
#[derive(Debug)]
pub struct StateHolder<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StateHolder<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Copy of the current value.
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }

    /// New receiver positioned at the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Replace the current value and notify every receiver.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }
}

impl<T: Clone + Default> Default for StateHolder<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
