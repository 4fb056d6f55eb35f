// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Last-writer-wins request slot for frame-coalesced updates.
//!
//! Scroll and resize events arrive far more often than frames are drawn.
//! Hosts record each event in a [`FrameSlot`], schedule a frame callback
//! carrying the returned [`FrameToken`], and cancel the callback they
//! scheduled for the previous token. When a callback fires, only the most
//! recent token still yields a value; older ones are stale.
//!
//! ```rust
//! use understory_virtual_table::FrameSlot;
//!
//! let mut slot = FrameSlot::new();
//! let first = slot.request(100.0);
//! let second = slot.request(250.0);
//!
//! assert_eq!(slot.take(first), None);
//! assert_eq!(slot.take(second), Some(250.0));
//! assert_eq!(slot.take(second), None);
//! ```

/// Identifies one scheduled request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// A single pending request; newer requests supersede older ones.
#[derive(Clone, Debug)]
pub struct FrameSlot<T> {
    pending: Option<(FrameToken, T)>,
    next: u64,
}

impl<T> Default for FrameSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameSlot<T> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: None,
            next: 0,
        }
    }

    /// Replaces any pending value with `value`.
    pub fn request(&mut self, value: T) -> FrameToken {
        self.request_with(|_| value)
    }

    /// Replaces the pending value with one derived from it.
    ///
    /// `merge` receives the superseded value, if any. This lets several kinds
    /// of update share one frame.
    pub fn request_with(&mut self, merge: impl FnOnce(Option<T>) -> T) -> FrameToken {
        let previous = self.pending.take().map(|(_, value)| value);
        let token = FrameToken(self.next);
        self.next = self.next.wrapping_add(1);
        self.pending = Some((token, merge(previous)));
        token
    }

    /// Takes the pending value if `token` is the latest request.
    pub fn take(&mut self, token: FrameToken) -> Option<T> {
        match &self.pending {
            Some((pending, _)) if *pending == token => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    /// Drops the pending value, returning its token so the host can cancel
    /// the matching callback.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.pending.take().map(|(token, _)| token)
    }

    /// Token of the pending request, if any.
    #[must_use]
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending.as_ref().map(|(token, _)| *token)
    }
}

#[cfg(test)]
mod tests {
    use super::FrameSlot;

    #[test]
    fn request_with_merges_into_one_frame() {
        let mut slot = FrameSlot::new();
        slot.request((Some(1), None));
        let token = slot.request_with(|prev: Option<(Option<i32>, Option<i32>)>| {
            let (a, _) = prev.unwrap_or_default();
            (a, Some(2))
        });
        assert_eq!(slot.take(token), Some((Some(1), Some(2))));
    }

    #[test]
    fn cancel_invalidates_the_pending_token() {
        let mut slot = FrameSlot::new();
        let token = slot.request("scroll");
        assert_eq!(slot.pending(), Some(token));
        assert_eq!(slot.cancel(), Some(token));
        assert_eq!(slot.take(token), None);
        assert_eq!(slot.cancel(), None);
    }
}
