/*++

Licensed under the Apache-2.0 license.

File Name:

    helpers.rs

Abstract:

    File contains helper types shared by the channel state machines.

--*/

/// Counts consecutive steps a channel spends waiting on the requester.
/// The count never exceeds the limit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct TimeoutCounter {
    count: u32,
    limit: u32,
}

impl TimeoutCounter {
    pub fn new(limit: u32) -> Self {
        Self { count: 0, limit }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Account for one more outstanding step. Returns true when the limit is
    /// reached, in which case the counter restarts from zero.
    pub fn advance(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.limit {
            self.count = 0;
            true
        } else {
            false
        }
    }
}
