// SPDX-License-Identifier: MPL-2.0
//! Owned FIFO backlog of notification requests.
//!
//! The head of the queue is the active (or about to be activated) toast;
//! everything behind it is pending and has never been rendered.

use crate::request::{NotificationRequest, RequestSummary};
use std::collections::VecDeque;

/// Ordered backlog of requests, insertion order = display order.
#[derive(Debug, Default)]
pub struct Queue {
    items: VecDeque<NotificationRequest>,
}

impl Queue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, request: NotificationRequest) {
        self.items.push_back(request);
    }

    pub fn peek(&self) -> Option<&NotificationRequest> {
        self.items.front()
    }

    pub fn peek_mut(&mut self) -> Option<&mut NotificationRequest> {
        self.items.front_mut()
    }

    pub fn dequeue(&mut self) -> Option<NotificationRequest> {
        self.items.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an owned, callback-free copy of the queue.
    ///
    /// Nothing done to the snapshot can reach the live queue.
    #[must_use]
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            items: self.items.iter().map(NotificationRequest::summary).collect(),
        }
    }

    /// Raw mutable access to the backing storage.
    ///
    /// Reordering or removing the head from here bypasses the promotion
    /// rule: the toaster keeps treating whatever sits at the front as the
    /// active toast. Intended for trusted tooling only.
    pub fn dangerously_get_queue_mut(&mut self) -> &mut VecDeque<NotificationRequest> {
        &mut self.items
    }
}

/// Immutable copy of the queue at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueSnapshot {
    items: Box<[RequestSummary]>,
}

impl QueueSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequestSummary> {
        self.items.iter()
    }

    /// The active toast, if any.
    pub fn active(&self) -> Option<&RequestSummary> {
        self.items.first()
    }

    /// Titles in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }
}

impl std::ops::Index<usize> for QueueSnapshot {
    type Output = RequestSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}
