//! The container a background is mounted into.
//!
//! A host measures the container, schedules display-refresh callbacks and
//! delivers resize notifications. It never polls; the caller's layout system
//! drives both.

use std::collections::VecDeque;

/// Handle for one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTicket(pub u64);

/// Handle for a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait Host {
    /// Current container size in physical pixels.
    fn container_size(&self) -> (u32, u32);

    /// Arm one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameTicket;

    /// Disarm `ticket`. Unknown or already delivered tickets are ignored.
    fn cancel_frame(&mut self, ticket: FrameTicket);

    fn add_resize_listener(&mut self) -> ListenerId;

    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// In-memory host for headless rendering and tests.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    size: (u32, u32),
    next_id: u64,
    pending: VecDeque<FrameTicket>,
    cancelled: Vec<FrameTicket>,
    listeners: Vec<ListenerId>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// Change the container size. The caller forwards the notification.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    /// Next armed frame callback, oldest first.
    pub fn next_frame(&mut self) -> Option<FrameTicket> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn cancelled_frames(&self) -> &[FrameTicket] {
        &self.cancelled
    }

    #[must_use]
    pub fn resize_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for HeadlessHost {
    fn container_size(&self) -> (u32, u32) {
        self.size
    }

    fn request_frame(&mut self) -> FrameTicket {
        let ticket = FrameTicket(self.next_id());
        self.pending.push_back(ticket);
        ticket
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        if let Some(pos) = self.pending.iter().position(|t| *t == ticket) {
            self.pending.remove(pos);
            self.cancelled.push(ticket);
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
    }
}
