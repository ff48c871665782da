//! [`Host`] over a winit window.
//!
//! Frame callbacks map onto `request_redraw`; the event loop hands
//! `RedrawRequested` back through [`WindowHost::take_frame`]. winit cannot
//! withdraw a redraw request, so cancelling only disarms the ticket and the
//! redraw, if it still arrives, carries nothing.

use std::sync::Arc;

use winit::window::Window;

use crate::host::{FrameTicket, Host, ListenerId};

pub struct WindowHost {
    window: Arc<Window>,
    next_id: u64,
    armed: Option<FrameTicket>,
    resize_listener: Option<ListenerId>,
}

impl WindowHost {
    #[must_use]
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            armed: None,
            resize_listener: None,
        }
    }

    /// Ticket to run for a `RedrawRequested` event, if one is armed.
    pub fn take_frame(&mut self) -> Option<FrameTicket> {
        self.armed.take()
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for WindowHost {
    fn container_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn request_frame(&mut self) -> FrameTicket {
        let ticket = FrameTicket(self.next_id());
        self.armed = Some(ticket);
        self.window.request_redraw();
        ticket
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        if self.armed == Some(ticket) {
            self.armed = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.resize_listener = Some(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        if self.resize_listener == Some(id) {
            self.resize_listener = None;
        }
    }
}
