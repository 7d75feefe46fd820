//! Bounded notification queue for `no_std` targets
//!
//! Lets interrupt handlers and other tasks hand notifications to the single
//! context that owns the indicator. Access is serialized with
//! `critical-section`, storage is a fixed `heapless::Deque`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// The queue was full, the value is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrySendError<T>(pub T);

/// The queue was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded multi-producer queue
///
/// Meant to be placed in a `static` and shared through [`Sender`] and
/// [`Receiver`] handles.
pub struct Channel<T, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<T, SIZE>>>,
}

impl<T, const SIZE: usize> Channel<T, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers, any number may coexist
    pub const fn sender(&self) -> Sender<'_, T, SIZE> {
        Sender { channel: self }
    }

    /// Handle for the consuming context
    pub const fn receiver(&self) -> Receiver<'_, T, SIZE> {
        Receiver { channel: self }
    }

    /// Enqueue a value, failing if the queue is full
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(TrySendError)
        })
    }

    /// Enqueue a value, evicting the oldest one if the queue is full
    ///
    /// Returns the evicted value.
    pub fn send_replacing(&self, value: T) -> Option<T> {
        critical_section::with(|cs| {
            let mut queue = self.queue.borrow(cs).borrow_mut();
            let evicted = if queue.is_full() { queue.pop_front() } else { None };
            // Only fails for a zero-capacity queue
            let _ = queue.push_back(value);
            evicted
        })
    }

    /// Dequeue the oldest value
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of queued values
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every queued value
    pub fn clear(&self) {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().clear());
    }
}

impl<T, const SIZE: usize> Default for Channel<T, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer handle of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Sender<'_, T, SIZE> {
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.channel.try_send(value)
    }

    /// See [`Channel::send_replacing`]
    pub fn send_replacing(&self, value: T) -> Option<T> {
        self.channel.send_replacing(value)
    }
}

/// Consumer handle of a [`Channel`]
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const SIZE: usize> {
    channel: &'a Channel<T, SIZE>,
}

impl<T, const SIZE: usize> Receiver<'_, T, SIZE> {
    pub fn try_receive(&self) -> Result<T, TryReceiveError> {
        self.channel.try_receive()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
