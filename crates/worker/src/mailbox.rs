use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Condvar, Mutex};
use tokio::sync::Notify;

/// Overflow policy applied when a bounded mailbox is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
	/// Park the producing thread until the receiver frees a slot.
	#[default]
	Block,
	/// Evict the oldest queued message to make room.
	DropOldest,
	/// Discard the incoming message.
	DropNewest,
}

/// Outcome of a successful send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
	/// Message was queued without loss.
	Enqueued,
	/// Message was queued after evicting the oldest one.
	DroppedOldest,
	/// Queue was full and the message was discarded.
	DroppedNewest,
}

impl SendOutcome {
	/// Returns true when the sent message will be delivered.
	pub const fn is_queued(self) -> bool {
		!matches!(self, Self::DroppedNewest)
	}
}

/// Mailbox send error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxSendError {
	/// The receiver is gone or the mailbox was closed.
	Closed,
	/// Queue is full and a non-blocking send was used under [`OverflowPolicy::Block`].
	Full,
}

/// Non-suspending receive error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
	/// Nothing is queued right now.
	Empty,
	/// Mailbox is closed and fully drained.
	Closed,
}

struct MailboxState<T> {
	queue: VecDeque<T>,
	closed: bool,
}

struct MailboxInner<T> {
	capacity: usize,
	policy: OverflowPolicy,
	state: Mutex<MailboxState<T>>,
	senders: AtomicUsize,
	/// Wakes producers parked under `Block`.
	space: Condvar,
	/// Wakes the async receiver.
	ready: Notify,
}

impl<T> MailboxInner<T> {
	fn close(&self) {
		self.state.lock().closed = true;
		self.space.notify_all();
		self.ready.notify_one();
	}

	fn try_pop(&self) -> Result<T, TryRecvError> {
		let mut state = self.state.lock();
		match state.queue.pop_front() {
			Some(msg) => {
				drop(state);
				self.space.notify_one();
				Ok(msg)
			}
			None if state.closed => Err(TryRecvError::Closed),
			None => Err(TryRecvError::Empty),
		}
	}
}

/// Bounded FIFO mailbox with one async receiver and any number of
/// synchronous senders.
pub struct Mailbox<T> {
	inner: Arc<MailboxInner<T>>,
}

/// Producer handle. Cloneable; the mailbox closes when the last sender drops.
pub struct MailboxSender<T> {
	inner: Arc<MailboxInner<T>>,
}

/// The single consumer handle.
pub struct MailboxReceiver<T> {
	inner: Arc<MailboxInner<T>>,
}

impl<T> Mailbox<T> {
	/// Creates a mailbox holding at most `capacity` messages.
	pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
		assert!(capacity > 0, "mailbox capacity must be > 0");
		Self {
			inner: Arc::new(MailboxInner {
				capacity,
				policy,
				state: Mutex::new(MailboxState {
					queue: VecDeque::with_capacity(capacity.min(1024)),
					closed: false,
				}),
				senders: AtomicUsize::new(0),
				space: Condvar::new(),
				ready: Notify::new(),
			}),
		}
	}

	/// Returns a new sender handle.
	pub fn sender(&self) -> MailboxSender<T> {
		self.inner.senders.fetch_add(1, Ordering::AcqRel);
		MailboxSender {
			inner: Arc::clone(&self.inner),
		}
	}

	/// Consumes the mailbox into its only receiver.
	pub fn into_receiver(self) -> MailboxReceiver<T> {
		MailboxReceiver { inner: self.inner }
	}
}

impl<T> Clone for MailboxSender<T> {
	fn clone(&self) -> Self {
		self.inner.senders.fetch_add(1, Ordering::AcqRel);
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<T> Drop for MailboxSender<T> {
	fn drop(&mut self) {
		if self.inner.senders.fetch_sub(1, Ordering::AcqRel) == 1 {
			self.inner.close();
		}
	}
}

impl<T> MailboxSender<T> {
	/// Enqueues honoring the overflow policy.
	///
	/// Under [`OverflowPolicy::Block`] this parks the calling thread until the
	/// receiver frees a slot, so it must not be called from an async worker.
	pub fn send(&self, msg: T) -> Result<SendOutcome, MailboxSendError> {
		let mut state = self.inner.state.lock();
		loop {
			if state.closed {
				return Err(MailboxSendError::Closed);
			}
			if state.queue.len() < self.inner.capacity {
				state.queue.push_back(msg);
				drop(state);
				self.inner.ready.notify_one();
				return Ok(SendOutcome::Enqueued);
			}
			match self.inner.policy {
				OverflowPolicy::Block => self.inner.space.wait(&mut state),
				OverflowPolicy::DropOldest | OverflowPolicy::DropNewest => {
					return Ok(self.overflow(state, msg));
				}
			}
		}
	}

	/// Non-blocking enqueue. `Block` reports [`MailboxSendError::Full`] instead of waiting.
	pub fn try_send(&self, msg: T) -> Result<SendOutcome, MailboxSendError> {
		let mut state = self.inner.state.lock();
		if state.closed {
			return Err(MailboxSendError::Closed);
		}
		if state.queue.len() < self.inner.capacity {
			state.queue.push_back(msg);
			drop(state);
			self.inner.ready.notify_one();
			return Ok(SendOutcome::Enqueued);
		}
		match self.inner.policy {
			OverflowPolicy::Block => Err(MailboxSendError::Full),
			OverflowPolicy::DropOldest | OverflowPolicy::DropNewest => Ok(self.overflow(state, msg)),
		}
	}

	fn overflow(&self, mut state: parking_lot::MutexGuard<'_, MailboxState<T>>, msg: T) -> SendOutcome {
		match self.inner.policy {
			OverflowPolicy::DropOldest => {
				let _ = state.queue.pop_front();
				state.queue.push_back(msg);
				drop(state);
				self.inner.ready.notify_one();
				SendOutcome::DroppedOldest
			}
			OverflowPolicy::Block | OverflowPolicy::DropNewest => SendOutcome::DroppedNewest,
		}
	}

	/// Closes the mailbox. The receiver drains queued messages, then sees the end.
	pub fn close(&self) {
		self.inner.close();
	}

	/// Returns the number of queued messages.
	pub fn len(&self) -> usize {
		self.inner.state.lock().queue.len()
	}

	/// Returns true when nothing is queued.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the queue capacity.
	pub fn capacity(&self) -> usize {
		self.inner.capacity
	}
}

impl<T> MailboxReceiver<T> {
	/// Receives the next message in FIFO order, suspending while the queue is
	/// empty. Returns `None` once the mailbox is closed and drained.
	pub async fn recv(&mut self) -> Option<T> {
		let inner = &*self.inner;
		loop {
			let notified = inner.ready.notified();
			match inner.try_pop() {
				Ok(msg) => return Some(msg),
				Err(TryRecvError::Closed) => return None,
				Err(TryRecvError::Empty) => notified.await,
			}
		}
	}

	/// Takes the next message without suspending.
	pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
		self.inner.try_pop()
	}

	/// Returns the number of queued messages.
	pub fn len(&self) -> usize {
		self.inner.state.lock().queue.len()
	}

	/// Returns true when nothing is queued.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T> Drop for MailboxReceiver<T> {
	fn drop(&mut self) {
		self.inner.close();
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	fn pair<T>(capacity: usize, policy: OverflowPolicy) -> (MailboxSender<T>, MailboxReceiver<T>) {
		let mailbox = Mailbox::new(capacity, policy);
		(mailbox.sender(), mailbox.into_receiver())
	}

	fn drain<T>(rx: &mut MailboxReceiver<T>) -> Vec<T> {
		std::iter::from_fn(|| rx.try_recv().ok()).collect()
	}

	#[test]
	fn block_try_send_reports_full_at_capacity() {
		let (tx, mut rx) = pair(3, OverflowPolicy::Block);

		assert_eq!(tx.try_send(1u32), Ok(SendOutcome::Enqueued));
		assert_eq!(tx.try_send(2), Ok(SendOutcome::Enqueued));
		assert_eq!(tx.try_send(3), Ok(SendOutcome::Enqueued));
		assert_eq!(tx.try_send(4), Err(MailboxSendError::Full));

		assert_eq!(drain(&mut rx), vec![1, 2, 3]);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
	async fn block_send_parks_until_receiver_frees_a_slot() {
		let (tx, mut rx) = pair(2, OverflowPolicy::Block);
		let _ = tx.send(1u32);
		let _ = tx.send(2);

		let producer = std::thread::spawn(move || tx.send(3));
		tokio::time::sleep(Duration::from_millis(20)).await;
		assert_eq!(rx.len(), 2, "third send must wait for capacity");

		assert_eq!(rx.recv().await, Some(1));
		let outcome = producer.join().ok();
		assert_eq!(outcome, Some(Ok(SendOutcome::Enqueued)));

		assert_eq!(rx.recv().await, Some(2));
		assert_eq!(rx.recv().await, Some(3));
		assert_eq!(rx.recv().await, None, "last sender dropped with the producer thread");
	}

	#[test]
	fn drop_oldest_keeps_most_recent_messages() {
		let (tx, mut rx) = pair(3, OverflowPolicy::DropOldest);
		for n in 1u32..=3 {
			assert_eq!(tx.send(n), Ok(SendOutcome::Enqueued));
		}
		assert_eq!(tx.send(4), Ok(SendOutcome::DroppedOldest));
		assert_eq!(tx.send(5), Ok(SendOutcome::DroppedOldest));

		assert_eq!(drain(&mut rx), vec![3, 4, 5]);
	}

	#[test]
	fn drop_newest_rejects_incoming_when_full() {
		let (tx, mut rx) = pair(2, OverflowPolicy::DropNewest);
		let _ = tx.send(1u32);
		let _ = tx.send(2);
		let outcome = tx.send(3);
		assert_eq!(outcome, Ok(SendOutcome::DroppedNewest));
		assert!(!SendOutcome::DroppedNewest.is_queued());

		assert_eq!(drain(&mut rx), vec![1, 2]);
	}

	#[test]
	fn dropping_receiver_closes_for_senders() {
		let (tx, rx) = pair::<u32>(1, OverflowPolicy::Block);
		drop(rx);
		assert_eq!(tx.send(1), Err(MailboxSendError::Closed));
		assert_eq!(tx.try_send(1), Err(MailboxSendError::Closed));
	}

	#[test]
	fn blocked_sender_wakes_with_closed_when_receiver_drops() {
		let (tx, rx) = pair(1, OverflowPolicy::Block);
		let _ = tx.send(1u32);
		let producer = std::thread::spawn(move || tx.send(2));
		std::thread::sleep(Duration::from_millis(20));
		drop(rx);
		assert_eq!(producer.join().ok(), Some(Err(MailboxSendError::Closed)));
	}

	#[tokio::test]
	async fn receiver_drains_queue_after_close() {
		let (tx, mut rx) = pair(4, OverflowPolicy::Block);
		let _ = tx.send("a");
		let _ = tx.send("b");
		tx.close();

		assert_eq!(rx.recv().await, Some("a"));
		assert_eq!(rx.recv().await, Some("b"));
		assert_eq!(rx.recv().await, None);
		assert_eq!(rx.try_recv(), Err(TryRecvError::Closed));
	}

	#[tokio::test]
	async fn recv_wakes_on_send_from_foreign_thread() {
		let (tx, mut rx) = pair(4, OverflowPolicy::Block);
		let producer = std::thread::spawn(move || {
			std::thread::sleep(Duration::from_millis(10));
			tx.send(7u8)
		});
		let got = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
		assert_eq!(got.ok().flatten(), Some(7));
		assert!(producer.join().is_ok());
	}

	#[test]
	fn cloned_senders_keep_mailbox_open() {
		let mailbox = Mailbox::new(2, OverflowPolicy::DropOldest);
		let a = mailbox.sender();
		let b = a.clone();
		let mut rx = mailbox.into_receiver();
		drop(a);
		assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
		assert_eq!(b.send(1u8), Ok(SendOutcome::Enqueued));
		drop(b);
		assert_eq!(rx.try_recv(), Ok(1));
		assert_eq!(rx.try_recv(), Err(TryRecvError::Closed));
	}
}
