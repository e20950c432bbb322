//! Event channel between the editor's notification callback and the status line.
//!
//! The callback runs on the RPC client's thread and pushes raw batches with
//! [`EventSender::push`]. At most one `UpdateAvailable` signal is pending at a
//! time: the push that finds the queue unannounced emits it, and the status
//! line re-announces after each batch it takes while more are queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lantern_config::{ChannelConfig, Overflow};
use lantern_worker::{Mailbox, MailboxReceiver, MailboxSendError, MailboxSender, OverflowPolicy, SendOutcome, TryRecvError};

use crate::event::EventBatch;
use crate::signal::{SignalEmitter, StatusMsg};

/// Emits `UpdateAvailable` unless one is already pending.
struct Announcer {
	pending: AtomicBool,
	signals: SignalEmitter,
}

impl Announcer {
	fn announce(&self) {
		if !self.pending.swap(true, Ordering::AcqRel) {
			self.signals.emit(StatusMsg::UpdateAvailable);
		}
	}
}

/// Producing end. Cloneable and callable from any non-async thread.
#[derive(Clone)]
pub struct EventSender {
	tx: MailboxSender<EventBatch>,
	announcer: Arc<Announcer>,
}

/// Consuming end, owned by the status line.
pub struct EventReceiver {
	rx: MailboxReceiver<EventBatch>,
	announcer: Arc<Announcer>,
}

/// Creates a bounded event channel announcing batches on `signals`.
pub fn event_channel(config: &ChannelConfig, signals: SignalEmitter) -> (EventSender, EventReceiver) {
	let mailbox = Mailbox::new(config.capacity, overflow_policy(config.overflow));
	let tx = mailbox.sender();
	let announcer = Arc::new(Announcer {
		pending: AtomicBool::new(false),
		signals,
	});
	(
		EventSender {
			tx,
			announcer: Arc::clone(&announcer),
		},
		EventReceiver {
			rx: mailbox.into_receiver(),
			announcer,
		},
	)
}

fn overflow_policy(overflow: Overflow) -> OverflowPolicy {
	match overflow {
		Overflow::Block => OverflowPolicy::Block,
		Overflow::DropOldest => OverflowPolicy::DropOldest,
		Overflow::DropNewest => OverflowPolicy::DropNewest,
	}
}

impl EventSender {
	/// Enqueues `batch` under the configured overflow policy.
	///
	/// Under `block` this parks the calling thread while the queue is full.
	pub fn push(&self, batch: EventBatch) -> Result<SendOutcome, MailboxSendError> {
		let outcome = self.tx.send(batch)?;
		match outcome {
			SendOutcome::Enqueued => {}
			SendOutcome::DroppedOldest => {
				tracing::warn!(capacity = self.tx.capacity(), "Event channel full, dropped oldest batch");
			}
			SendOutcome::DroppedNewest => {
				tracing::warn!(capacity = self.tx.capacity(), "Event channel full, dropped incoming batch");
			}
		}
		if outcome.is_queued() {
			self.announcer.announce();
		}
		Ok(outcome)
	}

	/// Closes the channel; queued batches are still delivered.
	pub fn close(&self) {
		self.tx.close();
	}

	pub fn len(&self) -> usize {
		self.tx.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tx.is_empty()
	}
}

impl EventReceiver {
	/// Next batch in arrival order; `None` once closed and drained.
	pub async fn next_batch(&mut self) -> Option<EventBatch> {
		self.rx.recv().await
	}

	/// Takes the batch an `UpdateAvailable` signal announced, re-announcing
	/// if more remain queued.
	pub fn take_announced(&mut self) -> Option<EventBatch> {
		let batch = self.try_next_batch();
		self.announcer.pending.store(false, Ordering::Release);
		if !self.rx.is_empty() {
			self.announcer.announce();
		}
		batch
	}

	/// Next batch if one is queued.
	pub fn try_next_batch(&mut self) -> Option<EventBatch> {
		match self.rx.try_recv() {
			Ok(batch) => Some(batch),
			Err(TryRecvError::Empty | TryRecvError::Closed) => None,
		}
	}

	pub fn len(&self) -> usize {
		self.rx.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rx.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signal::{Topic, signal_bus};
	use crate::Value;

	fn batch(n: i64) -> EventBatch {
		vec![Value::from("bufenter"), Value::from(n)]
	}

	fn pending_signals(signals: &mut crate::signal::SignalReceiver) -> usize {
		std::iter::from_fn(|| signals.try_recv()).count()
	}

	#[test]
	fn one_announcement_per_queued_run() {
		let (emitter, mut signals) = signal_bus();
		let (tx, mut rx) = event_channel(&ChannelConfig::default(), emitter);

		tx.push(batch(1)).unwrap();
		tx.push(batch(2)).unwrap();
		assert_eq!(signals.try_recv().map(|m| m.topic()), Some(Topic::StatusUpdate));
		assert_eq!(signals.try_recv(), None);

		assert_eq!(rx.take_announced(), Some(batch(1)));
		assert_eq!(pending_signals(&mut signals), 1);
		assert_eq!(rx.take_announced(), Some(batch(2)));
		assert_eq!(pending_signals(&mut signals), 0);

		tx.push(batch(3)).unwrap();
		assert_eq!(pending_signals(&mut signals), 1);
		assert_eq!(rx.take_announced(), Some(batch(3)));
	}

	#[test]
	fn event_storm_keeps_signals_bounded() {
		let (emitter, mut signals) = signal_bus();
		let config = ChannelConfig {
			capacity: 2,
			overflow: Overflow::DropOldest,
		};
		let (tx, mut rx) = event_channel(&config, emitter);

		for n in 0..10_000 {
			tx.push(batch(n)).unwrap();
		}
		assert_eq!(rx.len(), 2);
		assert_eq!(pending_signals(&mut signals), 1);

		assert_eq!(rx.take_announced(), Some(batch(9_998)));
		assert_eq!(pending_signals(&mut signals), 1);
		assert_eq!(rx.take_announced(), Some(batch(9_999)));
		assert_eq!(pending_signals(&mut signals), 0);
		assert_eq!(rx.take_announced(), None);
	}

	#[test]
	fn drop_newest_is_not_announced() {
		let (emitter, mut signals) = signal_bus();
		let config = ChannelConfig {
			capacity: 1,
			overflow: Overflow::DropNewest,
		};
		let (tx, mut rx) = event_channel(&config, emitter);

		assert_eq!(tx.push(batch(1)), Ok(SendOutcome::Enqueued));
		assert_eq!(tx.push(batch(2)), Ok(SendOutcome::DroppedNewest));

		assert!(signals.try_recv().is_some());
		assert_eq!(signals.try_recv(), None);
		assert_eq!(rx.try_next_batch(), Some(batch(1)));
	}

	#[test]
	fn drop_oldest_keeps_latest() {
		let (emitter, _signals) = signal_bus();
		let config = ChannelConfig {
			capacity: 2,
			overflow: Overflow::DropOldest,
		};
		let (tx, mut rx) = event_channel(&config, emitter);

		for n in 1..=4 {
			tx.push(batch(n)).unwrap();
		}
		assert_eq!(rx.try_next_batch(), Some(batch(3)));
		assert_eq!(rx.try_next_batch(), Some(batch(4)));
	}

	#[tokio::test]
	async fn receiver_drains_then_ends_after_close() {
		let (emitter, _signals) = signal_bus();
		let (tx, mut rx) = event_channel(&ChannelConfig::default(), emitter);
		let producer = tx.clone();
		std::thread::spawn(move || producer.push(batch(7)).unwrap()).join().unwrap();
		tx.close();

		assert_eq!(rx.next_batch().await, Some(batch(7)));
		assert_eq!(rx.next_batch().await, None);
		assert!(tx.push(batch(8)).is_err());
	}
}
