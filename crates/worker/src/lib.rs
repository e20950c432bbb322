//! Task spawning and mailbox primitives shared by lantern producers.
//!
//! * [`spawn`] / [`spawn_blocking`]: run labeled work inside a `task` span on
//!   the ambient tokio runtime, falling back to a small process-wide runtime
//!   when called from a plain thread such as an editor RPC callback.
//! * [`Mailbox`]: bounded FIFO with a configurable overflow policy. Producers
//!   are synchronous so they can live on foreign callback threads; the single
//!   receiver is async.

mod class;
mod mailbox;
mod spawn;

pub use class::TaskClass;
pub use mailbox::{Mailbox, MailboxReceiver, MailboxSendError, MailboxSender, OverflowPolicy, SendOutcome, TryRecvError};
pub use spawn::{spawn, spawn_blocking};
