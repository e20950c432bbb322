use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::TaskClass;

/// Producers calling in from editor or toolkit threads only launch branch
/// lookups and blocking reads, so one async worker is enough.
const FALLBACK_WORKERS: usize = 1;
const FALLBACK_BLOCKING_THREADS: usize = 4;

static FALLBACK: OnceLock<Runtime> = OnceLock::new();

/// Handle of the caller's runtime, or of the process-wide fallback runtime
/// when called from a thread that has none.
fn handle() -> Handle {
	match Handle::try_current() {
		Ok(handle) => handle,
		Err(_) => FALLBACK
			.get_or_init(|| {
				Builder::new_multi_thread()
					.enable_all()
					.worker_threads(FALLBACK_WORKERS)
					.max_blocking_threads(FALLBACK_BLOCKING_THREADS)
					.thread_name("lantern-bg")
					.build()
					.expect("failed to build lantern fallback runtime")
			})
			.handle()
			.clone(),
	}
}

/// Spawns `fut` inside a `task` span carrying `class` and `label`.
pub fn spawn<F>(class: TaskClass, label: &'static str, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	let span = tracing::debug_span!("task", class = class.as_str(), label);
	tracing::trace!(parent: &span, "spawn");
	handle().spawn(fut.instrument(span))
}

/// Runs `f` on the blocking pool inside a `task` span.
pub fn spawn_blocking<F, R>(class: TaskClass, label: &'static str, f: F) -> JoinHandle<R>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	let span = tracing::debug_span!("task", class = class.as_str(), label);
	tracing::trace!(parent: &span, "spawn_blocking");
	handle().spawn_blocking(move || span.in_scope(f))
}
