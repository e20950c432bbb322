/// Execution classes used to tag spawned work in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Async work off the UI path whose result may arrive late or be discarded.
	Background,
	/// Blocking reads and subprocess waits kept off the async workers.
	IoBlocking,
}

impl TaskClass {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Background => "background",
			Self::IoBlocking => "io_blocking",
		}
	}
}
