/// Execution classes used for task scheduling and observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Latency-sensitive work tied to typing, such as debounce waits.
	Interactive,
	/// Async work whose result may be discarded, such as analysis requests.
	Background,
}

impl TaskClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Interactive => "interactive",
			Self::Background => "background",
		}
	}
}
