/// Executor trait and the docker executor
pub mod command_executor;
#[doc(hidden)]
pub mod recording_executor;

pub use command_executor::{ComposeExecutor, CommandExecutorError, DockerCommandExecutor};
#[doc(hidden)]
pub use recording_executor::{RecordedCall, RecordingExecutor};
