pub mod console;
pub mod http;

pub use console::{ConsoleMessages, RecordingNavigator, StdoutChat};
pub use http::{HttpDataSource, HttpVideoBackend};
