//! Session layer: cancellation registry and progress streaming.
//!
//! A run is started under an opaque session id through
//! [`ProgressStream::start`], which registers a [`CancelToken`] in a shared
//! [`SessionRegistry`]. Any other caller holding the registry can stop the
//! run with [`SessionRegistry::stop`]; the stream observes the token between
//! ticks and ends with a [`Status::Stopped`] notification.

mod progress;
mod registry;
mod stream;

pub use progress::{progress_percent, Progress, Status};
pub use registry::{CancelToken, SessionGuard, SessionRegistry};
pub use stream::ProgressStream;
