mod bucket;
pub mod clock;
mod dump;
mod error;
mod keyed;
mod options;
pub mod report;
mod window;

pub use crate::bucket::BucketView;
pub use crate::error::WindowError;
pub use crate::keyed::KeyedWindows;
pub use crate::options::WindowOptions;
pub use crate::report::WindowReporter;
pub use crate::window::{SlidingWindow, WindowStats};
