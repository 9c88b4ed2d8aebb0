pub mod diff;
pub mod log;
pub mod references;
pub mod repository;

pub use log::LogWindow;
pub use repository::GitRepository;
