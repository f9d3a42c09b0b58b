mod init;
mod status;
mod watch;

pub use init::run_init;
pub use status::run_status;
pub use watch::run_watch;
