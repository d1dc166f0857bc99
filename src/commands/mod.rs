//! Command implementations

mod batch;
mod count;
mod init;
mod list;
mod serve;
mod show;
mod status;
mod verify;
mod workspace;

pub use batch::batch;
pub use count::count;
pub use init::init;
pub use list::list;
pub use serve::serve;
pub use show::show;
pub use status::status;
pub use verify::verify;
pub use workspace::{GlobalArgs, Workspace};
