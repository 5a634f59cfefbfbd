//! One handler per subcommand. Handlers translate arguments into service
//! calls and print results; no business logic lives here.

pub mod completions;
pub mod config;
pub mod init;
pub mod metadata;
pub mod module;
pub mod new;
pub mod packages;
pub mod packaging;
