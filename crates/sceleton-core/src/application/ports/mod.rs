//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sceleton-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: Blocking subprocess calls
//!   - `TemplateStore`: Template text retrieval
//!   - `Prompter`: Operator questions
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandLine, CommandRunner, DjangoFile, Filesystem, Prompter, TemplateKind, TemplateStore,
};
