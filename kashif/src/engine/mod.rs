pub mod kashif;

pub use kashif::Cli;
pub use kashif::Command;
pub use kashif::Kashif;
