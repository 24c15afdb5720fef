pub mod config;
pub mod detect;
pub mod provision;
pub mod run;
pub mod util;
pub mod verify;

pub use config::*;
pub use detect::*;
pub use provision::*;
pub use run::*;
pub use util::*;
pub use verify::*;
