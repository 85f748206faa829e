pub mod process;

pub use process::{handle_process, ProcessConfig};
