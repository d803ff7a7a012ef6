pub mod compile;
pub mod list;

pub use compile::{CompileCommandArgs, build_config, execute_compile};
pub use list::execute_list;
