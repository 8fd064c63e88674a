mod cmd_build;
mod cmd_completion_generator;
mod cmd_config;
mod cmd_publish;

pub use cmd_build::{build_image, write_dockerfile};
pub use cmd_completion_generator::shell_completion_generation;
pub use cmd_config::*;
pub use cmd_publish::publish_image;
