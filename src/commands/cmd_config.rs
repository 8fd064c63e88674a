mod cmd_inspect_config;
mod cmd_options_config;

pub use cmd_inspect_config::inspect_config;
pub use cmd_options_config::show_config_options;
