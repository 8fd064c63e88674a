use code_docs::DocumentedStruct;
use crate::config::Config;

pub fn show_config_options() {
    let docstring = Config::commented_fields()
        .unwrap_or_default()
        // replacing vec with array for people that dont know rust
        .replace("Vec<", "Array<")
        .replace("BTreeMap<", "Table<");

    println!(r#"--- EXAMPLE CONFIG FILE ({config_file}) ---
version = "1"
base_image = "debian:bookworm-slim"
image_os = "debian"
install = [ "ca-certificates", "curl" ]
env = [ "TZ=UTC" ]
entrypoint = "/usr/local/bin/server"
tags = [ "latest" ]

[emi]
tools = [ "git" ]

[launch]
"90_server" = "exec /usr/local/bin/server"

[[networks]]
name = "8056c2e21c000001"
order = 10

[[filesystems]]
name = "storage"
mount = "/mnt/storage"
options = {{ allow-other = true }}
--- EXAMPLE CONFIG FILE ---

--- CONFIG OPTIONS ---
{docstring}
--- CONFIG OPTIONS ---

ENV {username_env}: registry username
ENV {password_env}: registry password
"#,
        config_file=crate::DEFAULT_CONFIG_FILE,
        username_env=crate::ENV_USERNAME,
        password_env=crate::ENV_PASSWORD,
    );
}
