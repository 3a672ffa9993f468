//! Configuration structs for the charmer demo application.
//!
//! [`DemoConfig`] is loaded with confique (defaults, then an optional TOML
//! file) and handed to [`charmer::TomlSource::load`]. The `serve` command then
//! binds its own argument struct from it, letting flags typed on the command
//! line win.
//!
//! | Config key              | Flag        | Env var (`bind_env`)         |
//! |-------------------------|-------------|------------------------------|
//! | `name`                  |             |                              |
//! | `verbose`               | `--verbose` |                              |
//! | `server.host`           | `--host`    | `CHARMER_DEMO_SERVER_HOST`   |
//! | `server.port`           | `--port`    | `CHARMER_DEMO_SERVER_PORT`   |
//! | `server.max_connections`|             |                              |
//! | `server.tags`           | `--tag`     |                              |

use confique::Config;
use serde::{Deserialize, Serialize};

/// Root configuration for the demo application.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Application name shown in the banner.
    #[config(default = "charmer-demo")]
    pub name: String,

    /// Enable verbose output.
    #[config(default = false)]
    pub verbose: bool,

    /// Server settings.
    #[config(nested)]
    pub server: ServerConfig,
}

/// Lives under the `[server]` section in TOML files.
#[derive(Config, Serialize, Deserialize, Debug)]
pub struct ServerConfig {
    /// Hostname to bind to.
    #[config(default = "127.0.0.1")]
    pub host: String,

    /// Port number.
    #[config(default = 3000)]
    pub port: u16,

    /// Maximum number of allowed connections.
    #[config(default = 100)]
    pub max_connections: u32,

    /// Labels attached to the server.
    pub tags: Option<Vec<String>>,
}
