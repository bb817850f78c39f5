//! Schema and typed configuration for the layerfig demo.
//!
//! The schema extends the standard `host`/`port`/`debug` table with a model
//! API section:
//!
//! | Key              | Env var             | Flag        |
//! |------------------|---------------------|-------------|
//! | `host`           | `HOST`              | `--host`    |
//! | `port`           | `PORT`              | `--port`    |
//! | `debug`          | `DEBUG`             | `--debug`   |
//! | `api.key`        | `DASHSCOPE_API_KEY` | `--api-key` |
//! | `api.model_name` | `MODEL_NAME`        |             |

use confique::Config;
use serde::{Deserialize, Serialize};

use layerfig::{Field, Schema};

pub fn schema() -> Schema {
    Schema::standard()
        .field(
            Field::string("api.key", "")
                .env("DASHSCOPE_API_KEY")
                .flag("api-key")
                .required()
                .doc("API key for the model provider."),
        )
        .field(
            Field::string("api.model_name", "qwen-turbo")
                .env("MODEL_NAME")
                .doc("Model to call."),
        )
}

#[derive(Config, Serialize, Deserialize, Debug)]
pub struct DemoConfig {
    /// Interface to bind to.
    #[config(default = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[config(default = 8090)]
    pub port: u16,

    /// Enable debug mode.
    #[config(default = false)]
    pub debug: bool,

    #[config(nested)]
    pub api: ApiConfig,
}

#[derive(Config, Serialize, Deserialize, Debug)]
pub struct ApiConfig {
    /// API key for the model provider.
    pub key: String,

    /// Model to call.
    #[config(default = "qwen-turbo")]
    pub model_name: String,
}
