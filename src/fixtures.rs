#[cfg(test)]
pub mod test {
    use confique::Config;
    use serde::{Deserialize, Serialize};

    use crate::schema::{Field, Schema};

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct AppConfig {
        /// The application host.
        #[config(default = "0.0.0.0")]
        pub host: String,

        /// The port number.
        #[config(default = 8090)]
        pub port: u16,

        /// Enable debug mode.
        #[config(default = false)]
        pub debug: bool,

        /// Database settings.
        #[config(nested)]
        pub database: DbConfig,

        /// Model API settings.
        #[config(nested)]
        pub api: ApiConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct DbConfig {
        /// Connection string URL.
        pub url: Option<String>,

        /// Connection pool size.
        #[config(default = 10)]
        pub pool_size: usize,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct ApiConfig {
        /// API key for the model provider.
        pub key: Option<String>,

        /// Model name.
        #[config(default = "qwen-turbo")]
        pub model_name: String,

        /// Sampling temperature.
        #[config(default = 0.7)]
        pub temperature: f64,
    }

    /// A struct with a field no layer provides a default for.
    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TokenConfig {
        pub token: String,
    }

    /// The standard schema plus the keys [`AppConfig`] nests.
    pub fn app_schema() -> Schema {
        Schema::standard()
            .field(
                Field::string("database.url", "")
                    .env("DATABASE_URL")
                    .required(),
            )
            .field(Field::integer("database.pool_size", 10).env("DB_POOL_SIZE"))
            .field(
                Field::string("api.key", "")
                    .env("DASHSCOPE_API_KEY")
                    .flag("api-key")
                    .required(),
            )
            .field(Field::string("api.model_name", "qwen-turbo").env("MODEL_NAME"))
            .field(
                Field::float("api.temperature", 0.7)
                    .env("TEMPERATURE")
                    .flag("temperature"),
            )
    }

    pub fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn app_config_loads_defaults() {
        let config = AppConfig::builder().load().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8090);
        assert!(!config.debug);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 10);
        assert_eq!(config.api.model_name, "qwen-turbo");
        assert_eq!(config.api.temperature, 0.7);
    }
}
