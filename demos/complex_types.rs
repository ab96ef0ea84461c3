//! Example demonstrating structured values decoded from JSON

use envbind::{Complex128, Record};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize, Record)]
#[env(json)]
struct DatabaseConfig {
    #[env(name = "DB_HOST")]
    pub host: String,
    #[env(name = "DB_PORT")]
    pub port: u16,
    pub username: String,
}

impl DatabaseConfig {
    fn connection_string(&self) -> String {
        format!("{}:{} (user: {})", self.host, self.port, self.username)
    }
}

#[derive(Debug, Default, Record)]
struct Config {
    // Simple string, taken verbatim
    #[env(name = "APP_NAME")]
    pub app_name: String,

    // JSON array
    #[env(name = "TAGS")]
    pub tags: Vec<String>,

    // JSON object
    #[env(name = "ENVIRONMENT_VARS")]
    pub environment_vars: HashMap<String, String>,

    // Complex number
    #[env(name = "IMPEDANCE")]
    pub impedance: Complex128,

    // Bound as a whole from DATABASE; DB_HOST and DB_PORT are ignored when it is set
    #[env(name = "DATABASE")]
    pub database: DatabaseConfig,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("TAGS", r#"["production","api","v2"]"#);
    std::env::set_var(
        "ENVIRONMENT_VARS",
        r#"{"LOG_LEVEL":"debug","TIMEOUT":"30"}"#,
    );
    std::env::set_var("IMPEDANCE", "50-12.5i");
    std::env::set_var(
        "DATABASE",
        r#"{"host":"localhost","port":5432,"username":"admin"}"#,
    );
    std::env::set_var("DB_HOST", "ignored.example.com");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Tags: {:?}", config.tags);
    println!("  Environment Variables: {:?}", config.environment_vars);
    println!("  Impedance: {}", config.impedance);
    println!("  Database: {}", config.database.connection_string());

    Ok(())
}
