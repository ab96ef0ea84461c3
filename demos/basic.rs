//! Basic usage example

use envbind::Record;

#[derive(Debug, Record)]
struct Config {
    // Loaded from DATABASE_URL when it is set
    #[env(name = "DATABASE_URL")]
    pub database_url: String,

    // Keeps the value from Default when SERVER_ADDR is not set
    #[env(name = "SERVER_ADDR")]
    pub server_addr: String,

    // Numeric type, bounded by its width
    #[env(name = "MAX_CONNECTIONS")]
    pub max_connections: u32,

    // Boolean type
    #[env(name = "DEBUG_MODE")]
    pub debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/dev".to_string(),
            server_addr: "127.0.0.1:8080".to_string(),
            max_connections: 10,
            debug_mode: false,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration on top of the defaults
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
