//! Example demonstrating optional fields and optional nested records

use envbind::Record;

#[derive(Debug, Default, Record)]
struct TlsConfig {
    #[env(name = "TLS_CERT")]
    pub cert: String,
    #[env(name = "TLS_KEY")]
    pub key: String,
}

#[derive(Debug, Default, Record)]
struct MetricsConfig {
    #[env(name = "METRICS_ADDR")]
    pub addr: String,
}

#[derive(Debug, Default, Record)]
struct Config {
    #[env(name = "APP_NAME")]
    pub app_name: String,

    // Optional leaves stay None when unset
    #[env(name = "API_KEY")]
    pub api_key: Option<String>,
    #[env(name = "PORT")]
    pub port: Option<u16>,

    // Allocated because TLS_CERT is set
    pub tls: Option<TlsConfig>,

    // Stays None: nothing beneath it is set
    pub metrics: Option<MetricsConfig>,
}

fn main() -> anyhow::Result<()> {
    // Set only some environment variables
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("PORT", "8080");
    std::env::set_var("TLS_CERT", "/etc/tls/cert.pem");
    // API_KEY, TLS_KEY, METRICS_ADDR not set

    let config = Config::from_env()?;

    println!("Configuration:");
    println!("  App Name: {}", config.app_name);
    println!("  API Key: {:?}", config.api_key); // None
    println!("  Port: {:?}", config.port); // Some(8080)
    println!("  TLS: {:?}", config.tls); // Some(TlsConfig { cert: "/etc/tls/cert.pem", key: "" })
    println!("  Metrics: {:?}", config.metrics); // None

    Ok(())
}
