use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    /// Orders live in process memory and vanish on restart.
    Memory,
}

impl StoreBackend {
    fn parse(v: &str) -> Option<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "mysql" => Some(StoreBackend::MySql),
            "memory" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub order_table: String,

    pub host: String,
    pub port: u16,
    pub tls_cert_path: String,
    pub tls_key_path: String,

    /// Reject unparsable quantities instead of storing them as zero.
    pub strict_quantity: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_backend: StoreBackend::MySql,
            database_url: "mysql://root@127.0.0.1:3306/test".to_string(),
            db_max_connections: 5,
            db_acquire_timeout: Duration::from_secs(3),
            order_table: "`order`".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8081,
            tls_cert_path: "./cert/ca.crt".to_string(),
            tls_key_path: "./cert/ca.key".to_string(),
            strict_quantity: false,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let d = Settings::default();

    let store_backend = env::var("STORE_BACKEND")
        .ok()
        .and_then(|s| StoreBackend::parse(&s))
        .unwrap_or(d.store_backend);

    let database_url = env::var("DATABASE_URL").unwrap_or(d.database_url);

    let db_max_connections = env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(d.db_max_connections);

    let db_acquire_timeout = env::var("DB_ACQUIRE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(d.db_acquire_timeout);

    let order_table = env::var("ORDER_TABLE").unwrap_or(d.order_table);

    let host = env::var("HOST").unwrap_or(d.host);

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(d.port);

    let tls_cert_path = env::var("TLS_CERT_PATH").unwrap_or(d.tls_cert_path);
    let tls_key_path = env::var("TLS_KEY_PATH").unwrap_or(d.tls_key_path);

    let strict_quantity = env::var("STRICT_QUANTITY")
        .ok()
        .and_then(|s| parse_flag(&s))
        .unwrap_or(d.strict_quantity);

    Settings {
        store_backend,
        database_url,
        db_max_connections,
        db_acquire_timeout,
        order_table,
        host,
        port,
        tls_cert_path,
        tls_key_path,
        strict_quantity,
    }
}
