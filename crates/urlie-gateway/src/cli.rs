use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "URLIE_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "URLIE_BASE_URL";
pub const STORAGE_MODE_ENV: &str = "URLIE_STORAGE_MODE";
pub const REDIS_URL_ENV: &str = "URLIE_REDIS_URL";
pub const SECRET_ENV: &str = "URLIE_SECRET";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageModeArg {
    /// Codes are reserved in Redis; supports custom slugs.
    #[value(name = "persistent")]
    Persistent,
    /// No storage; codes are signed, self-contained tokens.
    #[value(name = "stateless")]
    Stateless,
}

impl Display for StorageModeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageModeArg::Persistent => write!(f, "persistent"),
            StorageModeArg::Stateless => write!(f, "stateless"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "urlie")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL used to compose the full short link.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_MODE_ENV,
        value_enum,
        default_value_t = StorageModeArg::Stateless
    )]
    pub storage: StorageModeArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "persistent"))]
    pub redis_url: Option<String>,

    /// Token signing secret. Required in stateless mode; missing
    /// configuration is fatal at startup, never a per-request error.
    #[arg(long, env = SECRET_ENV, required_if_eq("storage", "stateless"), hide_env_values = true)]
    pub secret: Option<String>,
}
