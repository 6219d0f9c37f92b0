use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "todo-api")]
#[command(about = "To-Do API server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Interface to bind
    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "API_PORT", default_value_t = 8000)]
    pub port: u16,

    /// SQLite database URL (e.g. sqlite://todo.db or sqlite::memory:)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://todo.db")]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
