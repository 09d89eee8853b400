//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    8080
}

const fn default_max_ws_connections() -> usize {
    64
}

const fn default_change_feed_capacity() -> usize {
    256
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Concurrent realtime WebSocket connections allowed.
    #[serde(default = "default_max_ws_connections")]
    pub max_ws_connections: usize,

    /// Buffered change events per subscriber before it starts lagging.
    #[serde(default = "default_change_feed_capacity")]
    pub change_feed_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_ws_connections: default_max_ws_connections(),
            change_feed_capacity: default_change_feed_capacity(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
