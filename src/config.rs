use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/todos.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
}

impl Config {
    /// Reads `APP_DATA_PATH` and `PORT`; an unparsable port falls back to the default.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("APP_DATA_PATH").ok(), env::var("PORT").ok())
    }

    fn from_vars(data_path: Option<String>, port: Option<String>) -> Self {
        Self {
            data_path: data_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            port: port
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_vars(None, None);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn values_override_defaults() {
        let config = Config::from_vars(Some("/tmp/tasks.json".into()), Some("9000".into()));
        assert_eq!(config.data_path, PathBuf::from("/tmp/tasks.json"));
        assert_eq!(config.addr().port(), 9000);

        assert_eq!(Config::from_vars(None, Some("http".into())).port, DEFAULT_PORT);
    }
}
