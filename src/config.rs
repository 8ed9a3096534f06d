use std::path::PathBuf;

/// Default bind address (all interfaces).
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
const DEFAULT_PORT: u16 = 8000;

/// File name of the methodology document served as `spiker://docs`.
pub const METHODOLOGY_FILE_NAME: &str = "SPIKE_METHODOLOGY.md";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub methodology_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `SPIKER_HOST` (optional, default `0.0.0.0`) — bind address
    /// - `SPIKER_PORT` (optional, default 8000) — listen port
    /// - `SPIKER_METHODOLOGY_PATH` (optional) — methodology document; defaults
    ///   to `SPIKE_METHODOLOGY.md` next to the running executable
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup, so callers other than
    /// [`ServerConfig::from_env`] can supply values without touching the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("SPIKER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("SPIKER_PORT") {
            Some(val) => val
                .parse::<u16>()
                .map_err(|_| "SPIKER_PORT must be an integer between 0 and 65535".to_string())?,
            None => DEFAULT_PORT,
        };

        let methodology_path = match lookup("SPIKER_METHODOLOGY_PATH") {
            Some(val) => PathBuf::from(val),
            None => default_methodology_path()?,
        };

        Ok(Self {
            host,
            port,
            methodology_path,
        })
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `SPIKE_METHODOLOGY.md` beside the running executable.
pub fn default_methodology_path() -> Result<PathBuf, String> {
    let exe = std::env::current_exe()
        .map_err(|e| format!("cannot locate executable for default methodology path: {e}"))?;
    let dir = exe
        .parent()
        .ok_or_else(|| "executable has no parent directory".to_string())?;
    Ok(dir.join(METHODOLOGY_FILE_NAME))
}
