use std::net::SocketAddr;

/// 既定の待ち受けポート
pub const DEFAULT_PORT: u16 = 5002;

/// アップロードサイズ上限の既定値（32MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            json_logs: false,
        }
    }
}

impl ServerConfig {
    /// 環境変数から ServerConfig を作成する
    ///
    /// 任意の環境変数:
    /// - RETOUCH_ADDR（待ち受けアドレス）
    /// - PORT（ポートのみ上書き）
    /// - RETOUCH_MAX_UPLOAD_BYTES
    /// - RETOUCH_LOG_JSON（1 / true で JSON ログ）
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("RETOUCH_ADDR") {
            config.addr = addr
                .parse()
                .map_err(|_| format!("RETOUCH_ADDR is not a socket address: {addr}"))?;
        }

        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| format!("PORT is not a valid port: {port}"))?;
            config.addr.set_port(port);
        }

        if let Some(limit) = lookup("RETOUCH_MAX_UPLOAD_BYTES") {
            config.max_upload_bytes = limit
                .parse()
                .ok()
                .filter(|&n: &usize| n > 0)
                .ok_or_else(|| format!("RETOUCH_MAX_UPLOAD_BYTES must be a positive integer: {limit}"))?;
        }

        if let Some(flag) = lookup("RETOUCH_LOG_JSON") {
            config.json_logs = match flag.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => return Err(format!("RETOUCH_LOG_JSON must be a boolean: {flag}")),
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.port(), DEFAULT_PORT);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("RETOUCH_ADDR", "127.0.0.1:8000"),
            ("PORT", "9000"),
            ("RETOUCH_MAX_UPLOAD_BYTES", "1024"),
            ("RETOUCH_LOG_JSON", "true"),
        ]))
        .unwrap();

        // PORT はアドレスのポートだけを上書きする
        assert_eq!(config.addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.max_upload_bytes, 1024);
        assert!(config.json_logs);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("RETOUCH_ADDR", "nowhere")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("RETOUCH_MAX_UPLOAD_BYTES", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("RETOUCH_LOG_JSON", "maybe")])).is_err());
    }
}
