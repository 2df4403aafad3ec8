use crate::error::ConfigError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "alumni_data (1).xlsx";
// The source workbook's sheet really has a trailing space.
pub const DEFAULT_SHEET_NAME: &str = "Data ";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const SESSION_DURATION: u64 = 24 * 60 * 60; // 24 hours in seconds

/// Runtime settings shared by both front-ends.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub sheet_name: String,
    pub bind_addr: SocketAddr,
    pub session_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            session_ttl: Duration::from_secs(SESSION_DURATION),
        }
    }
}

impl AppConfig {
    /// Build a configuration from positional arguments
    /// `[data_path] [sheet_name] [bind_addr]`, the program name excluded.
    /// Missing arguments keep their defaults.
    ///
    /// # Examples
    /// ```
    /// use alumni::config::AppConfig;
    ///
    /// let config = AppConfig::from_args(["alumni.csv".to_string()]).unwrap();
    /// assert_eq!(config.data_path.to_str(), Some("alumni.csv"));
    /// assert_eq!(config.sheet_name, "Data ");
    /// ```
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = AppConfig::default();
        let mut args = args.into_iter();

        if let Some(path) = args.next() {
            config.data_path = PathBuf::from(path);
        }
        if let Some(sheet) = args.next() {
            if sheet.is_empty() {
                return Err(ConfigError::EmptySheetName);
            }
            config.sheet_name = sheet;
        }
        if let Some(addr) = args.next() {
            config.bind_addr = addr
                .parse()
                .map_err(|_| ConfigError::BindAddress(addr.clone()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let config = AppConfig::from_args(Vec::new()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn positional_overrides() {
        let config = AppConfig::from_args(args(&["x.xlsx", "Sheet1", "0.0.0.0:8080"])).unwrap();
        assert_eq!(config.data_path, PathBuf::from("x.xlsx"));
        assert_eq!(config.sheet_name, "Sheet1");
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_args(args(&["x.xlsx", "Data", "localhost"])),
            Err(ConfigError::BindAddress(_))
        ));
        assert!(matches!(
            AppConfig::from_args(args(&["x.xlsx", ""])),
            Err(ConfigError::EmptySheetName)
        ));
    }
}
