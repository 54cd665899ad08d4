//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn sections(&self) -> Vec<String> {
        let mut sections = self.config.sections();
        sections.sort();
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[data]
dir = /var/prices

[basket.tech]
name = Tech Giants
tickers = AAPL:75, GOOG:25
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/var/prices".to_string())
        );
        assert_eq!(
            adapter.get_string("basket.tech", "tickers"),
            Some("AAPL:75, GOOG:25".to_string())
        );
    }

    #[test]
    fn section_names_are_case_insensitive() {
        let adapter =
            FileConfigAdapter::from_string("[Basket.Tech]\nName = Tech\n").unwrap();
        assert_eq!(
            adapter.get_string("basket.tech", "name"),
            Some("Tech".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[data]\ndir = x\n").unwrap();
        assert_eq!(adapter.get_string("data", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn sections_are_sorted() {
        let adapter =
            FileConfigAdapter::from_string("[zeta]\na = 1\n[alpha]\nb = 2\n[data]\nc = 3\n")
                .unwrap();
        assert_eq!(adapter.sections(), vec!["alpha", "data", "zeta"]);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\ndir = /path/to/prices\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/path/to/prices".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/baskets.ini");
        assert!(result.is_err());
    }
}
