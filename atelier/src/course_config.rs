//! Authoring configuration from atelier.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Main authoring configuration from atelier.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Human-readable course title
    pub course_title: String,

    /// Content language (fr, en or ar)
    pub language: Language,

    /// Course author information
    pub author: Person,

    /// Base URL of the REST backend
    pub backend_url: String,

    /// Base path for server-side static assets, prepended to remote
    /// attachment paths at render time
    pub asset_base: String,
}

/// Supported content languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French
    Fr,
    /// English
    En,
    /// Arabic
    Ar,
}

/// Person information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Person's full name
    pub name: String,

    /// Person's email address
    pub email: String,
}

/// Errors that can occur when loading or saving the configuration
#[derive(Error, Debug)]
pub enum CourseConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl CourseConfig {
    /// Load configuration from an atelier.toml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CourseConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: CourseConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to an atelier.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CourseConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_config_roundtrip() {
        let config = CourseConfig {
            course_title: "Introduction au Rust".to_string(),
            language: Language::Fr,
            author: Person {
                name: "Amira Ben Salah".to_string(),
                email: "amira@example.com".to_string(),
            },
            backend_url: "https://api.example.com".to_string(),
            asset_base: "https://api.example.com/static".to_string(),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CourseConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.course_title, "Introduction au Rust");
        assert_eq!(parsed.language, Language::Fr);
        assert_eq!(parsed.author.email, "amira@example.com");
        assert_eq!(parsed.asset_base, "https://api.example.com/static");
    }

    #[test]
    fn test_parse_example_toml() {
        let toml_content = r#"
course_title = "Advanced Pastry"
language = "en"
backend_url = "https://backend.test"
asset_base = "https://backend.test/static"

[author]
name = "Jean Dupont"
email = "jean.dupont@example.com"
"#;

        let config: CourseConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.author.name, "Jean Dupont");
    }
}
