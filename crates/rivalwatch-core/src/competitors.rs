use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::taxonomy::TargetType;
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub url: String,
    #[serde(rename = "type", default)]
    pub target_type: TargetType,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorConfig {
    pub name: String,
    pub website_url: Option<String>,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

#[derive(Debug, Deserialize)]
pub struct CompetitorsFile {
    pub competitors: Vec<CompetitorConfig>,
}

/// Load and validate the competitors configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_competitors(path: &Path) -> Result<CompetitorsFile, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::CompetitorsFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

    parse_competitors(&content)
}

/// Parse and validate competitors YAML that is already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_competitors(content: &str) -> Result<CompetitorsFile, ConfigError> {
    let file: CompetitorsFile =
        serde_yaml::from_str(content).map_err(ConfigError::CompetitorsFileParse)?;
    validate_competitors(&file)?;
    Ok(file)
}

fn validate_competitors(file: &CompetitorsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for competitor in &file.competitors {
        let name = competitor.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "competitor name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate competitor name: '{name}'"
            )));
        }

        if let Some(site) = &competitor.website_url {
            if !is_http_url(site) {
                return Err(ConfigError::Validation(format!(
                    "competitor '{name}' has non-http website_url '{site}'"
                )));
            }
        }

        let mut seen_urls = HashSet::new();
        for target in &competitor.targets {
            let url = target.url.trim();
            if !is_http_url(url) {
                return Err(ConfigError::Validation(format!(
                    "competitor '{name}' has non-http target url '{url}'"
                )));
            }
            if !seen_urls.insert(url) {
                return Err(ConfigError::Validation(format!(
                    "competitor '{name}' lists target '{url}' more than once"
                )));
            }
        }
    }

    Ok(())
}

fn is_http_url(raw: &str) -> bool {
    let lower = raw.trim().to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
competitors:
  - name: Acme
    website_url: https://acme.example
    targets:
      - url: https://acme.example/blog
        type: BLOG
      - url: https://acme.example/pricing
        type: PRICING
        active: false
  - name: Globex
    targets:
      - url: https://globex.example/news
";

    #[test]
    fn parses_sample_file() {
        let file = parse_competitors(SAMPLE).unwrap();
        assert_eq!(file.competitors.len(), 2);

        let acme = &file.competitors[0];
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.targets.len(), 2);
        assert_eq!(acme.targets[0].target_type, TargetType::Blog);
        assert!(acme.targets[0].active);
        assert!(!acme.targets[1].active);

        let globex = &file.competitors[1];
        assert!(globex.website_url.is_none());
        assert_eq!(globex.targets[0].target_type, TargetType::Other);
    }

    #[test]
    fn rejects_empty_name() {
        let err = parse_competitors("competitors:\n  - name: '  '\n").unwrap_err();
        assert!(err.to_string().contains("must be non-empty"));
    }

    #[test]
    fn rejects_duplicate_names_case_insensitively() {
        let yaml = "competitors:\n  - name: Acme\n  - name: ACME\n";
        let err = parse_competitors(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate competitor name"));
    }

    #[test]
    fn rejects_non_http_target() {
        let yaml = "competitors:\n  - name: Acme\n    targets:\n      - url: ftp://acme.example\n";
        let err = parse_competitors(yaml).unwrap_err();
        assert!(err.to_string().contains("non-http target url"));
    }

    #[test]
    fn rejects_duplicate_target_for_same_competitor() {
        let yaml = "competitors:\n  - name: Acme\n    targets:\n      - url: https://a.example\n      - url: https://a.example\n";
        let err = parse_competitors(yaml).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_unknown_target_type() {
        let yaml = "competitors:\n  - name: Acme\n    targets:\n      - url: https://a.example\n        type: PODCAST\n";
        let err = parse_competitors(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::CompetitorsFileParse(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_competitors(Path::new("/nonexistent/competitors.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CompetitorsFileIo { .. }));
    }

    #[test]
    fn http_url_check() {
        assert!(is_http_url("https://acme.example"));
        assert!(is_http_url("HTTP://acme.example/path"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("acme.example"));
    }
}
