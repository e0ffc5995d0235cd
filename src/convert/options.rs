//! Conversion options, loadable from a YAML file.

use crate::common::{Error, Result};
use crate::sheet::date::DateSystem;
use crate::sheet::{DEFAULT_DATE_FORMAT, OutputFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What happens to a partially written output file when conversion fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialOutput {
    #[default]
    Keep,
    Delete,
}

impl FromStr for PartialOutput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(PartialOutput::Keep),
            "delete" => Ok(PartialOutput::Delete),
            _ => Err(format!("expected keep or delete, got '{}'", s)),
        }
    }
}

/// Options controlling a conversion
///
/// Every field has a default, so an options file only names what it changes:
///
/// ```
/// use access2excel::convert::{ConvertOptions, PartialOutput};
/// use access2excel::sheet::{DateSystem, OutputFormat};
///
/// let options = ConvertOptions::from_yaml_str("format: xls\ndate-system: 1904\non-error: delete\n")?;
/// assert_eq!(options.format, OutputFormat::Xls);
/// assert_eq!(options.date_system, DateSystem::Mac1904);
/// assert_eq!(options.on_error, PartialOutput::Delete);
/// assert_eq!(options.date_format, "m/d/yy h:mm");
/// # Ok::<(), access2excel::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Number format pattern applied to date cells
    pub date_format: String,
    pub date_system: DateSystem,
    pub on_error: PartialOutput,
    /// Rewrite table names that are not valid sheet names
    pub sheet_name_sanitizing: bool,
    /// Directory holding the `mdb-*` programs; searched on `PATH` when unset
    pub mdbtools_dir: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            date_system: DateSystem::default(),
            on_error: PartialOutput::default(),
            sheet_name_sanitizing: true,
            mdbtools_dir: None,
        }
    }
}

impl ConvertOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.format, OutputFormat::Xlsx);
        assert_eq!(options.date_system, DateSystem::Windows1900);
        assert_eq!(options.on_error, PartialOutput::Keep);
        assert!(options.sheet_name_sanitizing);
        assert!(options.mdbtools_dir.is_none());
    }

    #[test]
    fn test_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.yaml");
        std::fs::write(
            &path,
            "format: XLSX\ndate-format: yyyy-mm-dd\nsheet-name-sanitizing: false\nmdbtools-dir: /opt/mdb\n",
        )
        .unwrap();

        let options = ConvertOptions::from_yaml_file(&path).unwrap();
        assert_eq!(options.date_format, "yyyy-mm-dd");
        assert!(!options.sheet_name_sanitizing);
        assert_eq!(options.mdbtools_dir, Some(PathBuf::from("/opt/mdb")));
    }

    #[test]
    fn test_bad_yaml_is_config_error() {
        let err = ConvertOptions::from_yaml_str("format: ods\n").unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        let err = ConvertOptions::from_yaml_str("colour: blue\n").unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        let err = ConvertOptions::from_yaml_file(Path::new("/nonexistent/options.yaml")).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
    }

    #[test]
    fn test_partial_output_from_str() {
        assert_eq!("DELETE".parse::<PartialOutput>(), Ok(PartialOutput::Delete));
        assert!("maybe".parse::<PartialOutput>().is_err());
    }
}
