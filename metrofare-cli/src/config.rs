use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use metrofare_revenue::FORM_FEED;

pub const DEFAULT_CONFIG_PATH: &str = "metrofare.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputSection,
    pub output: OutputSection,
    pub run: RunSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Directory of extracted report text, one file per reporting year
    pub dir: PathBuf,
    /// Only files with this extension are read (case-insensitive)
    pub extension: String,
    /// Page break inside a text file (pdftotext emits a form feed)
    pub page_separator: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: PathBuf,
    pub delimiter: char,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    pub parallel: bool,
}

impl Default for InputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/raw"),
            extension: "txt".to_string(),
            page_separator: FORM_FEED,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/processed/revenue_data.csv"),
            delimiter: ',',
        }
    }
}

impl OutputSection {
    /// The csv writer takes a single byte.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if !self.delimiter.is_ascii() {
            bail!("output delimiter must be ASCII, got {:?}", self.delimiter);
        }
        Ok(self.delimiter as u8)
    }
}

/// Load the config at `path`, or defaults when the file does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.input.page_separator, '\u{0C}');
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("metrofare.toml");
        fs::write(&p, "[input]\ndir = \"reports\"\n\n[run]\nparallel = true\n").unwrap();

        let cfg = load_config(&p).unwrap();
        assert_eq!(cfg.input.dir, PathBuf::from("reports"));
        assert_eq!(cfg.input.extension, "txt");
        assert!(cfg.run.parallel);
        assert_eq!(cfg.output.delimiter, ',');
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("metrofare.toml");
        init_config(&p).unwrap();
        assert_eq!(load_config(&p).unwrap(), Config::default());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let out = OutputSection {
            delimiter: '、',
            ..OutputSection::default()
        };
        assert!(out.delimiter_byte().is_err());
        assert_eq!(OutputSection::default().delimiter_byte().unwrap(), b',');
    }
}
