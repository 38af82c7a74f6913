//! Per-directory configuration file.
//!
//! A `.pdfreflow.toml` next to the input document holds one table per glob
//! pattern. Every table whose pattern matches the input file name is
//! applied, in file order, so later tables override earlier ones:
//!
//! ```toml
//! ["*.pdf"]
//! skip_generator = true
//!
//! ["moby-*.pdf"]
//! title = "Moby Dick"
//! header_pos = 60
//! skip_initial_pages = 2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{LayoutOptions, LayoutOverrides};
use crate::render::RenderOptions;

/// Name of the configuration file looked up beside the input.
pub const CONFIG_FILE_NAME: &str = ".pdfreflow.toml";

/// Settings from one table of the configuration file.
///
/// Every key is optional; unset keys leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigSection {
    /// Log diagnostic frequency tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// Keep the extractor scratch directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep: Option<bool>,
    /// Document title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Document subtitle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Header cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_pos: Option<i32>,
    /// Footer cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_pos: Option<i32>,
    /// Number of leading pages to suppress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_initial_pages: Option<u32>,
    /// Omit the generator meta tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_generator: Option<bool>,
    /// Left margin override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_margin: Option<i32>,
    /// Indent override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent: Option<i32>,
    /// Horizontal leeway override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horiz_leeway: Option<i32>,
    /// Leading override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading: Option<i32>,
}

impl ConfigSection {
    /// Overlay `other` on top of this section.
    pub fn merge(&mut self, other: ConfigSection) {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        overlay!(
            debug,
            keep,
            title,
            subtitle,
            header_pos,
            footer_pos,
            skip_initial_pages,
            skip_generator,
            left_margin,
            indent,
            horiz_leeway,
            leading
        );
    }

    /// Apply the layout keys.
    pub fn apply_layout(&self, mut options: LayoutOptions) -> LayoutOptions {
        if let Some(debug) = self.debug {
            options.debug = debug;
        }
        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }
        if let Some(subtitle) = &self.subtitle {
            options.subtitle = Some(subtitle.clone());
        }
        if self.header_pos.is_some() {
            options.header_pos = self.header_pos;
        }
        if self.footer_pos.is_some() {
            options.footer_pos = self.footer_pos;
        }
        if let Some(pages) = self.skip_initial_pages {
            options.skip_initial_pages = pages;
        }

        let overrides = &mut options.overrides;
        overrides.left_margin = self.left_margin.or(overrides.left_margin);
        overrides.indent = self.indent.or(overrides.indent);
        overrides.horiz_leeway = self.horiz_leeway.or(overrides.horiz_leeway);
        overrides.leading = self.leading.or(overrides.leading);
        options
    }

    /// Apply the rendering keys.
    pub fn apply_render(&self, mut options: RenderOptions) -> RenderOptions {
        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }
        if let Some(skip) = self.skip_generator {
            options.skip_generator = skip;
        }
        options
    }

    /// Layout overrides carried by this section alone.
    pub fn overrides(&self) -> LayoutOverrides {
        LayoutOverrides {
            left_margin: self.left_margin,
            indent: self.indent,
            horiz_leeway: self.horiz_leeway,
            leading: self.leading,
        }
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    sections: Vec<(Pattern, ConfigSection)>,
}

impl ConfigFile {
    /// Parse configuration text.
    pub fn parse(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)?;
        let mut sections = Vec::with_capacity(table.len());

        for (key, value) in table {
            let pattern = Pattern::new(&key)
                .map_err(|e| Error::Config(format!("invalid pattern [{}]: {}", key, e)))?;
            if !value.is_table() {
                return Err(Error::Config(format!(
                    "[{}] must be a table of settings",
                    key
                )));
            }
            let section: ConfigSection = value
                .try_into()
                .map_err(|e| Error::Config(format!("[{}]: {}", key, e)))?;
            sections.push((pattern, section));
        }

        Ok(Self { sections })
    }

    /// Load a configuration file, or `None` if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text).map(Some).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Load the configuration file that sits beside `input`.
    pub fn for_input<P: AsRef<Path>>(input: P) -> Result<Option<Self>> {
        Self::load(config_path_for(input.as_ref()))
    }

    /// Merge every section whose pattern matches `file_name`, in file order.
    pub fn section_for(&self, file_name: &str) -> ConfigSection {
        let mut merged = ConfigSection::default();
        for (pattern, section) in &self.sections {
            if pattern.matches(file_name) {
                debug!("Applying [{}] to {}", pattern.as_str(), file_name);
                merged.merge(section.clone());
            }
        }
        merged
    }

    /// Number of sections in the file.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the file has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Location of the configuration file for an input document.
pub fn config_path_for(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(CONFIG_FILE_NAME)
}

/// Settings for `input` from the configuration file beside it.
pub fn section_for_input<P: AsRef<Path>>(input: P) -> Result<ConfigSection> {
    let input = input.as_ref();
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(ConfigFile::for_input(input)?
        .map(|config| config.section_for(&file_name))
        .unwrap_or_default())
}
