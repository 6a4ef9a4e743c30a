//! Parse stage: raw source bytes into a [`ConfigTree`].
//!
//! The codec is chosen from the source's file extension. YAML and TOML are
//! decoded straight into the tree; JSON goes through a Figment provider and
//! is extracted as a JSON value.

mod toml;
#[cfg(feature = "yaml")]
mod yaml;

use camino::Utf8Path;

use crate::{ConfigTree, Source, StrataError, StrataResult};

/// Document formats understood by the parse stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DocumentFormat {
    /// YAML 1.2 (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml` and anything unrecognised).
    Toml,
}

impl DocumentFormat {
    /// Select the format from the extension of `path`, case-insensitively.
    ///
    /// ```
    /// use strata_config::DocumentFormat;
    /// use camino::Utf8Path;
    ///
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("config.dev.YML")), DocumentFormat::Yaml);
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("settings")), DocumentFormat::Toml);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Parse a source into a tree, consuming it.
///
/// # Errors
///
/// Returns [`StrataError::Parse`] when the bytes are not UTF-8, the document
/// is malformed, the top level is not a mapping, or the codec for the
/// detected format is disabled.
pub fn parse_source(source: Source) -> StrataResult<ConfigTree> {
    let (path, bytes) = source.into_parts();
    let format = DocumentFormat::from_path(&path);
    let data = String::from_utf8(bytes).map_err(|err| StrataError::parse(&path, err))?;
    let tree = parse_str(&path, &data, format)?;
    tracing::debug!(source = %path, ?format, "parsed configuration source");
    Ok(tree)
}

/// Parse `data` as `format`, attributing failures to `path`.
///
/// # Errors
///
/// See [`parse_source`].
pub fn parse_str(path: &Utf8Path, data: &str, format: DocumentFormat) -> StrataResult<ConfigTree> {
    let tree = match format {
        DocumentFormat::Yaml => parse_yaml(path, data)?,
        DocumentFormat::Json => parse_json(path, data)?,
        DocumentFormat::Toml => toml::parse(path, data)?,
    };
    if !tree.is_mapping() {
        return Err(StrataError::parse(
            path,
            "top-level document must be a mapping",
        ));
    }
    Ok(tree)
}

#[cfg(feature = "yaml")]
fn parse_yaml(path: &Utf8Path, data: &str) -> StrataResult<ConfigTree> {
    yaml::parse(path, data)
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(path: &Utf8Path, _data: &str) -> StrataResult<ConfigTree> {
    Err(StrataError::parse(
        path,
        "yaml feature disabled: enable the 'yaml' feature to support this file format",
    ))
}

#[cfg(feature = "json")]
fn parse_json(path: &Utf8Path, data: &str) -> StrataResult<ConfigTree> {
    use figment::{
        Figment,
        providers::{Format, Json},
    };

    let value: serde_json::Value = Figment::from(Json::string(data))
        .extract()
        .map_err(|err| StrataError::parse(path, err))?;
    Ok(ConfigTree::from(value))
}

#[cfg(not(feature = "json"))]
fn parse_json(path: &Utf8Path, _data: &str) -> StrataResult<ConfigTree> {
    Err(StrataError::parse(
        path,
        "json feature disabled: enable the 'json' feature to support this file format",
    ))
}
