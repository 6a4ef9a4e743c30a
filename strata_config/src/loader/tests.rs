//! Tests for the loader entrypoints.

use std::sync::Arc;

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use serde::Deserialize;

use super::*;
use crate::{
    ConfigTree, EnvProvider, InMemorySecretStore, MapEnvironment, MemoryFileService,
    ProviderError, SSM_PREFIX, SecretStoreProvider, StrataError,
};

#[derive(Debug, Deserialize, PartialEq)]
struct Db {
    user: String,
    pass: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct App {
    db: Db,
}

#[fixture]
fn files() -> MemoryFileService {
    MemoryFileService::new()
        .with_file("conf/base.yaml", "db:\n  user: a\n  pass: env:DB_PASS\n")
        .with_file("conf/override.yaml", "db:\n  user: b\n")
        .with_file("conf/extra.json", r#"{"db": {"pass": "ssm:/db/pass"}}"#)
        .with_file("conf/broken.yaml", "db: [unclosed\n")
}

fn env_registry() -> Result<ProviderRegistry> {
    let env = MapEnvironment::new().with_var("DB_PASS", "secretpw");
    let registry = ProviderRegistry::new()
        .with_provider("env:", EnvProvider::with_environment(env))
        .map_err(|e| anyhow!("{e}"))?;
    Ok(registry)
}

fn loader(files: MemoryFileService) -> Result<Loader<MemoryFileService>> {
    Ok(Loader::new("conf")
        .with_file_service(files)
        .with_registry(env_registry()?))
}

#[rstest]
fn build_merges_then_resolves(files: MemoryFileService) -> Result<()> {
    let config = loader(files)?
        .build(["base.yaml", "override.yaml"])
        .map_err(|e| anyhow!("{e}"))?;
    let expected: ConfigTree = serde_json::json!({"db": {"user": "b", "pass": "secretpw"}}).into();
    ensure!(config.tree() == &expected, "unexpected tree {:?}", config.tree());
    Ok(())
}

#[rstest]
fn load_deserialises_into_type(files: MemoryFileService) -> Result<()> {
    let app: App = loader(files)?
        .load(["base.yaml", "override.yaml"])
        .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(
        app,
        App {
            db: Db {
                user: "b".into(),
                pass: "secretpw".into(),
            }
        }
    );
    Ok(())
}

#[rstest]
fn formats_can_be_mixed(files: MemoryFileService) -> Result<()> {
    let store = InMemorySecretStore::new().with_parameter("/db/pass", "from-store");
    let config = loader(files)?
        .with_provider(SSM_PREFIX, SecretStoreProvider::new(store))
        .map_err(|e| anyhow!("{e}"))?
        .build(["base.yaml", "extra.json"])
        .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(
        config.get("db.pass").and_then(ConfigTree::as_str),
        Some("from-store")
    );
    assert_eq!(config.get("db.user").and_then(ConfigTree::as_str), Some("a"));
    Ok(())
}

#[rstest]
fn empty_source_list_yields_empty_config(files: MemoryFileService) -> Result<()> {
    let config = loader(files)?
        .build(std::iter::empty::<&str>())
        .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(config.into_tree(), ConfigTree::empty());
    Ok(())
}

#[rstest]
fn missing_source_fails_with_io(files: MemoryFileService) -> Result<()> {
    let Err(err) = loader(files)?.build(["base.yaml", "absent.yaml"]) else {
        return Err(anyhow!("expected missing source to fail"));
    };
    let StrataError::Io { path, .. } = &*err else {
        return Err(anyhow!("expected Io error, got {err}"));
    };
    assert_eq!(path.as_str(), "conf/absent.yaml");
    Ok(())
}

#[rstest]
fn malformed_source_fails_with_parse(files: MemoryFileService) -> Result<()> {
    let err = loader(files)?
        .build(["base.yaml", "broken.yaml"])
        .err()
        .ok_or_else(|| anyhow!("expected parse failure"))?;
    ensure!(err.is_parse(), "expected Parse error, got {err}");
    Ok(())
}

#[derive(Debug)]
struct Refuse;

impl Provider for Refuse {
    fn name(&self) -> &str {
        "refuse"
    }

    fn resolve(&self, key: &str) -> Result<String, ProviderError> {
        Err(ProviderError::new(format!("refused {key}")))
    }
}

#[rstest]
fn provider_failure_aborts_build(files: MemoryFileService) -> Result<()> {
    let with_refused = files.with_file("conf/refused.yaml", "db:\n  pass: no:thanks\n");
    let err = loader(with_refused)?
        .with_provider("no:", Refuse)
        .map_err(|e| anyhow!("{e}"))?
        .build(["base.yaml", "refused.yaml"])
        .err()
        .ok_or_else(|| anyhow!("expected resolution failure"))?;
    let StrataError::Resolution { path, key, .. } = &*err else {
        return Err(anyhow!("expected Resolution error, got {err}"));
    };
    assert_eq!(path, "db.pass");
    assert_eq!(key, "thanks");
    Ok(())
}

#[rstest]
fn type_mismatch_fails_with_conversion() -> Result<()> {
    let files = MemoryFileService::new().with_file("conf/app.toml", "db = 5\n");
    let err = loader(files)?
        .load::<App, _, _>(["app.toml"])
        .err()
        .ok_or_else(|| anyhow!("expected conversion failure"))?;
    let StrataError::Conversion { path, .. } = &*err else {
        return Err(anyhow!("expected Conversion error, got {err}"));
    };
    ensure!(path.is_empty(), "root conversion reported path '{path}'");
    Ok(())
}

#[rstest]
fn extract_inner_reads_subtree(files: MemoryFileService) -> Result<()> {
    let config = loader(files)?
        .build(["base.yaml"])
        .map_err(|e| anyhow!("{e}"))?;
    let db: Db = config.extract_inner("db").map_err(|e| anyhow!("{e}"))?;
    assert_eq!(db.user, "a");
    assert_eq!(db.pass, "secretpw");
    Ok(())
}

#[rstest]
#[case::absent("db.port")]
#[case::wrong_type("db.user")]
fn extract_inner_reports_path(files: MemoryFileService, #[case] path: &str) -> Result<()> {
    let config = loader(files)?
        .build(["base.yaml"])
        .map_err(|e| anyhow!("{e}"))?;
    let err = config
        .extract_inner::<u16>(path)
        .err()
        .ok_or_else(|| anyhow!("expected conversion failure"))?;
    let StrataError::Conversion { path: reported, .. } = &*err else {
        return Err(anyhow!("expected Conversion error, got {err}"));
    };
    assert_eq!(reported, path);
    Ok(())
}

#[rstest]
fn free_functions_match_loader(files: MemoryFileService) -> Result<()> {
    let shared = Arc::new(files);
    let via_fn: App = load(
        Arc::clone(&shared),
        env_registry()?,
        "conf",
        ["base.yaml", "override.yaml"],
    )
    .map_err(|e| anyhow!("{e}"))?;
    let via_build = build(
        Arc::clone(&shared),
        env_registry()?,
        "conf",
        ["base.yaml", "override.yaml"],
    )
    .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(via_build.extract::<App>().map_err(|e| anyhow!("{e}"))?, via_fn);
    Ok(())
}

#[test]
fn loader_defaults_to_environment_registry() {
    let loader = Loader::new("conf");
    assert_eq!(loader.directory().as_str(), "conf");
    assert_eq!(loader.registry().prefixes().collect::<Vec<_>>(), vec!["env:"]);
}

#[derive(Debug, Deserialize)]
struct Optional {
    port: Option<u16>,
}

#[rstest]
fn empty_yaml_override_clears_a_value(files: MemoryFileService) -> Result<()> {
    let with_blank = files
        .with_file("conf/port.yaml", "port: 8080\n")
        .with_file("conf/unset.yaml", "port:\n");
    let loaded: Optional = loader(with_blank)?
        .load(["port.yaml", "unset.yaml"])
        .map_err(|e| anyhow!("{e}"))?;
    ensure!(loaded.port.is_none(), "expected no port, got {:?}", loaded.port);
    Ok(())
}
