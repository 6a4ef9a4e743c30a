//! End-to-end loading from documents written to a temporary directory.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde::Deserialize;
use strata_config::{
    ConfigTree, EnvProvider, LocalFileService, MapEnvironment, Provider, ProviderError,
    ProviderRegistry, StrataError, build, load,
};
use tempfile::TempDir;

/// Provider that records each key it is asked for.
#[derive(Debug, Default)]
struct Recorder {
    calls: Mutex<Vec<String>>,
}

impl Recorder {
    fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Provider for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn resolve(&self, key: &str) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.to_owned());
        if key == "boom" {
            return Err(ProviderError::new("backend unavailable"));
        }
        Ok(format!("<{key}>"))
    }
}

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn write(&self, name: &str, contents: &str) -> Result<()> {
        std::fs::write(self.root.join(name), contents).with_context(|| format!("write {name}"))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    Workspace { _dir: dir, root }
}

fn registry(recorder: &Arc<Recorder>) -> Result<ProviderRegistry> {
    let env = MapEnvironment::new().with_var("DB_PASS", "secretpw");
    ProviderRegistry::new()
        .with_provider("env:", EnvProvider::with_environment(env))
        .and_then(|r| r.with_provider("rec:", Arc::clone(recorder)))
        .map_err(|e| anyhow!("{e}"))
}

#[derive(Debug, Deserialize, PartialEq)]
struct Db {
    user: String,
    pass: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct App {
    db: Db,
}

#[rstest]
fn base_and_override_resolve_env(workspace: Workspace) -> Result<()> {
    workspace.write("base.yaml", "db:\n  user: a\n  pass: env:DB_PASS\n")?;
    workspace.write("override.yaml", "db:\n  user: b\n")?;
    let recorder = Arc::new(Recorder::default());

    let app: App = load(
        LocalFileService::new(),
        registry(&recorder)?,
        workspace.root.clone(),
        ["base.yaml", "override.yaml"],
    )
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
    assert!(recorder.calls().is_empty());
    Ok(())
}

#[rstest]
fn literal_values_never_reach_providers(workspace: Workspace) -> Result<()> {
    workspace.write("only.toml", "flag = \"literal\"\nport = 8080\n")?;
    let recorder = Arc::new(Recorder::default());
    let config = build(
        LocalFileService::new(),
        registry(&recorder)?,
        workspace.root.clone(),
        ["only.toml"],
    )
    .map_err(|e| anyhow!("{e}"))?;
    let expected: ConfigTree = serde_json::json!({"flag": "literal", "port": 8080}).into();
    ensure!(config.tree() == &expected, "unexpected tree {:?}", config.tree());
    assert!(recorder.calls().is_empty());
    Ok(())
}

#[rstest]
fn overridden_placeholders_are_not_resolved(workspace: Workspace) -> Result<()> {
    workspace.write("base.json", r#"{"token": "rec:stale", "name": "rec:name"}"#)?;
    workspace.write("override.yaml", "token: rec:fresh\n")?;
    let recorder = Arc::new(Recorder::default());
    let config = build(
        LocalFileService::new(),
        registry(&recorder)?,
        workspace.root.clone(),
        ["base.json", "override.yaml"],
    )
    .map_err(|e| anyhow!("{e}"))?;
    assert_eq!(config.get("token").and_then(ConfigTree::as_str), Some("<fresh>"));
    assert_eq!(recorder.calls(), vec!["name".to_owned(), "fresh".to_owned()]);
    Ok(())
}

#[rstest]
fn provider_failure_returns_no_partial_config(workspace: Workspace) -> Result<()> {
    workspace.write("app.yaml", "a: rec:ok\nb:\n  - rec:boom\nc: rec:never\n")?;
    let recorder = Arc::new(Recorder::default());
    let err = build(
        LocalFileService::new(),
        registry(&recorder)?,
        workspace.root.clone(),
        ["app.yaml"],
    )
    .err()
    .context("expected the failing provider to abort the build")?;
    let StrataError::Resolution { path, provider, key, .. } = &*err else {
        return Err(anyhow!("expected Resolution error, got {err}"));
    };
    assert_eq!(path, "b[0]");
    assert_eq!(provider, "rec:");
    assert_eq!(key, "boom");
    assert_eq!(recorder.calls(), vec!["ok".to_owned(), "boom".to_owned()]);
    Ok(())
}

#[rstest]
#[case::missing(&[("present.yaml", "a: 1\n")], &["present.yaml", "absent.yaml"], StrataError::is_io)]
#[case::malformed(&[("bad.toml", "a = [\n")], &["bad.toml"], StrataError::is_parse)]
#[case::scalar_document(&[("list.yaml", "- 1\n- 2\n")], &["list.yaml"], StrataError::is_parse)]
fn read_and_parse_failures_are_classified(
    workspace: Workspace,
    #[case] files: &[(&str, &str)],
    #[case] sources: &[&str],
    #[case] classify: fn(&StrataError) -> bool,
) -> Result<()> {
    for (name, contents) in files {
        workspace.write(name, contents)?;
    }
    let recorder = Arc::new(Recorder::default());
    let err = build(
        LocalFileService::new(),
        registry(&recorder)?,
        workspace.root.clone(),
        sources,
    )
    .err()
    .context("expected the build to fail")?;
    ensure!(classify(&err), "unexpected error kind: {err}");
    Ok(())
}

#[rstest]
fn type_mismatch_is_a_conversion_error(workspace: Workspace) -> Result<()> {
    workspace.write("app.yaml", "db:\n  user: [not, a, string]\n  pass: x\n")?;
    let recorder = Arc::new(Recorder::default());
    let err = load::<App, _, _, _>(
        LocalFileService::new(),
        registry(&recorder)?,
        workspace.root.clone(),
        ["app.yaml"],
    )
    .err()
    .context("expected conversion to fail")?;
    ensure!(err.is_conversion(), "unexpected error kind: {err}");
    Ok(())
}
