use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Fixed directory layout of the project, anchored at the repository root.
///
/// Everything the pipeline touches hangs off this: the disposable `stage/`
/// output tree, the web workspace member it compiles for wasm, and the
/// native server member.
pub struct Layout {
    pub root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the repository root. `CARGO_MANIFEST_DIR` is set when run via
    /// `cargo run`; otherwise the current directory is assumed to be the root.
    pub fn discover() -> Result<Self> {
        let root = match env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest_dir) => PathBuf::from(manifest_dir),
            Err(_) => env::current_dir().context("could not determine project root")?,
        };
        Ok(Self::new(root))
    }

    /// Staging root, recreated from scratch on every run.
    pub fn stage_dir(&self) -> PathBuf {
        self.root.join("stage")
    }

    /// Final deployable web assets: generated bindings plus copied static files.
    pub fn static_dir(&self) -> PathBuf {
        self.stage_dir().join("static")
    }

    /// Intermediate wasm-bindgen output, not part of the deployable set.
    pub fn bindgen_dir(&self) -> PathBuf {
        self.stage_dir().join("bindgen")
    }

    /// Workspace member compiled for the wasm target.
    pub fn web_dir(&self) -> PathBuf {
        self.root.join("rust/web")
    }

    /// Pre-existing static web assets shipped alongside the bindings output.
    pub fn web_static_dir(&self) -> PathBuf {
        self.web_dir().join("static")
    }

    /// Workspace member holding the native server.
    pub fn native_dir(&self) -> PathBuf {
        self.root.join("rust/native")
    }
}
