use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::info;

/// Compile the web member for the wasm target in release mode and return the
/// captured JSON message stream. Compiler stderr goes straight through to the
/// operator. A failing build does not surface as an `Err` here; its error
/// diagnostics appear in the returned stream and the caller gates on them.
pub fn build_wasm(web_dir: &Path) -> Result<Vec<u8>> {
    info!("building wasm target in {}", web_dir.display());
    let output = Command::new("cargo")
        .args([
            "build",
            "--message-format=json",
            "--target=wasm32-unknown-unknown",
            "--release",
        ])
        .current_dir(web_dir)
        .stderr(Stdio::inherit())
        .output()
        .context("failed to run cargo for the wasm build")?;
    Ok(output.stdout)
}

/// Run wasm-bindgen over one produced artifact, emitting the web-target
/// js/wasm pair into `out_dir`. Nonzero exit is immediately fatal.
pub fn wasm_bindgen(artifact: &str, out_dir: &Path) -> Result<()> {
    let status = Command::new("wasm-bindgen")
        .arg(artifact)
        .arg(format!("--out-dir={}", out_dir.display()))
        .args(["--target=web", "--split-linked-modules", "--keep-debug"])
        .status()
        .context("failed to run wasm-bindgen")?;
    if !status.success() {
        bail!("wasm-bindgen failed on {artifact} ({status})");
    }
    Ok(())
}

/// Build the native server member. Stdout is captured and discarded; nonzero
/// exit is immediately fatal, with no diagnostic scanning.
pub fn build_native(native_dir: &Path) -> Result<()> {
    info!("building native target in {}", native_dir.display());
    let output = Command::new("cargo")
        .arg("build")
        .current_dir(native_dir)
        .stderr(Stdio::inherit())
        .output()
        .context("failed to run cargo for the native build")?;
    if !output.status.success() {
        bail!("native build failed ({})", output.status);
    }
    Ok(())
}
