use anyhow::{bail, Result};
use tracing::info;

use crate::diagnostics;
use crate::paths::Layout;
use crate::stage;
use crate::toolchain;

/// Run the whole staging pipeline, in order: prepare the stage, build and
/// scan the wasm member (generating bindings per produced executable), copy
/// the static assets, gate on accumulated build errors, build the native
/// server.
///
/// The gate is post-hoc: every artifact that did build still gets its
/// bindings generated and staged before the run aborts.
pub fn run(layout: &Layout) -> Result<()> {
    stage::prepare(layout)?;

    let stdout = toolchain::build_wasm(&layout.web_dir())?;
    let failed = diagnostics::scan(&stdout, |artifact| bindgen_and_stage(layout, artifact))?;

    stage::copy_tree(&layout.web_static_dir(), &layout.static_dir())?;

    if failed {
        bail!("encountered errors building wasm");
    }

    toolchain::build_native(&layout.native_dir())?;
    info!("staged build complete at {}", layout.stage_dir().display());
    Ok(())
}

/// Generate web bindings for one produced artifact and copy the expected
/// `<name>_bg.wasm` / `<name>.js` pair into the static destination. A missing
/// expected file is fatal.
fn bindgen_and_stage(layout: &Layout, artifact: &str) -> Result<()> {
    toolchain::wasm_bindgen(artifact, &layout.bindgen_dir())?;
    let stem = diagnostics::artifact_stem(artifact);
    for name in [format!("{stem}_bg.wasm"), format!("{stem}.js")] {
        stage::copy_file(
            &layout.bindgen_dir().join(&name),
            &layout.static_dir().join(&name),
        )?;
    }
    Ok(())
}
