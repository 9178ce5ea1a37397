use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// One line of `cargo build --message-format=json` output. Only the fields
/// the scanner inspects are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct BuildMessage {
    #[serde(default)]
    pub message: Option<Diagnostic>,
    #[serde(default)]
    pub executable: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Diagnostic {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub rendered: Option<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.level.as_deref() == Some("error")
    }
}

/// Base name of a produced artifact: the final path segment, truncated at the
/// first `.`.
pub fn artifact_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.split('.').next().unwrap_or(name)
}

/// Scan captured compiler output line by line, in emission order.
///
/// Error-level diagnostics get their rendered form printed and set the
/// failure flag; the flag never clears once set. Produced executables are
/// handed to `on_executable` as they appear, even after earlier errors, so
/// binding generation still runs for whatever did build. The caller checks
/// the returned flag once the whole stream has been consumed.
pub fn scan<F>(stdout: &[u8], mut on_executable: F) -> Result<bool>
where
    F: FnMut(&str) -> Result<()>,
{
    let text = std::str::from_utf8(stdout).context("compiler output was not valid UTF-8")?;
    let mut failed = false;
    for line in text.lines() {
        let msg: BuildMessage = serde_json::from_str(line)
            .with_context(|| format!("unparseable compiler message: {line}"))?;
        if let Some(diag) = &msg.message {
            if diag.is_error() {
                if let Some(rendered) = &diag.rendered {
                    println!("{rendered}");
                }
                failed = true;
            }
        }
        if let Some(exe) = &msg.executable {
            info!("executable {}", artifact_stem(exe));
            on_executable(exe)?;
        }
    }
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_scan(stdout: &[u8]) -> (bool, Vec<String>) {
        let mut seen = Vec::new();
        let failed = scan(stdout, |exe| {
            seen.push(exe.to_string());
            Ok(())
        })
        .unwrap();
        (failed, seen)
    }

    #[test]
    fn stem_strips_directory_and_extension() {
        assert_eq!(artifact_stem("/tmp/target/wasm32/release/app.wasm"), "app");
        assert_eq!(artifact_stem("link.wasm"), "link");
        assert_eq!(artifact_stem("noext"), "noext");
        assert_eq!(artifact_stem("a/b/app.opt.wasm"), "app");
    }

    #[test]
    fn error_and_executable_in_one_session() {
        let out = concat!(
            r#"{"message":{"level":"error","rendered":"boom"}}"#,
            "\n",
            r#"{"executable":"/tmp/target/wasm32/release/app.wasm"}"#,
            "\n",
        );
        let (failed, seen) = collect_scan(out.as_bytes());
        assert!(failed);
        assert_eq!(seen, vec!["/tmp/target/wasm32/release/app.wasm"]);
    }

    #[test]
    fn executable_only_session_does_not_fail() {
        let out = r#"{"executable":"/t/app.wasm"}"#;
        let (failed, seen) = collect_scan(out.as_bytes());
        assert!(!failed);
        assert_eq!(seen, vec!["/t/app.wasm"]);
    }

    #[test]
    fn warnings_and_unrelated_messages_are_ignored() {
        let out = concat!(
            r#"{"reason":"compiler-artifact","target":{"name":"web"}}"#,
            "\n",
            r#"{"message":{"level":"warning","rendered":"meh"}}"#,
            "\n",
        );
        let (failed, seen) = collect_scan(out.as_bytes());
        assert!(!failed);
        assert!(seen.is_empty());
    }

    #[test]
    fn executables_are_reported_in_emission_order() {
        let out = concat!(
            r#"{"executable":"/t/main.wasm"}"#,
            "\n",
            r#"{"executable":"/t/link.wasm"}"#,
            "\n",
        );
        let (_, seen) = collect_scan(out.as_bytes());
        assert_eq!(seen, vec!["/t/main.wasm", "/t/link.wasm"]);
    }

    #[test]
    fn flag_stays_set_across_later_clean_messages() {
        let out = concat!(
            r#"{"message":{"level":"error","rendered":"first"}}"#,
            "\n",
            r#"{"message":{"level":"warning","rendered":"later"}}"#,
            "\n",
        );
        let (failed, _) = collect_scan(out.as_bytes());
        assert!(failed);
    }

    #[test]
    fn malformed_line_is_fatal() {
        let result = scan(b"not json", |_| Ok(()));
        assert!(result.is_err());
    }

    #[test]
    fn callback_error_propagates() {
        let out = r#"{"executable":"/t/app.wasm"}"#;
        let result = scan(out.as_bytes(), |_| anyhow::bail!("bindgen exploded"));
        assert!(result.unwrap_err().to_string().contains("bindgen exploded"));
    }
}
