use crate::domain::HookEnvironment;
use crate::infra::command::call;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// Hook tools provided by the Juju agent while an action runs.
///
/// Tools are looked up on the PATH unless a directory holding them is given.
#[derive(Debug, Default, Clone)]
pub struct JujuHookEnv {
    tools_dir: Option<PathBuf>,
}

impl JujuHookEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: Some(dir.into()),
        }
    }

    fn tool(&self, name: &str) -> String {
        match &self.tools_dir {
            Some(dir) => dir.join(name).display().to_string(),
            None => name.to_string(),
        }
    }
}

impl HookEnvironment for JujuHookEnv {
    fn action_params(&self) -> Result<String> {
        call(&self.tool("action-get"), &["--format=yaml"]).context("lendo parâmetros da action")
    }

    fn action_set(&self, key: &str, value: &str) -> Result<()> {
        let pair = result_pair(key, value)?;
        call(&self.tool("action-set"), &[pair.as_str()])
            .with_context(|| format!("registrando resultado {key}"))
            .map(|_| ())
    }

    fn action_fail(&self, message: &str) -> Result<()> {
        call(&self.tool("action-fail"), &[message])
            .context("marcando action como falha")
            .map(|_| ())
    }

    fn config(&self) -> Result<String> {
        call(&self.tool("config-get"), &["--format=yaml"]).context("lendo configuração do charm")
    }
}

/// Build the `key=value` argument accepted by `action-set`.
///
/// Keys must be lowercase alphanumerics separated by dashes or dots.
pub fn result_pair(key: &str, value: &str) -> Result<String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
        && !key.starts_with(['-', '.'])
        && !key.ends_with(['-', '.']);
    if !valid {
        bail!("chave de resultado inválida '{key}'");
    }
    Ok(format!("{key}={value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_pair() {
        assert_eq!(result_pair("removed", "c1, c2").unwrap(), "removed=c1, c2");
        assert_eq!(result_pair("removed", "").unwrap(), "removed=");
    }

    #[test]
    fn test_tool_lookup() {
        assert_eq!(JujuHookEnv::new().tool("action-get"), "action-get");
        assert_eq!(
            JujuHookEnv::with_tools_dir("/var/lib/juju/tools/unit-jujushell-0").tool("action-get"),
            "/var/lib/juju/tools/unit-jujushell-0/action-get"
        );
    }

    #[test]
    fn test_result_pair_rejects_bad_keys() {
        assert!(result_pair("", "x").is_err());
        assert!(result_pair("Removed", "x").is_err());
        assert!(result_pair("-removed", "x").is_err());
        assert!(result_pair("removed items", "x").is_err());
    }
}
