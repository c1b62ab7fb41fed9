use anyhow::Result;
use jujushell::cli::actions;
use jujushell::domain::HookEnvironment;
use jujushell::infra::JujuHookEnv;
use jujushell::test_support::MockRuntime;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

fn write_tool(dir: &Path, name: &str, log: &Path, output: &str) -> Result<()> {
    let script = format!(
        "#!/bin/sh\nprintf '%s' '{name}' >> '{log}'\nfor arg in \"$@\"; do printf ' [%s]' \"$arg\" >> '{log}'; done\necho >> '{log}'\ncat <<'YAML'\n{output}YAML\n",
        log = log.display()
    );
    let path = dir.join(name);
    fs::write(&path, script)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

fn logged_calls(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

// Single test so no fake tool is executed while another thread still holds
// it open for writing.
#[test]
fn test_hook_tools_against_fake_scripts() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let tools = temp_dir.path();
    let log = tools.join("calls.log");
    write_tool(tools, "action-get", &log, "dry: false\nname: \"\"\nonly-stopped: false\n")?;
    write_tool(tools, "action-set", &log, "")?;
    write_tool(tools, "action-fail", &log, "")?;
    write_tool(tools, "config-get", &log, "lxc-quota-cpu-cores: 1\nport: 4247\n")?;
    let env = JujuHookEnv::with_tools_dir(tools);

    // Raw tool calls
    assert_eq!(env.action_params()?, "dry: false\nname: \"\"\nonly-stopped: false\n");
    assert_eq!(env.config()?, "lxc-quota-cpu-cores: 1\nport: 4247\n");
    env.action_fail("command 'lxc delete c1' failed")?;
    assert_eq!(
        logged_calls(&log),
        vec![
            "action-get [--format=yaml]",
            "config-get [--format=yaml]",
            "action-fail [command 'lxc delete c1' failed]",
        ]
    );

    // Full action: the result reaches action-set as a single argument
    fs::remove_file(&log)?;
    let runtime = Arc::new(MockRuntime::with_containers(&[("c1", true), ("c2", false)]));
    let removed = actions::exterminate_containers(&env, runtime)?;
    assert_eq!(removed, vec!["c1", "c2"]);
    assert_eq!(
        logged_calls(&log),
        vec!["action-get [--format=yaml]", "action-set [removed=c1, c2]"]
    );

    // Invalid keys never reach the tool
    fs::remove_file(&log)?;
    assert!(env.action_set("Bad Key", "x").is_err());
    assert!(logged_calls(&log).is_empty());

    // Missing tool
    let missing = JujuHookEnv::with_tools_dir(tools.join("nowhere"));
    let err = missing.action_params().unwrap_err();
    assert!(format!("{err:#}").contains("not found"));

    Ok(())
}
