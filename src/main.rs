use anyhow::Result;
use clap::Parser;
use jujushell::cli::actions::{self, ActionCommand, ActionContext};
use jujushell::infra::lxc_adapter::{DEFAULT_LXC, DEFAULT_LXD};
use jujushell::services::PROFILE_TERMSERVER;
use jujushell::{JujuHookEnv, LxcAdapter};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jujushell-action", about = "Juju actions for the jujushell charm")]
struct Cli {
    /// Path of the lxc client
    #[arg(long, env = "JUJUSHELL_LXC", default_value = DEFAULT_LXC)]
    lxc: String,

    /// Path of the lxd daemon binary
    #[arg(long, env = "JUJUSHELL_LXD", default_value = DEFAULT_LXD)]
    lxd: String,

    /// Directory holding the Juju hook tools (default: looked up on PATH)
    #[arg(long, env = "JUJUSHELL_HOOK_TOOLS")]
    hook_tools: Option<PathBuf>,

    /// LXD profile applied to terminal containers
    #[arg(long, env = "JUJUSHELL_PROFILE", default_value = PROFILE_TERMSERVER)]
    profile: String,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: ActionCommand,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("❌ Erro: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = ActionContext {
        env: Arc::new(match cli.hook_tools {
            Some(dir) => JujuHookEnv::with_tools_dir(dir),
            None => JujuHookEnv::new(),
        }),
        runtime: Arc::new(LxcAdapter::new(cli.lxc).with_lxd(cli.lxd)),
        profile: cli.profile,
    };
    actions::run(&cli.command, &ctx)
}
