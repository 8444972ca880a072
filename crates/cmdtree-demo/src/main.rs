//! A command console driven by `cmdtree`.
//!
//! Runs one command line given on the command line, or one per line from
//! stdin when none is given:
//!
//! ```text
//! cmdtree-demo --perm warps.set warp set home
//! printf 'warp set home\nwarp list\n' | cmdtree-demo --perm warps.set
//! cmdtree-demo --complete warp s
//! cmdtree-demo --graph commands.dot
//! ```

mod caller;
mod commands;

use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use cmdtree::{string_to_path, Caller, CallerKind, DotWriter, Router, RouterConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::caller::TerminalCaller;
use crate::commands::DemoCommands;

#[derive(Parser, Debug)]
#[command(name = "cmdtree-demo", version, about)]
struct Cli {
    /// Router configuration (JSON if the extension is .json, YAML otherwise)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run as the console instead of a player
    #[arg(long)]
    console: bool,

    /// Player name
    #[arg(long, default_value = "steve")]
    name: String,

    /// Grant a permission node (repeatable)
    #[arg(long = "perm", value_name = "NODE")]
    perms: Vec<String>,

    /// Turn on maintenance mode, which blocks /op
    #[arg(long)]
    maintenance: bool,

    /// Print completions for the given words instead of running them
    #[arg(long)]
    complete: bool,

    /// Write the command tree as DOT to FILE and exit
    #[arg(long, value_name = "FILE")]
    graph: Option<PathBuf>,

    /// Write an undirected graph
    #[arg(long, requires = "graph")]
    undirected: bool,

    /// The command line, e.g. `warp set home`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    let mut router = Router::builder().config(config).build();
    router
        .register(&DemoCommands::new(cli.maintenance))
        .context("failed to register commands")?;
    debug!(commands = router.leaves().len(), "router ready");

    if let Some(path) = &cli.graph {
        return write_graph(&router, path, !cli.undirected);
    }

    let stdout = io::stdout();
    if cli.complete {
        let mut out = stdout.lock();
        for candidate in complete_words(&router, &cli.words) {
            writeln!(out, "{}", candidate)?;
        }
        return Ok(());
    }

    let kind = if cli.console {
        CallerKind::Console
    } else {
        CallerKind::Player
    };
    let name = if cli.console { "console" } else { cli.name.as_str() };
    let caller = TerminalCaller::new(name, kind, stdout.lock()).grant(cli.perms.iter().cloned());

    if cli.words.is_empty() {
        for line in io::stdin().lock().lines() {
            run_line(&router, &caller, &line?)?;
        }
    } else {
        run_line(&router, &caller, &cli.words.join(" "))?;
    }
    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<RouterConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => RouterConfig::from_json_str(&text)?,
        _ => RouterConfig::from_yaml_str(&text)?,
    };
    Ok(config)
}

/// Splits `line` into a command name and arguments and dispatches it.
///
/// A leading command prefix on the name is accepted and stripped. Blank
/// lines are skipped.
fn run_line(router: &Router, caller: &dyn Caller, line: &str) -> anyhow::Result<()> {
    let tokens = string_to_path(line);
    let Some((name, args)) = tokens.split_first() else {
        return Ok(());
    };
    let name = name
        .strip_prefix(router.config().command_prefix.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(name.as_str());
    router.dispatch(caller, name, args)?;
    Ok(())
}

fn complete_words(router: &Router, words: &[String]) -> Vec<String> {
    match words.split_first() {
        Some((name, args)) => router.complete(name, args),
        None => Vec::new(),
    }
}

fn write_graph(router: &Router, path: &Path, directed: bool) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut dot = DotWriter::new(BufWriter::new(file), directed)?;
    router.write_graph(&mut dot)?;
    dot.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn router() -> Router {
        let mut router = Router::new();
        router.register(&DemoCommands::new(false)).unwrap();
        router
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_trailing_words() {
        let cli = Cli::parse_from(["cmdtree-demo", "--perm", "warps.set", "warp", "set", "home"]);
        assert_eq!(cli.perms, vec!["warps.set"]);
        assert_eq!(cli.words, vec!["warp", "set", "home"]);
    }

    #[test]
    fn test_run_line_strips_prefix() {
        let r = router();
        let caller = TerminalCaller::new("alex", CallerKind::Player, Vec::new());
        run_line(&r, &caller, "/say hi").unwrap();
        run_line(&r, &caller, "   ").unwrap();
        run_line(&r, &caller, "say   hi").unwrap();
        assert_eq!(
            String::from_utf8(caller.into_inner()).unwrap(),
            "Hi, alex!\nHi, alex!\n"
        );
    }

    #[test]
    fn test_complete_words() {
        let r = router();
        let words = |w: &[&str]| w.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(complete_words(&r, &words(&["warp"])), vec!["go", "list", "set"]);
        assert_eq!(complete_words(&r, &words(&["warp", "s"])), vec!["set"]);
        assert!(complete_words(&r, &[]).is_empty());
    }

    #[test]
    fn test_load_config_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("router.yaml");
        fs::write(&yaml, "command_prefix: \"!\"\n").unwrap();
        assert_eq!(load_config(&yaml).unwrap().command_prefix, "!");

        let json = dir.path().join("router.json");
        fs::write(&json, r#"{"messages": {"permission_denied": "No."}}"#).unwrap();
        assert_eq!(load_config(&json).unwrap().messages.permission_denied, "No.");

        assert!(load_config(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_write_graph_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.dot");
        write_graph(&router(), &path, false).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("graph {"));
        assert!(text.contains("[label=\"warp\"]"));
    }
}
