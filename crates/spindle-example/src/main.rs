//! `spindle-demo`: dispatch one component action from the command line.
//!
//! The binary stands in for an HTTP transport. It builds a request from the
//! flags, resolves the component, runs the action and prints the rendered
//! output.
//!
//! ```text
//! spindle-demo counter --action increment --args 5 --var count=10
//! spindle-demo counter --action reset-requested --event-params '{"to": 0}'
//! spindle-demo tasks --id ada --action add --args "'write docs'"
//! spindle-demo alert --method get --var message=Saved --input page=2
//! RUST_LOG=spindle_dispatch=trace spindle-demo demo:greeting --attr name=Ada
//! ```

mod components;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::Value;
use spindle::{Config, Request, RequestContext, Vars, ACTION_ARGS_KEY, EVENT_PARAMS_KEY};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Get,
    Post,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "spindle-demo", version, about = "Dispatch a component action and print the result")]
struct Cli {
    /// Component name, e.g. `counter`, `tasks`, `alert` or `demo:greeting`
    component: String,

    /// Action or event name; omit to re-render without an action
    #[arg(long)]
    action: Option<String>,

    /// Comma-separated action arguments
    #[arg(long = "args")]
    action_args: Option<String>,

    /// JSON payload for listener-routed events
    #[arg(long, value_parser = parse_json)]
    event_params: Option<Value>,

    /// Extra request input as key=value
    #[arg(long = "input", value_parser = parse_pair)]
    input: Vec<(String, Value)>,

    /// Component variable as key=value
    #[arg(long = "var", value_parser = parse_pair)]
    variables: Vec<(String, Value)>,

    /// Markup attribute as key=value
    #[arg(long = "attr", value_parser = parse_pair)]
    attributes: Vec<(String, Value)>,

    /// Request-scoped component id
    #[arg(long, default_value = "demo")]
    id: String,

    /// Request method
    #[arg(long, value_enum, ignore_case = true, default_value_t = Method::Post)]
    method: Method,

    /// Render as a partial update
    #[arg(long)]
    spinning: bool,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn request(&self) -> Request {
        let mut request = Request::new(self.method.as_str())
            .with_input(self.input.iter().cloned().collect())
            .with("component", self.component.as_str());
        if let Some(raw) = &self.action_args {
            request = request.with(ACTION_ARGS_KEY, raw.as_str());
        }
        if let Some(params) = &self.event_params {
            request = request.with(EVENT_PARAMS_KEY, params.clone());
        }
        request
    }
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

/// `key=value`, where the value is JSON if it parses and a string otherwise.
fn parse_pair(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let app = components::app(config)?;

    let request = cli.request();
    let variables: Vars = cli.variables.iter().cloned().collect();
    let attributes: Vars = cli.attributes.iter().cloned().collect();

    let mut manager = app.manager(&request, &cli.id, &cli.component, cli.spinning)?;
    tracing::debug!(
        component = %cli.component,
        dynamic = manager.is_dynamic(),
        read = request.is_read(),
        "dispatching"
    );

    let output = match &cli.action {
        Some(action) => manager.process(action, &variables, &attributes)?,
        None => manager.refresh(&variables, &attributes)?,
    };
    Ok(app.render(output)?)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    println!("{}", run(&cli)?);
    Ok(())
}
