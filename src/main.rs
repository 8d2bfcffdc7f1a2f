//! Command-line host.
//!
//! Composition root: builds the provider registry, the controller, the
//! selection store and the event bus, then runs a line-oriented command
//! loop on the thread that owns the controller.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use sightfront::handlers::{Dispatcher, Reply};
use sightfront::model::{config_metadata, find_preset, presets, supported_styles};
use sightfront::overlay::HostContext;
use sightfront::platform::default_registry;
use sightfront::storage::ConfigStore;
use sightfront::{
    logging, AppEvent, EventBus, EventPublisher, OverlayController, SightConfig, SightOverrides,
    SightStyle,
};

#[derive(Parser)]
#[command(version, about = "Aiming-reticle overlay controller")]
struct Cli {
    /// Register the headless surface (logs frames instead of drawing).
    #[arg(long)]
    headless: bool,

    /// Debug output for this crate.
    #[arg(long)]
    debug: bool,

    /// Selection file. Defaults to the per-user config directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Application id handed to the native surface.
    #[arg(long, default_value = "com.sightfront.app")]
    host_id: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the preset catalog.
    Presets,
    /// List the supported styles.
    Styles,
    /// Print the settings metadata as JSON.
    Metadata,
    /// Validate a config given as JSON.
    Validate { json: String },
    /// Interactive command loop (default).
    Run,
}

#[derive(Parser)]
#[command(name = "sightfront")]
struct Repl {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand)]
enum ReplCommand {
    Init,
    Permission {
        #[command(subcommand)]
        action: PermissionAction,
    },
    Show {
        #[arg(long)]
        preset: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    Update {
        #[command(flatten)]
        fields: FieldArgs,
    },
    Hide,
    Toggle,
    Status,
    Presets,
    Release,
    Quit,
}

#[derive(Subcommand)]
enum PermissionAction {
    Check,
    Request,
}

#[derive(Args, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    style: Option<SightStyle>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    size: Option<u32>,
    #[arg(long)]
    thickness: Option<u32>,
    #[arg(long, value_name = "BOOL")]
    center_dot: Option<bool>,
    #[arg(long)]
    center_dot_size: Option<u32>,
    #[arg(long)]
    opacity: Option<f64>,
}

impl FieldArgs {
    fn overrides(&self) -> SightOverrides {
        SightOverrides {
            style: self.style,
            color: self.color.clone(),
            size: self.size,
            thickness: self.thickness,
            show_center_dot: self.center_dot,
            center_dot_size: self.center_dot_size,
            opacity: self.opacity,
        }
    }
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match &cli.command {
        Some(Command::Presets) => print_presets(),
        Some(Command::Styles) => {
            for style in supported_styles() {
                println!("{style}");
            }
        }
        Some(Command::Metadata) => {
            let json = serde_json::to_string_pretty(&config_metadata()).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        Some(Command::Validate { json }) => {
            let config: SightConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
            config.validate().map_err(|e| e.to_string())?;
            println!("valid");
        }
        Some(Command::Run) | None => run(&cli)?,
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), String> {
    let registry = default_registry(cli.headless);
    info!(
        platform = %registry.platform(),
        providers = ?registry.names(),
        "sightfront starting"
    );

    let store = match &cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::at_default_path(),
    };
    let controller = OverlayController::new(registry, HostContext::new(&cli.host_id));
    info!(app_id = %controller.host().app_id, "host context");
    let mut dispatcher = Dispatcher::new(controller).with_store(store);
    if let Some(store) = dispatcher.store() {
        info!(path = %store.path().display(), "selection file");
    }

    let bus = EventBus::new();
    let publisher = bus.publisher();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt()?;
        let Some(line) = lines.next() else {
            // EOF: same as `quit`.
            publisher.publish(AppEvent::Quit);
            flush_bus(&bus, &mut dispatcher);
            break;
        };
        let line = line.map_err(|e| e.to_string())?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &publisher, &mut dispatcher) {
            Ok(()) => {
                if flush_bus(&bus, &mut dispatcher) {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn prompt() -> Result<(), String> {
    let mut stdout = io::stdout();
    write!(stdout, "> ").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())
}

/// Parses one line and publishes the matching event.
fn respond(line: &str, publisher: &EventPublisher, dispatcher: &mut Dispatcher) -> Result<(), String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "sightfront".to_string());
    let repl = Repl::try_parse_from(args).map_err(|e| e.to_string())?;

    let event = match repl.command {
        ReplCommand::Init => AppEvent::Init,
        ReplCommand::Permission { action } => match action {
            PermissionAction::Check => AppEvent::CheckPermission,
            PermissionAction::Request => AppEvent::RequestPermission,
        },
        ReplCommand::Show { preset, fields } => {
            let overrides = fields.overrides();
            match preset {
                Some(id) if overrides.is_empty() => AppEvent::ShowPreset(id),
                Some(id) => {
                    let preset = find_preset(&id).ok_or_else(|| format!("unknown preset {id:?}"))?;
                    AppEvent::Show(preset.config.derive(&overrides).map_err(|e| e.to_string())?)
                }
                None => {
                    let base = dispatcher.base_config();
                    AppEvent::Show(base.derive(&overrides).map_err(|e| e.to_string())?)
                }
            }
        }
        ReplCommand::Update { fields } => {
            let base = dispatcher.base_config();
            AppEvent::Update(base.derive(&fields.overrides()).map_err(|e| e.to_string())?)
        }
        ReplCommand::Hide => AppEvent::Hide,
        ReplCommand::Toggle => AppEvent::Toggle,
        ReplCommand::Status => AppEvent::Status,
        ReplCommand::Presets => {
            print_presets();
            return Ok(());
        }
        ReplCommand::Release => AppEvent::Release,
        ReplCommand::Quit => AppEvent::Quit,
    };
    publisher.publish(event);
    Ok(())
}

/// Dispatches everything pending. Returns true once a quit was handled.
fn flush_bus(bus: &EventBus, dispatcher: &mut Dispatcher) -> bool {
    let mut quit = false;
    for reply in dispatcher.dispatch_all(bus) {
        match reply {
            Ok(Reply::Message(text)) => println!("{text}"),
            Ok(Reply::Quit) => quit = true,
            Err(err) => println!("error: {err}"),
        }
    }
    quit
}

fn print_presets() {
    for preset in presets() {
        let c = &preset.config;
        println!(
            "{:<10} {:<18} {:<9} {} size={} thickness={}",
            preset.id,
            preset.display_name,
            c.style.as_str(),
            c.color,
            c.size,
            c.thickness
        );
    }
}
