use anyhow::{Context, Result};
use clap::Parser;
use evolve_core::config::{AppConfig, StorageBackend};
use evolve_core::init_logging;
use evolve_data::OrganismKind;
use evolve_io::{JsonStore, SqliteStore, WorldStore};
use evolve_lib::ui::console::{self, Console};
use evolve_lib::{Command, Session};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "evolve.toml")]
    config: String,

    /// Fixed RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Save location (overrides the config file)
    #[arg(long)]
    save: Option<String>,

    /// Use the JSON snapshot store instead of SQLite
    #[arg(long)]
    json: bool,

    /// Kind of the player cell: herbivore, carnivore or omnivore
    #[arg(long)]
    kind: Option<String>,

    /// Name of the player cell
    #[arg(long)]
    name: Option<String>,

    /// Number of turns to run in headless mode
    #[arg(long, default_value_t = 20)]
    turns: u64,

    /// Load the saved world before starting
    #[arg(long)]
    resume: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.session.seed = args.seed;
    }
    if let Some(path) = &args.save {
        config.storage.path = path.clone();
    }
    if args.json {
        config.storage.backend = StorageBackend::Json;
    }
    config.validate().context("Invalid configuration")?;
    init_logging(&config.logging.level);

    let store: Box<dyn WorldStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open(&config.storage.path)?),
        StorageBackend::Json => Box::new(JsonStore::new(&config.storage.path)),
    };
    let mut session = Session::new(store, config.session.seed);
    let mut out = Console::stdout();

    if args.resume {
        let lines = session.handle(Command::LoadWorld);
        out.render(&lines)?;
    }

    if session.world.player().is_none() {
        let answer = match (&args.kind, &args.name) {
            (Some(kind), Some(name)) => {
                let kind = OrganismKind::parse_base(kind)
                    .with_context(|| format!("Unknown cell kind '{kind}'"))?;
                Some((kind, name.clone()))
            }
            _ => out.prompt_player(&mut std::io::stdin().lock())?,
        };
        let Some((kind, name)) = answer else {
            return Ok(());
        };
        let lines = session.handle(Command::CreateInitialPlayer { kind, name });
        out.render(&lines)?;
    }

    match args.mode {
        Mode::Headless => {
            for _ in 0..args.turns {
                let lines = session.handle(Command::AdvanceTurn);
                out.render(&lines)?;
            }
            let lines = session.handle(Command::ShowStats);
            out.render(&lines)?;
        }
        Mode::Standard => {
            while session.running {
                out.print_menu()?;
                let command = console::read_command()?;
                let lines = session.handle(command);
                out.render(&lines)?;
            }
        }
    }

    Ok(())
}
