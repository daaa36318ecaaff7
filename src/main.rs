// safeTTY: Step-through Banker's Algorithm Safety Simulator

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use safetty::engine::session::Simulation;
use safetty::import::args::{scenario_from_args, ProcessArg};
use safetty::import::load_table;
use safetty::model::scenario::Scenario;
use safetty::report::{json_report, text_report};
use safetty::tree::ExploreOptions;
use safetty::ui::App;

#[derive(Parser)]
#[command(name = "safetty")]
#[command(about = "Step through the Banker's algorithm safety check")]
#[command(version)]
struct Cli {
    /// CSV table with Allocation_*, Max_*, Available_*, Need_* columns
    file: Option<PathBuf>,

    /// Available vector, e.g. 3,3,2 (used with --process)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "process")]
    available: Vec<i64>,

    /// Process as ALLOCATION:MAX, e.g. 0,1,0:7,5,3 (repeatable)
    #[arg(long, allow_hyphen_values = true, requires = "available")]
    process: Vec<ProcessArg>,

    /// Auto-play speed in steps per second (1-10)
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u8).range(1..=10))]
    speed: u8,

    /// Maximum number of decision-tree nodes to expand
    #[arg(long, default_value = "200000")]
    node_budget: usize,

    /// Print a step-by-step text report instead of starting the TUI
    #[arg(long, conflicts_with = "json")]
    report: bool,

    /// Print the final state and decision tree as JSON instead of starting the TUI
    #[arg(long)]
    json: bool,

    /// Write logs to this file (RUST_LOG overrides the default filter)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn headless(&self) -> bool {
        self.report || self.json
    }
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("safetty=info"));

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The TUI owns the terminal, so only headless runs log to stderr
        None if cli.headless() => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn load_scenario(cli: &Cli) -> Result<Scenario, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.file {
        return Ok(load_table(path)?);
    }
    if !cli.process.is_empty() {
        return Ok(scenario_from_args(cli.available.clone(), &cli.process));
    }
    Ok(Scenario::classic())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let scenario = match load_scenario(&cli) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let options = ExploreOptions {
        node_budget: cli.node_budget,
    };
    let simulation = match Simulation::new(scenario, options) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.report {
        print!("{}", text_report(&simulation));
        return Ok(());
    }
    if cli.json {
        println!("{}", json_report(&simulation)?);
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(simulation, cli.speed);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
