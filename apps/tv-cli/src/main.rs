use clap::{Parser, Subcommand};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use tv_registry::directory;

mod board;
mod screen;

use board::SimBoard;

#[derive(Parser)]
#[command(name = "tv-cli")]
#[command(about = "Thermovalve CLI - thermostat/valve controller console", long_about = None)]
struct Cli {
    /// Path of the persisted non-volatile image
    #[arg(long, default_value = "thermovalve.nv")]
    nv: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every register with its current value
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Read one register by name
    Get {
        /// Register name (8 characters or fewer)
        name: String,
    },
    /// Write one register by name
    Set {
        /// Register name
        name: String,
        /// New value as text
        value: String,
    },
    /// Render the two-line home screen
    Screen,
    /// Run control cycles against the simulated board
    Cycle {
        /// Simulated bath temperature in °C (omit for a missing probe)
        #[arg(long)]
        temp: Option<f64>,
        /// Number of cycles to run
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
}

#[derive(Serialize)]
struct RegisterInfo {
    index: usize,
    name: &'static str,
    description: &'static str,
    writable: bool,
    value: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut board = SimBoard::load(&cli.nv)?;

    match cli.command {
        Commands::List { json } => cmd_list(&board, json)?,
        Commands::Get { name } => cmd_get(&board, &name)?,
        Commands::Set { name, value } => {
            cmd_set(&mut board, &name, &value)?;
            board.save()?;
        }
        Commands::Screen => cmd_screen(&board),
        Commands::Cycle { temp, count } => {
            cmd_cycle(&mut board, temp, count)?;
            board.save()?;
        }
    }
    Ok(())
}

fn cmd_list(board: &SimBoard, json: bool) -> Result<(), Box<dyn Error>> {
    let infos: Vec<RegisterInfo> = board.with_env(|env| {
        (0..directory::count())
            .filter_map(directory::by_index)
            .enumerate()
            .map(|(index, reg)| RegisterInfo {
                index,
                name: reg.name,
                description: reg.description,
                writable: reg.writable,
                value: reg.read(env, 17),
            })
            .collect()
    });
    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
    } else {
        for info in infos {
            println!(
                "{:3}  {:8}  {:16}  {}  {}",
                info.index,
                info.name,
                info.description,
                if info.writable { "rw" } else { "ro" },
                info.value,
            );
        }
    }
    Ok(())
}

fn cmd_get(board: &SimBoard, name: &str) -> Result<(), Box<dyn Error>> {
    let reg = directory::by_name(name).ok_or_else(|| format!("no register named {name}"))?;
    println!("{}", board.with_env(|env| reg.read(env, 17)));
    Ok(())
}

fn cmd_set(board: &mut SimBoard, name: &str, value: &str) -> Result<(), Box<dyn Error>> {
    let reg = directory::by_name(name).ok_or_else(|| format!("no register named {name}"))?;
    reg.write(&mut board.nv, &board.telemetry, value)?;
    println!("{}", board.with_env(|env| reg.read(env, 17)));
    Ok(())
}

fn cmd_screen(board: &SimBoard) {
    let lines = board.with_env(|env| screen::home_screen(env));
    println!("+{}+", "-".repeat(screen::SCREEN_WIDTH));
    for line in lines {
        println!("|{line}|");
    }
    println!("+{}+", "-".repeat(screen::SCREEN_WIDTH));
}

fn cmd_cycle(board: &mut SimBoard, temp: Option<f64>, count: u32) -> Result<(), Box<dyn Error>> {
    for n in 1..=count {
        board.cycle(temp)?;
        let state = board.controller.state();
        let status = board.with_env(|env| directory::V0.read(env, 17));
        let alarms = board.telemetry.alarms.summary();
        println!(
            "cycle {n}: valve={status} alarms=[{alarms}] state={}",
            serde_json::to_string(state)?
        );
    }
    Ok(())
}
