use anyhow::Context;
use clap::{Parser, Subcommand};
use spinbias::{
    config::ConfigManager,
    data::SpinLogConnector,
    engines::{simulation::WagerMetrics, AnalysisReport, SpinAnalyzer},
    types::{BetDefinition, GroupSpec, Symbol},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spinbias")]
#[command(about = "Streak, transition and wager analysis for roulette spin logs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (optional, SPINBIAS__* env vars override it)
    #[arg(short, long, default_value = "spinbias.toml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis over a spin log and print a JSON report
    Report {
        /// CSV file with a Number column
        spins: PathBuf,
    },
    /// Simulate one gap-triggered bet over a spin log
    Simulate {
        spins: PathBuf,
        /// Symbols the bet covers, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        targets: Vec<Symbol>,
        #[arg(short, long, default_value = "1.0")]
        amount: f64,
        /// Misses before betting; falls back to the config value
        #[arg(short, long)]
        gap: Option<usize>,
        #[arg(long)]
        no_martingale: bool,
    },
    /// List the configured groups
    Groups,
    /// Write the effective configuration to a file
    InitConfig { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let manager = ConfigManager::new();
    manager
        .load_layered(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let config = manager.get();

    match cli.command {
        Commands::Report { spins } => {
            let (sequence, _) = SpinLogConnector::load_sequence(&spins, config.analysis.invalid_symbols)?;
            let groups = config.groups.build_registry()?.snapshot();
            let report = AnalysisReport::build(sequence.as_slice(), &groups, &config)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Simulate {
            spins,
            targets,
            amount,
            gap,
            no_martingale,
        } => {
            let (sequence, _) = SpinLogConnector::load_sequence(&spins, config.analysis.invalid_symbols)?;
            let mut wager = config.wager.clone();
            if let Some(gap) = gap {
                wager.gap_threshold = gap;
            }
            if no_martingale {
                wager.use_martingale = false;
            }

            let bets = vec![BetDefinition::new(targets, amount)];
            let analyzer = SpinAnalyzer::new(config.analysis.clone())?;
            let outcome = analyzer.simulate(sequence.as_slice(), &bets, &wager)?;
            let metrics = WagerMetrics::calculate(&outcome);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Commands::Groups => {
            let registry = config.groups.build_registry()?;
            let specs: Vec<GroupSpec> = registry.list_groups().iter().map(GroupSpec::from).collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
        Commands::InitConfig { path } => {
            manager.save_to_file(&path)?;
            log::info!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
