use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use poker_arena::agents::{Agent, CallingStation, FoldsWhenLosing, KellyStrategy, RandomAgent};
use poker_arena::game::Game;
use poker_arena::rules::Rules;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Bot {
    Caller,
    Random,
    Cautious,
    FoldsWhenLosing,
    Kelly,
}

#[derive(Debug, Parser)]
#[clap(version, about = "Play a game of hold'em between built-in agents")]
struct Cli {
    /// Agents to seat, in seat order.
    #[clap(long, short, value_enum, num_args = 2.., default_values_t = [Bot::Caller, Bot::Random, Bot::FoldsWhenLosing])]
    agents: Vec<Bot>,
    /// Maximum number of rounds.
    #[clap(long, short, default_value_t = 100)]
    rounds: usize,
    /// Seed for shuffles and random agents.
    #[clap(long, short, default_value_t = 0)]
    seed: u64,
    /// JSON rules document; defaults apply to missing fields.
    #[clap(long)]
    rules: Option<PathBuf>,
    /// Tournament identifier stored in the log.
    #[clap(long, default_value = "none")]
    tournament_id: String,
    /// Where to write the game log, stdout when omitted.
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn build_agent(bot: Bot, seed: u64) -> Box<dyn Agent> {
    match bot {
        Bot::Caller => Box::new(CallingStation::new()),
        Bot::Random => Box::new(RandomAgent::new(Some(seed))),
        Bot::Cautious => Box::new(RandomAgent::cautious(Some(seed))),
        Bot::FoldsWhenLosing => Box::new(FoldsWhenLosing::new(Some(seed))),
        Bot::Kelly => Box::new(KellyStrategy::new(Some(seed))),
    }
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let rules = match &cli.rules {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading rules from {}", path.display()))?;
            Rules::from_json(&text)?
        }
        None => Rules::default(),
    };
    if cli.agents.len() < 2 {
        bail!("at least two agents are needed");
    }

    let agents = cli
        .agents
        .iter()
        .enumerate()
        .map(|(i, &bot)| build_agent(bot, cli.seed.wrapping_add(i as u64)))
        .collect();
    let mut game = Game::new(rules, agents, cli.seed)?.with_tournament_id(cli.tournament_id);
    let record = game.play(cli.rounds)?;

    for (seat, player) in game.players().iter().enumerate() {
        info!("seat {seat} ({}): {} chips", record.agents[seat], player.stack());
    }

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            record.write_json(BufWriter::new(file))?;
        }
        None => record.write_json(io::stdout().lock())?,
    }
    Ok(())
}
