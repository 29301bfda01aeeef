use std::io;

use anyhow::Result;
use thousands::Separable;
use tracing::info;

use mazechase::app::App;
use mazechase::audio::Audio;
use mazechase::config::load_config;
use mazechase::logging::setup_logging;
use mazechase::scores::{load_entries, sort_leaderboard, ScoreStore};
use mazechase::sinks::Sinks;
use mazechase::terminal::TerminalRenderer;

fn print_leaderboard(path: &std::path::Path) -> Result<()> {
    let mut entries = load_entries(path)?;
    sort_leaderboard(&mut entries);
    if entries.is_empty() {
        println!("No scores recorded yet.");
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {:<20} {:>10}",
            rank + 1,
            entry.player_name,
            entry.high_score.separate_with_commas()
        );
    }
    Ok(())
}

/// Command-line switches.
#[derive(Debug, Default, PartialEq, Eq)]
struct Flags {
    /// Print the leaderboard and exit.
    scores: bool,
    /// Zero the configured player's best before playing.
    reset_score: bool,
}

impl Flags {
    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut flags = Self::default();
        for arg in args {
            match arg.as_str() {
                "--scores" => flags.scores = true,
                "--reset-score" => flags.reset_score = true,
                _ => {}
            }
        }
        flags
    }
}

pub fn main() -> Result<()> {
    let config = load_config()?;
    let flags = Flags::parse(std::env::args().skip(1));

    if flags.scores {
        return print_leaderboard(&config.score_file);
    }

    setup_logging(&config)?;
    info!(player = %config.player_name, "Loaded configuration");

    let mut scores = ScoreStore::open(&config.score_file, config.player_name.clone())?;
    if flags.reset_score {
        scores.reset_player(&config.player_name);
        info!(player = %config.player_name, "Best score reset");
    }
    let sinks = Sinks {
        render: Box::new(TerminalRenderer::new(io::stdout())),
        audio: Box::new(Audio::new()),
        scores: Box::new(scores),
    };

    let mut app = App::new(config, sinks)?;
    loop {
        if !app.run() {
            break;
        }
    }

    info!(score = app.game().score(), outcome = ?app.game().outcome(), "Session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Flags {
        Flags::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_no_flags() {
        assert_eq!(parse(&[]), Flags::default());
    }

    #[test]
    fn test_recognized_flags() {
        assert_eq!(
            parse(&["--reset-score"]),
            Flags {
                scores: false,
                reset_score: true,
            }
        );
        assert_eq!(
            parse(&["--scores", "--bogus", "--reset-score"]),
            Flags {
                scores: true,
                reset_score: true,
            }
        );
    }
}
