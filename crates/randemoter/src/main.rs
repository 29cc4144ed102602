use std::panic::{self, AssertUnwindSafe};
use std::process;

use anyhow::Result;
use clap::Parser;
use emoji_logging::{emoji_error, LevelFilter, LogDestination};
use randemoter::{generate, RandomEmojiSource};

const FAULT_EXIT_CODE: i32 = 100;

/// Produces a given number of cryptographically random emojis.
///
/// Annoy or communicate with your kids with whatever emojis this thing spits out!
#[derive(Parser, Debug)]
#[command(name = "randemoter", author, version, about)]
struct Cli {
    /// Number of emojis to generate
    #[arg(short = 'n', long = "num", default_value_t = 10)]
    num: usize,
}

fn run(cli: &Cli) -> Result<()> {
    let mut source = RandomEmojiSource::new();
    println!("{}", generate(&mut source, cli.num));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    emoji_logging::initialize(LogDestination::Terminal, LevelFilter::Warn);

    match panic::catch_unwind(AssertUnwindSafe(|| run(&cli))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            emoji_error!("{err:#}");
            process::exit(1);
        }
        Err(payload) => {
            emoji_error!("Recovered fault: {}", panic_message(payload.as_ref()));
            process::exit(FAULT_EXIT_CODE);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_defaults_to_ten() {
        let cli = Cli::try_parse_from(["randemoter"]).unwrap();
        assert_eq!(cli.num, 10);
    }

    #[test]
    fn num_accepts_short_and_long_forms() {
        assert_eq!(Cli::try_parse_from(["randemoter", "-n", "3"]).unwrap().num, 3);
        assert_eq!(Cli::try_parse_from(["randemoter", "--num", "0"]).unwrap().num, 0);
    }

    #[test]
    fn negative_num_is_a_usage_error() {
        assert!(Cli::try_parse_from(["randemoter", "--num", "-1"]).is_err());
    }

    #[test]
    fn panic_message_reads_common_payloads() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&42u8), "unknown panic payload");
    }
}
