use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::trace;

use buchi_automata::read_ba_pair;
use buchi_inclusion::is_included;
use buchi_utilities::BuchiError;
use buchi_utilities::Timing;

use crate::verbosity::DebugFlag;

mod verbosity;

#[derive(clap::Parser, Debug)]
#[command(
    name = "buchi-inclusion",
    about = "Checks whether the language of the first Büchi automaton is included in the language of the second"
)]
struct Cli {
    #[command(flatten)]
    debug: DebugFlag,

    #[arg(short = 'a', long, value_parser = parse_ba_path, help = "The first automaton, in the BA format")]
    first: PathBuf,

    #[arg(short = 'b', long, value_parser = parse_ba_path, help = "The second automaton, in the BA format")]
    second: PathBuf,

    #[arg(long, help = "Print the time spent in the different phases")]
    timings: bool,
}

/// Accepts only paths with the `.ba` extension.
fn parse_ba_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.extension().is_some_and(|extension| extension == "ba") {
        Ok(path)
    } else {
        Err(format!("{value} is not a file with the .ba extension"))
    }
}

fn main() -> Result<ExitCode, BuchiError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.debug.log_level_filter())
        .parse_default_env()
        .init();

    let timing = Timing::new();

    let mut read_timer = timing.start("read");
    let (first, second) = read_ba_pair(&cli.first, &cli.second)?;
    read_timer.finish();
    trace!("{first:?}\n{second:?}");

    let mut inclusion_timer = timing.start("inclusion");
    let result = is_included(&first, &second, &timing);
    inclusion_timer.finish();

    if cli.debug.print_statistics() {
        println!("{}", result.statistics);
    }

    println!("Inclusion holds: {}", result.included);
    println!("Time: {:.3}s", result.statistics.elapsed.as_secs_f64());

    if cli.timings {
        timing.print();
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test_case("a.ba", true ; "ba extension")]
    #[test_case("dir/b.ba", true ; "nested path")]
    #[test_case("a.aut", false ; "other extension")]
    #[test_case("ba", false ; "no extension")]
    fn test_parse_ba_path(value: &str, accepted: bool) {
        assert_eq!(parse_ba_path(value).is_ok(), accepted);
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["buchi-inclusion", "-a", "first.ba", "-b", "second.ba", "-d", "2"]).unwrap();
        assert_eq!(cli.first, PathBuf::from("first.ba"));
        assert!(cli.debug.print_statistics());
        assert!(!cli.timings);

        assert!(Cli::try_parse_from(["buchi-inclusion", "-a", "first.ba"]).is_err());
        assert!(Cli::try_parse_from(["buchi-inclusion", "-a", "first.ba", "-b", "second.ba", "-d", "4"]).is_err());
        assert!(Cli::try_parse_from(["buchi-inclusion", "-a", "first.txt", "-b", "second.ba"]).is_err());
    }
}
