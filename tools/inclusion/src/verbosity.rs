use clap::Args;
use log::LevelFilter;

#[derive(Args, Debug)]
pub struct DebugFlag {
    #[arg(
        short,
        long,
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=3),
        help = "Set the debug level, from 0 (quiet) to 3 (dump every vector)"
    )]
    debug: u8,
}

impl DebugFlag {
    /// Returns the log level filter corresponding to the debug level.
    pub fn log_level_filter(&self) -> LevelFilter {
        Verbosity::from(self).log_level_filter()
    }

    /// Returns true iff the summary statistics should be printed.
    pub fn print_statistics(&self) -> bool {
        !matches!(Verbosity::from(self), Verbosity::Quiet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    /// Returns the log filter level corresponding to this verbosity, warnings are always shown.
    fn log_level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

impl From<&DebugFlag> for Verbosity {
    fn from(flag: &DebugFlag) -> Self {
        match flag.debug {
            0 => Verbosity::Quiet,
            1 => Verbosity::Verbose,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}
