use clap::Parser;
use clap::Subcommand;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// List connected controllers.
    List {
        /// List the built-in virtual X52 Pro instead of real devices
        #[clap(long = "virtual")]
        virtual_device: bool,
    },
    /// Poll a controller in the foreground until interrupted.
    Run {
        /// The profile to run
        #[clap(short, long)]
        profile: Option<String>,
        /// Device index, overrides the profile
        #[clap(short, long)]
        device: Option<u32>,
        /// Drive a virtual X52 Pro with a scripted sweep
        #[clap(long = "virtual")]
        virtual_device: bool,
    },
}

/// Reads a Saitek/Logitech X52 Pro HOTAS and reports normalized readings.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}
