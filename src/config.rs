// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;

use clap::Parser;

use crate::palette::NamedColor;

pub const DEFAULT_PARAMS_USAGE: &str = "DEFAULT PARAMS USAGE:\n  tempest --rain-color cyan --lightning-color yellow";

pub const CONTROLS: &str = "Controls: 't' - Toggle thunderstorm mode, 'q'|ESC|Ctrl+C - Exit program.";

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

pub fn default_params_usage_for_help() -> String {
    if color_enabled_stdout() {
        let (head, rest) = DEFAULT_PARAMS_USAGE
            .split_once('\n')
            .unwrap_or((DEFAULT_PARAMS_USAGE, ""));
        format!("\x1b[1;36m{}\x1b[0m\n{}", head, rest)
    } else {
        DEFAULT_PARAMS_USAGE.to_string()
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "tempest", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'r',
        long = "rain-color",
        default_value = "cyan",
        help_heading = "APPEARANCE",
        help = "Color for the rain (see --list-colors)"
    )]
    pub rain_color: String,

    #[arg(
        short = 'l',
        long = "lightning-color",
        default_value = "yellow",
        help_heading = "APPEARANCE",
        help = "Color for the lightning (see --list-colors)"
    )]
    pub lightning_color: String,

    #[arg(
        long = "colormode",
        help_heading = "APPEARANCE",
        help = "Force color mode (allowed: 0,8). Default: 8 unless NO_COLOR is set or TERM=dumb"
    )]
    pub colormode: Option<u8>,

    #[arg(
        short = 't',
        long = "thunderstorm",
        help_heading = "GENERAL",
        help = "Start in thunderstorm mode"
    )]
    pub thunderstorm: bool,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the random source for a reproducible storm"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "no-intro",
        help_heading = "GENERAL",
        help = "Skip the startup banner and its one second pause"
    )]
    pub no_intro: bool,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available colors and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

impl Args {
    pub fn rain(&self) -> NamedColor {
        NamedColor::resolve("rain", &self.rain_color, NamedColor::DEFAULT_RAIN)
    }

    pub fn lightning(&self) -> NamedColor {
        NamedColor::resolve(
            "lightning",
            &self.lightning_color,
            NamedColor::DEFAULT_LIGHTNING,
        )
    }
}

pub fn print_list_colors() {
    if color_enabled_stdout() {
        println!("\x1b[1;36mAVAILABLE COLORS:\x1b[0m");
        println!("\x1b[2mNOTE: Names are case-insensitive.\x1b[0m");
    } else {
        println!("AVAILABLE COLORS:");
        println!("NOTE: Names are case-insensitive.");
    }
    println!();
    for c in NamedColor::ALL {
        let mut tags = Vec::new();
        if c == NamedColor::DEFAULT_RAIN {
            tags.push("default rain");
        }
        if c == NamedColor::DEFAULT_LIGHTNING {
            tags.push("default lightning");
        }
        if tags.is_empty() {
            println!("{}", c);
        } else {
            println!("{:<12} ({})", c.name(), tags.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_cyan_and_yellow() {
        let args = Args::try_parse_from(["tempest"]).unwrap();
        assert_eq!(args.rain(), NamedColor::Cyan);
        assert_eq!(args.lightning(), NamedColor::Yellow);
        assert!(!args.thunderstorm);
        assert!(args.seed.is_none());
    }

    #[test]
    fn bad_color_is_not_a_parse_error() {
        let args =
            Args::try_parse_from(["tempest", "-r", "teal", "--lightning-color", "RED"]).unwrap();
        assert_eq!(args.rain(), NamedColor::Cyan);
        assert_eq!(args.lightning(), NamedColor::Red);
    }

    #[test]
    fn seed_and_mode_flags_parse() {
        let args = Args::try_parse_from(["tempest", "-t", "--seed", "7", "--no-intro"]).unwrap();
        assert!(args.thunderstorm);
        assert_eq!(args.seed, Some(7));
        assert!(args.no_intro);
    }
}
