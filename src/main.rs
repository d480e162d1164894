// Copyright (c) 2026 rezky_nightky

mod cell;
mod clock;
mod compositor;
mod config;
mod frame;
mod lightning;
mod palette;
mod rain;
mod runtime;
mod scene;
mod terminal;
#[cfg(test)]
mod testutil;

use std::env;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::builder::styling::{AnsiColor as ClapAnsiColor, Color as ClapColor};
use clap::builder::styling::{Effects as ClapEffects, Style as ClapStyle};
use clap::builder::Styles as ClapStyles;
use clap::{CommandFactory, FromArgMatches};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::clock::SystemClock;
use crate::config::{
    color_enabled_stdout, default_params_usage_for_help, print_list_colors, Args, CONTROLS,
};
use crate::palette::build_palette;
use crate::runtime::{ColorMode, Input};
use crate::scene::Scene;
use crate::terminal::{restore_terminal_best_effort, Terminal};

const TICK_INTERVAL: Duration = Duration::from_millis(15);

const HELP_TEMPLATE_PLAIN: &str = "\
{before-help}{about-with-newline}
USAGE:
  {usage}

{all-args}{after-help}";

const HELP_TEMPLATE_COLOR: &str = "\
{before-help}{about-with-newline}
\x1b[1;36mUSAGE:\x1b[0m
  {usage}

{all-args}{after-help}";

fn build_info() -> String {
    let sha = env!("TEMPEST_GIT_SHA");
    if sha.is_empty() {
        env!("TEMPEST_BUILD").to_string()
    } else {
        format!("{} ({})", env!("TEMPEST_BUILD"), sha)
    }
}

fn clap_styles() -> ClapStyles {
    ClapStyles::styled()
        .header(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))),
        )
        .usage(
            ClapStyle::new()
                .effects(ClapEffects::BOLD)
                .fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Yellow))),
        )
        .literal(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Cyan))))
        .placeholder(ClapStyle::new().fg_color(Some(ClapColor::Ansi(ClapAnsiColor::Blue))))
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> f64 {
    if !v.is_finite() {
        eprintln!("failed to apply {} {} (must be a finite number)", name, v);
        std::process::exit(1);
    }
    if v < min || v > max {
        eprintln!("failed to apply {} {} (min {} max {})", name, v, min, max);
        std::process::exit(1);
    }
    v
}

fn detect_color_mode(args: &Args) -> ColorMode {
    if let Some(m) = args.colormode {
        return match m {
            0 => ColorMode::Mono,
            8 => ColorMode::Ansi8,
            _ => {
                eprintln!("invalid --colormode: {} (allowed: 0,8)", m);
                std::process::exit(1);
            }
        };
    }

    if env::var_os("NO_COLOR").is_some() {
        return ColorMode::Mono;
    }
    let term = env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if term == "dumb" {
        return ColorMode::Mono;
    }
    ColorMode::Ansi8
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn input_for(ev: &Event) -> Option<Input> {
    match ev {
        Event::Resize(w, h) => Some(Input::Resize(*w, *h)),
        Event::Key(k) if k.kind == KeyEventKind::Press => match (k.code, k.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('q'), _) => Some(Input::Quit),
            (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            (KeyCode::Char('t'), _) | (KeyCode::Char('T'), _) => Some(Input::ToggleThunderstorm),
            _ => None,
        },
        _ => None,
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    #[cfg(unix)]
    {
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM, SIGHUP]) {
            thread::spawn(move || {
                if let Some(sig) = signals.forever().next() {
                    restore_terminal_best_effort();
                    std::process::exit(128 + sig);
                }
            });
        }
    }

    #[cfg(windows)]
    {
        if let Err(e) = ctrlc::set_handler(|| {
            restore_terminal_best_effort();
            std::process::exit(130);
        }) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }

    init_logging();

    let mut cmd = Args::command();
    cmd = cmd.styles(clap_styles());
    cmd = cmd.before_help(default_params_usage_for_help());
    let help_template = if color_enabled_stdout() {
        HELP_TEMPLATE_COLOR
    } else {
        HELP_TEMPLATE_PLAIN
    };
    cmd = cmd.help_template(help_template);
    cmd.build();

    if cmd.get_arguments().any(|a| a.get_id().as_str() == "help") {
        cmd = cmd.mut_arg("help", |a| a.help_heading("HELP"));
    }

    let matches = cmd.get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if args.list_colors {
        print_list_colors();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Copyright: (c) 2026 {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        return Ok(());
    }

    let duration_s = args.duration.and_then(|s| {
        if !s.is_finite() {
            eprintln!("failed to apply --duration {} (must be a finite number)", s);
            std::process::exit(1);
        }
        (s > 0.0).then(|| require_f64_range("--duration", s, 0.1, 86400.0))
    });

    let color_mode = detect_color_mode(&args);
    let rain_color = args.rain();
    let lightning_color = args.lightning();
    let palette = build_palette(rain_color, lightning_color, color_mode);

    let seed = args.seed.unwrap_or_else(time_seed);
    info!(
        %rain_color,
        %lightning_color,
        ?color_mode,
        seed,
        thunderstorm = args.thunderstorm,
        "configuration loaded"
    );

    if !args.no_intro {
        println!("Initializing Terminal Weather Simulation (Rain/Lightning)...");
        println!(
            "Configuration loaded: Rain color={}, Lightning color={}",
            rain_color, lightning_color
        );
        println!("{}", CONTROLS);
        thread::sleep(Duration::from_secs(1));
    }

    let mut term = Terminal::new()?;
    let (w, h) = term.size()?;

    let mut scene = Scene::new(
        StdRng::seed_from_u64(seed),
        SystemClock,
        palette,
        args.thunderstorm,
    );
    scene.apply(Input::Resize(w, h));

    let start_time = Instant::now();
    let end_time = duration_s.map(|s| start_time + Duration::from_secs_f64(s));
    let mut next_tick = Instant::now();

    while scene.is_running() {
        if end_time.is_some_and(|end| Instant::now() >= end) {
            scene.apply(Input::Quit);
            break;
        }

        loop {
            while Terminal::poll_event(Duration::ZERO)? {
                if let Some(input) = input_for(&Terminal::read_event()?) {
                    scene.apply(input);
                }
            }

            if !scene.is_running() {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                break;
            }

            let mut timeout = next_tick - now;
            if let Some(end) = end_time {
                if now >= end {
                    break;
                }
                timeout = timeout.min(end - now);
            }
            let _ = Terminal::poll_event(timeout)?;
        }

        if !scene.is_running() {
            break;
        }

        scene.tick();
        term.draw(scene.render())?;

        next_tick += TICK_INTERVAL;
        let now = Instant::now();
        if now > next_tick {
            next_tick = now;
        }
    }

    drop(term);
    let (w, h) = scene.size();
    info!(
        elapsed_s = start_time.elapsed().as_secs_f64(),
        width = w,
        height = h,
        thunderstorm = scene.is_thunderstorm(),
        drops = scene.rain().len(),
        bolts = scene.lightning().len(),
        "simulation stopped"
    );
    if !args.no_intro {
        println!("\nTerminal weather simulation process terminated.");
    }

    Ok(())
}
