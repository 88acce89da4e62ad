use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use winframe::logging::init_logging;
use winframe::{
    ControlSurface, MonitorRegistry, PositioningConfig, Rect, UNIT, Window, WindowError,
};

/// Show the foreground window's position, or snap it within its monitor
#[derive(Debug, Parser)]
#[command(name = "winframe", version)]
struct Cli {
    /// What to do with the foreground window
    #[arg(value_enum, default_value_t = Action::Show)]
    action: Action,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Print absolute and normalized position
    Show,
    /// Left half of the current monitor
    Left,
    /// Right half of the current monitor
    Right,
    /// The whole current monitor
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Show,
    Snap(Rect),
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        match action {
            Action::Show => Command::Show,
            Action::Left => Command::Snap(Rect::new(0.0, 0.0, 0.5, 1.0)),
            Action::Right => Command::Snap(Rect::new(0.5, 0.0, 0.5, 1.0)),
            Action::Full => Command::Snap(UNIT),
        }
    }
}

#[cfg(windows)]
fn native_surface(config: &PositioningConfig) -> Option<Box<dyn ControlSurface>> {
    Some(Box::new(winframe::platform::win32::Win32Surface::new(config)))
}

#[cfg(not(windows))]
fn native_surface(_config: &PositioningConfig) -> Option<Box<dyn ControlSurface>> {
    None
}

fn run(
    surface: &dyn ControlSurface,
    command: Command,
    config: &PositioningConfig,
) -> Result<(), WindowError> {
    let monitors = MonitorRegistry::snapshot(surface)?;
    let window = Window::foreground(surface);

    if !window.is_valid(surface) {
        println!("No active window");
        return Ok(());
    }

    match command {
        Command::Show => {
            let title = window.title_text(surface)?;
            let position = window.position(surface)?;
            let monitor = window.containing_monitor(surface, &monitors)?;
            let unit = window.normalized_position(surface, &monitors)?;

            println!("{window}: {title:?}");
            println!(
                "  absolute:   ({}, {}) {}x{}",
                position.x, position.y, position.w, position.h
            );
            println!("  monitor:    #{}", monitor.index);
            println!(
                "  normalized: ({:.3}, {:.3}) {:.3}x{:.3}",
                unit.x, unit.y, unit.w, unit.h
            );
        }
        Command::Snap(unit) => {
            window.set_normalized_position_with(surface, &monitors, &unit, None, config.repaint)?;
            println!("{window} moved");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = match PositioningConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("winframe: {e}");
            return ExitCode::FAILURE;
        }
    };

    let command = Command::from(cli.action);

    let Some(surface) = native_surface(&config) else {
        eprintln!("winframe: no native window control surface on this platform");
        return ExitCode::FAILURE;
    };

    match run(surface.as_ref(), command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(event = "winframe.run_failed", error = %e);
            eprintln!("winframe: {e}");
            ExitCode::FAILURE
        }
    }
}
