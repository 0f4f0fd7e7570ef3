use std::process::ExitCode;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;

use imou_rs::constants::{MOVE_DURATION_MS, SETTLE_TIME};
use imou_rs::{Authentication, Credentials, Direction, ImouCam, Ptz, Snapshot};

/// movesnap - interactive move-and-snap control for an Imou/Easy4IP camera
#[derive(Parser)]
#[command(name = "movesnap", version, about)]
struct Cli {
    /// Application ID from the Open API console
    #[arg(long, env = "IMOU_APP_ID")]
    app_id: String,

    /// Application secret from the Open API console
    #[arg(long, env = "IMOU_APP_SECRET")]
    app_secret: String,

    /// Device serial number
    #[arg(long, env = "IMOU_DEVICE_ID")]
    device_id: String,

    /// Channel on the device
    #[arg(long, env = "IMOU_CHANNEL", default_value = "0")]
    channel: String,

    /// Seconds to wait after a move before taking a snapshot
    #[arg(long, default_value_t = SETTLE_TIME.as_secs())]
    settle_secs: u64,

    /// Milliseconds each move runs for
    #[arg(long, default_value_t = MOVE_DURATION_MS)]
    duration_ms: u64,

    /// Print the snapshot URL instead of opening a browser
    #[arg(long)]
    no_open: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "info,imou_rs=debug",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            let _ = terminal::disable_raw_mode();
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let credentials = Credentials::new(cli.app_id, cli.app_secret, cli.device_id)
        .with_channel(cli.channel.clone());
    let cam = ImouCam::new(credentials);

    tracing::info!("connecting to camera...");
    cam.authenticate().await?;

    println!("Move & Snap mode");
    println!("[w] up  [s] down  [a] left  [d] right (arrow keys work too)");
    println!("[q] or Esc to quit");

    let settle = Duration::from_secs(cli.settle_secs);
    let move_duration = Duration::from_millis(cli.duration_ms);

    terminal::enable_raw_mode()?;

    loop {
        // crossterm's poll/read block, so keep them off the runtime.
        let Some(key) = tokio::task::spawn_blocking(poll_key).await?? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            break;
        }

        let Some(direction) = direction_for_key(key.code) else {
            continue;
        };

        // Leave raw mode while printing so output lines up normally.
        terminal::disable_raw_mode()?;

        if let Err(e) = move_and_snap(&cam, direction, move_duration, settle, cli.no_open).await {
            tracing::warn!(%direction, "move-and-snap failed: {e}");
        }
        println!("-----------------------------");

        terminal::enable_raw_mode()?;
    }

    terminal::disable_raw_mode()?;
    Ok(())
}

async fn move_and_snap(
    cam: &ImouCam,
    direction: Direction,
    move_duration: Duration,
    settle: Duration,
    no_open: bool,
) -> anyhow::Result<()> {
    tracing::info!(%direction, "moving");
    cam.move_ptz(direction, move_duration).await?;

    tracing::info!("waiting {}s for the camera to settle", settle.as_secs());
    tokio::time::sleep(settle).await;

    let url = cam.snapshot().await?;
    if no_open {
        println!("snapshot: {url}");
    } else {
        tracing::info!(%url, "opening snapshot");
        webbrowser::open(&url)?;
    }

    Ok(())
}

fn poll_key() -> std::io::Result<Option<KeyEvent>> {
    if !event::poll(std::time::Duration::from_millis(100))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Char('S')), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
        assert_eq!(direction_for_key(KeyCode::Enter), None);
    }
}
