use imou_rs::{Authentication, Credentials, Direction, ImouCam, Ptz, Snapshot};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <AppId> <AppSecret> <DeviceId>", args[0]);
        return Ok(());
    }

    let cam = ImouCam::new(Credentials::new(&args[1], &args[2], &args[3]));
    cam.authenticate().await?;

    println!("Performing PTZ operations...");

    println!("Stepping Left...");
    cam.move_step(Direction::Left).await?;
    tokio::time::sleep(Duration::from_secs(4)).await;

    println!("Stepping Right...");
    cam.move_step(Direction::Right).await?;
    tokio::time::sleep(Duration::from_secs(4)).await;

    println!("Panning Up for 2 seconds...");
    cam.move_ptz(Direction::Up, Duration::from_secs(2)).await?;
    tokio::time::sleep(Duration::from_secs(4)).await;

    let url = cam.snapshot().await?;
    println!("Snapshot: {url}");

    println!("Done.");
    Ok(())
}
