use imou_rs::{Authentication, Credentials, DeviceInfo, ImouCam};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        println!("Usage: {} <AppId> <AppSecret> <DeviceId>", args[0]);
        return Ok(());
    }

    let cam = ImouCam::new(Credentials::new(&args[1], &args[2], &args[3]));
    cam.authenticate().await?;

    if cam.device_online().await? {
        println!("Device is online.");
        let version = cam.device_version().await?;
        println!("Version info: {version}");
    } else {
        println!("Device is offline.");
    }

    Ok(())
}
