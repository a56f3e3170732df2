use std::io;
use std::process::{ExitStatus, Stdio};

use recyclo_core::{
    directions::{Platform, directions_url, web_url},
    model::RecyclingCenter,
};
use tokio::{process::Command, task::JoinHandle};
use tracing::{debug, info, warn};

/// Hand directions to `center` to the platform's map application.
///
/// Falls back to the web maps link if the native link cannot be opened.
pub(crate) fn open_directions(center: &RecyclingCenter) {
    let platform = Platform::current();
    let native = directions_url(platform, center.location, &center.name);

    match native.map(|url| launch(url.as_str())) {
        Ok(Ok(())) => {
            info!(place = %center.id, "opened directions");
            return;
        }
        Ok(Err(err)) => warn!(error = %err, "native maps link failed, trying web"),
        Err(err) => warn!(error = %err, "could not build maps link, trying web"),
    }

    if platform == Platform::Web {
        return;
    }
    match web_url(center.location).map(|url| launch(url.as_str())) {
        Ok(Ok(())) => info!(place = %center.id, "opened web directions"),
        Ok(Err(err)) => warn!(error = %err, "could not open web maps"),
        Err(err) => warn!(error = %err, "could not build web maps link"),
    }
}

fn launch(target: &str) -> io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    command.arg(target);

    spawn_reaped(command).map(drop)
}

/// Start `command` detached from the terminal and wait for it in the background.
///
/// The opener exits right after handing the link over; waiting collects its
/// exit status so no zombie is left behind.
fn spawn_reaped(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(tokio::spawn(async move {
        let status = child.wait().await;
        match &status {
            Ok(status) if status.success() => debug!(%status, "opener exited"),
            Ok(status) => warn!(%status, "opener exited with failure"),
            Err(err) => warn!(error = %err, "could not wait for opener"),
        }
        status
    }))
}
