//  _  __           ____            __ _
// | |/ /___ _   _ / ___|_ __ __ _ / _| |_
// | ' // _ \ | | | |   | '__/ _` | |_| __|
// | . \  __/ |_| | |___| | | (_| |  _| |_
// |_|\_\___|\__, |\____|_|  \__,_|_|  \__|
//           |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Clipboard handler

use arboard::Clipboard;
use std::{env, process, thread, time::Duration};
use thiserror::Error;

const DAEMON_ENV: &str = "KEYCRAFT_CLIPBOARD_DAEMON";
const SECRET_ENV: &str = "KEYCRAFT_CLIPBOARD_SECRET";
const DELAY_ENV: &str = "KEYCRAFT_CLIPBOARD_DELAY";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Failed to start clipboard cleaner: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Clipboard cleaner started without {0}")]
    MissingEnv(&'static str),
}

/// Whether this process was started as the delayed clipboard cleaner.
pub fn is_daemon() -> bool {
    env::var(DAEMON_ENV).is_ok()
}

fn spawn_daemon(secret: &str, delay: u64) -> Result<(), ClipboardError> {
    let exe_path = env::current_exe()?;
    let mut cmd = process::Command::new(exe_path);
    cmd.env(DAEMON_ENV, "1")
       .env(SECRET_ENV, secret)
       .env(DELAY_ENV, delay.to_string())
       .stdin(process::Stdio::null())
       .stdout(process::Stdio::null())
       .stderr(process::Stdio::inherit());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        cmd.creation_flags(0x08000000); // CREATE_NO_WINDOW
    }

    cmd.spawn()?;
    Ok(())
}

/// Only clear what we put there ourselves.
pub fn should_clear(current: &str, secret: &str) -> bool {
    current == secret
}

/// Body of the cleaner process: waits, then clears the clipboard if it
/// still holds the copied value.
pub fn run_daemon() -> Result<(), ClipboardError> {
    let secret = env::var(SECRET_ENV).map_err(|_| ClipboardError::MissingEnv(SECRET_ENV))?;
    let delay: u64 = env::var(DELAY_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .ok_or(ClipboardError::MissingEnv(DELAY_ENV))?;

    thread::sleep(Duration::from_secs(delay));

    let mut ctx = Clipboard::new()?;
    let current_content = ctx.get_text().unwrap_or_default();

    if should_clear(&current_content, &secret) {
        ctx.set_text("")?;
        log::info!("Clipboard still held the generated value, cleared");
    } else {
        log::info!("Clipboard changed since copy, left untouched");
    }

    Ok(())
}

/// Copies `secret` to the clipboard. With `clear_after` above zero a
/// detached cleaner wipes it after that many seconds.
pub fn copy_to_clipboard(secret: &str, clear_after: u64) -> Result<(), ClipboardError> {
    let mut ctx = Clipboard::new()?;
    ctx.set_text(secret)?;
    if clear_after > 0 {
        spawn_daemon(secret, clear_after)?;
    }
    Ok(())
}
