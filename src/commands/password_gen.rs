use anyhow::Result;
use rand::rngs::OsRng;

use keycraft::configtool::Config;
use keycraft::passgen::{self, GenerationSettings, MAX_UI_LENGTH, MIN_UI_LENGTH};
use keycraft::setclip;
use keycraft::wordsource::ConfiguredSource;

use crate::GenArgs;

pub fn settings_from_args(args: &GenArgs, config: &Config) -> GenerationSettings {
    let requested = args.length.unwrap_or(config.default_length);
    let length = passgen::clamp_ui_length(requested);
    if length != requested {
        log::warn!(
            "Length {} is outside {}..={}, using {}",
            requested, MIN_UI_LENGTH, MAX_UI_LENGTH, length
        );
    }
    GenerationSettings::from_ui(
        length,
        !args.no_uppercase,
        !args.no_numbers,
        args.symbols,
        args.mode.unwrap_or(config.default_mode),
    )
}

pub async fn generate(args: &GenArgs, config: &Config) -> Result<()> {
    let settings = settings_from_args(args, config);
    let source = ConfiguredSource::from_config(config, args.offline);
    let password = passgen::generate(&settings, &source, &mut OsRng).await;

    if args.quiet {
        println!("{}", password);
    } else {
        println!("Generated {}: {}", settings.mode(), password);
        display_password_strength(&password);
    }

    if args.copy {
        copy_password(&password, config);
    }
    Ok(())
}

pub fn display_password_strength(password: &str) {
    let report = passgen::assess_password_strength(password);
    println!("Password strength: {} (score: {}/4)", report.rating, report.score);
    if !report.feedback.is_empty() {
        println!("Suggestions: {}", report.feedback);
    }
}

/// Clipboard failures are logged and otherwise ignored.
pub fn copy_password(password: &str, config: &Config) -> bool {
    match setclip::copy_to_clipboard(password, config.clipboard_clear_secs) {
        Ok(()) => {
            if config.clipboard_clear_secs > 0 {
                println!("Copied to clipboard, clearing in {}s.", config.clipboard_clear_secs);
            } else {
                println!("Copied to clipboard.");
            }
            true
        }
        Err(e) => {
            log::error!("Failed to copy password: {}", e);
            false
        }
    }
}
