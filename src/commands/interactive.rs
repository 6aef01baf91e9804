use std::io::{self, Write};

use anyhow::Result;
use rand::rngs::OsRng;

use keycraft::configtool::Config;
use keycraft::passgen::{self, GenerationSettings, Mode, UniformRandom};
use keycraft::session::GenerationTracker;
use keycraft::wordsource::{ConfiguredSource, WordSource};

use crate::GenArgs;
use crate::commands::password_gen::{copy_password, settings_from_args};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Regenerate,
    Copy,
    ToggleMode,
    ToggleUppercase,
    ToggleNumbers,
    ToggleSymbols,
    Length(usize),
    Help,
    Quit,
    Unknown(String),
}

fn parse_action(input: &str) -> Action {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("").to_ascii_lowercase();
    match command.as_str() {
        "" | "r" => Action::Regenerate,
        "c" => Action::Copy,
        "m" => Action::ToggleMode,
        "u" => Action::ToggleUppercase,
        "n" => Action::ToggleNumbers,
        "s" => Action::ToggleSymbols,
        "l" => match parts.next().and_then(|v| v.parse().ok()) {
            Some(length) => Action::Length(length),
            None => Action::Unknown(input.to_string()),
        },
        "h" | "?" => Action::Help,
        "q" => Action::Quit,
        _ => Action::Unknown(input.to_string()),
    }
}

/// Settings after `action`, or `None` when the action leaves them alone.
fn apply_action(settings: GenerationSettings, action: &Action) -> Option<GenerationSettings> {
    match action {
        Action::ToggleMode => Some(settings.with_mode(settings.mode().toggled())),
        Action::ToggleUppercase => Some(settings.with_uppercase(!settings.include_uppercase())),
        Action::ToggleNumbers => Some(settings.with_numbers(!settings.include_numbers())),
        Action::ToggleSymbols => Some(settings.with_symbols(!settings.include_symbols())),
        Action::Length(length) => settings.with_length(passgen::clamp_ui_length(*length)).ok(),
        _ => None,
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn describe(settings: &GenerationSettings) -> String {
    match settings.mode() {
        Mode::Passphrase => format!(
            "[passphrase] words: {} | numbers {} | symbols {}",
            settings.word_count(),
            on_off(settings.include_numbers()),
            on_off(settings.include_symbols()),
        ),
        Mode::Alphanumeric => format!(
            "[alphanumeric] length: {} | uppercase {} | numbers {} | symbols {}",
            settings.length(),
            on_off(settings.include_uppercase()),
            on_off(settings.include_numbers()),
            on_off(settings.include_symbols()),
        ),
    }
}

fn print_help() {
    println!("Commands: r regenerate, c copy, m toggle mode, u/n/s toggle uppercase/numbers/symbols,");
    println!("          l <N> set length, h help, q quit");
}

/// 提示用户输入，输入结束时返回 None
fn prompt_input(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

async fn regenerate<W, R>(
    tracker: &GenerationTracker,
    settings: &GenerationSettings,
    source: &W,
    rng: &mut R,
) where
    W: WordSource,
    R: UniformRandom + ?Sized,
{
    let ticket = tracker.begin();
    let password = passgen::generate(settings, source, rng).await;
    tracker.publish(ticket, password);
}

pub async fn run(args: &GenArgs, config: &Config) -> Result<()> {
    let mut settings = settings_from_args(args, config);
    let source = ConfiguredSource::from_config(config, args.offline);
    if source.is_offline() && !args.quiet {
        println!("Word service offline: passphrases use seed words only.");
    }
    let tracker = GenerationTracker::new();
    let mut rng = OsRng;

    print_help();
    regenerate(&tracker, &settings, &source, &mut rng).await;

    loop {
        println!();
        println!("{}", describe(&settings));
        println!("{}", tracker.current().unwrap_or_default());

        let Some(input) = prompt_input("> ")? else {
            break;
        };
        let action = parse_action(&input);
        match &action {
            Action::Quit => break,
            Action::Help => {
                print_help();
                continue;
            }
            Action::Copy => {
                if let Some(password) = tracker.current() {
                    copy_password(&password, config);
                }
                continue;
            }
            Action::Unknown(raw) => {
                println!("Unknown command: {} (h for help)", raw);
                continue;
            }
            _ => {}
        }

        if let Some(updated) = apply_action(settings, &action) {
            settings = updated;
        }
        regenerate(&tracker, &settings, &source, &mut rng).await;
    }
    Ok(())
}
