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
// A password and passphrase generator written in Rust.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use keycraft::configtool::load_config;
use keycraft::passgen::Mode;
use keycraft::setclip;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "keycraft")]
#[command(about = "Generate passwords and passphrases", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a password or passphrase
    Gen(GenArgs),

    /// Keep generating: regenerate, copy and adjust settings as you go
    Interactive(GenArgs),
}

#[derive(Debug, Args)]
pub struct GenArgs {
    /// Generation mode
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Password length (8-32); passphrases use max(2, length/4) words
    #[arg(short, long)]
    pub length: Option<usize>,

    /// Exclude uppercase letters
    #[arg(long, default_value_t = false)]
    pub no_uppercase: bool,

    /// Exclude numbers
    #[arg(long, default_value_t = false)]
    pub no_numbers: bool,

    /// Include symbols
    #[arg(short, long, default_value_t = false)]
    pub symbols: bool,

    /// Copy the result to the clipboard
    #[arg(short, long, default_value_t = false)]
    pub copy: bool,

    /// Do not contact the word service
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Print only the generated value
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    // 剪贴板清理进程
    if setclip::is_daemon() {
        init_logging(false);
        setclip::run_daemon().context("Clipboard cleaner failed")?;
        return Ok(());
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config().context("Failed to load configuration")?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;

    let command = cli.command;
    runtime.block_on(async move {
        match command {
            Command::Gen(args) => commands::password_gen::generate(&args, &config).await,
            Command::Interactive(args) => commands::interactive::run(&args, &config).await,
        }
    })
}
