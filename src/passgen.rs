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
// Password and passphrase generator

use std::fmt;

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zxcvbn::{zxcvbn, Score};

use crate::wordsource::{self, WordSource};

// 引入编译生成的种子单词表
include!(concat!(env!("OUT_DIR"), "/seed_words.rs"));

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMBERS: &str = "0123456789";
/// Symbols eligible for the alphanumeric character pool.
pub const POOL_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
/// Symbols a passphrase may receive as its single symbol token.
pub const PASSPHRASE_SYMBOLS: &str = "!@#$%^&*";
pub const PASSPHRASE_SEPARATOR: &str = "-";

// 界面滑块的长度范围
pub const MIN_UI_LENGTH: usize = 8;
pub const MAX_UI_LENGTH: usize = 32;

/// Source of uniformly distributed indices.
///
/// Every `rand::Rng` is one, so `OsRng` works out of the box; tests plug in
/// a scripted source to make generation deterministic.
pub trait UniformRandom {
    /// Returns a uniform integer in `[0, n)`. `n` must be at least 1.
    fn next_below(&mut self, n: usize) -> usize;
}

impl<R: Rng + ?Sized> UniformRandom for R {
    fn next_below(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

// 生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Passphrase,
    #[default]
    Alphanumeric,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Passphrase => Mode::Alphanumeric,
            Mode::Alphanumeric => Mode::Passphrase,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Passphrase => write!(f, "passphrase"),
            Mode::Alphanumeric => write!(f, "alphanumeric"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

/// One snapshot of what the user asked for. A new value is built for every
/// change; generation never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    length: usize,
    include_uppercase: bool,
    include_numbers: bool,
    include_symbols: bool,
    mode: Mode,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            length: 12,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: false,
            mode: Mode::Alphanumeric,
        }
    }
}

impl GenerationSettings {
    /// Builds settings, rejecting a zero length.
    pub fn new(
        length: usize,
        include_uppercase: bool,
        include_numbers: bool,
        include_symbols: bool,
        mode: Mode,
    ) -> Result<Self, SettingsError> {
        if length == 0 {
            return Err(SettingsError::InvalidSettings("Length must be at least 1".to_string()));
        }
        Ok(Self {
            length,
            include_uppercase,
            include_numbers,
            include_symbols,
            mode,
        })
    }

    /// Builds settings the way the form does: length is clamped into the
    /// slider range instead of being rejected.
    pub fn from_ui(
        length: usize,
        include_uppercase: bool,
        include_numbers: bool,
        include_symbols: bool,
        mode: Mode,
    ) -> Self {
        Self {
            length: clamp_ui_length(length),
            include_uppercase,
            include_numbers,
            include_symbols,
            mode,
        }
    }

    pub fn length(&self) -> usize { self.length }
    pub fn include_uppercase(&self) -> bool { self.include_uppercase }
    pub fn include_numbers(&self) -> bool { self.include_numbers }
    pub fn include_symbols(&self) -> bool { self.include_symbols }
    pub fn mode(&self) -> Mode { self.mode }

    /// Passphrase word count derived from the requested length.
    pub fn word_count(&self) -> usize {
        (self.length / 4).max(2)
    }

    pub fn with_length(self, length: usize) -> Result<Self, SettingsError> {
        Self::new(length, self.include_uppercase, self.include_numbers, self.include_symbols, self.mode)
    }

    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_uppercase(self, include_uppercase: bool) -> Self {
        Self { include_uppercase, ..self }
    }

    pub fn with_numbers(self, include_numbers: bool) -> Self {
        Self { include_numbers, ..self }
    }

    pub fn with_symbols(self, include_symbols: bool) -> Self {
        Self { include_symbols, ..self }
    }

    pub fn password_options(&self) -> PasswordOptions {
        PasswordOptions {
            length: self.length,
            include_uppercase: self.include_uppercase,
            include_numbers: self.include_numbers,
            include_symbols: self.include_symbols,
        }
    }

    pub fn passphrase_options(&self) -> PassphraseOptions {
        PassphraseOptions {
            word_count: self.word_count(),
            include_numbers: self.include_numbers,
            include_symbols: self.include_symbols,
        }
    }
}

pub fn clamp_ui_length(length: usize) -> usize {
    length.clamp(MIN_UI_LENGTH, MAX_UI_LENGTH)
}

// 随机密码生成选项，小写字母始终包含
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub include_uppercase: bool,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 12,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: false,
        }
    }
}

// 记忆密码生成选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassphraseOptions {
    pub word_count: usize,
    pub include_numbers: bool,
    pub include_symbols: bool,
}

impl Default for PassphraseOptions {
    fn default() -> Self {
        Self {
            word_count: 4,
            include_numbers: true,
            include_symbols: false,
        }
    }
}

/// Characters eligible for sampling: lowercase first, then uppercase,
/// digits and symbols when enabled. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    chars: Vec<char>,
}

impl CharacterPool {
    pub fn new(include_uppercase: bool, include_numbers: bool, include_symbols: bool) -> Self {
        let mut char_pool = String::from(LOWERCASE);
        if include_uppercase { char_pool.push_str(UPPERCASE); }
        if include_numbers { char_pool.push_str(NUMBERS); }
        if include_symbols { char_pool.push_str(POOL_SYMBOLS); }
        Self { chars: char_pool.chars().collect() }
    }

    pub fn for_options(options: &PasswordOptions) -> Self {
        Self::new(options.include_uppercase, options.include_numbers, options.include_symbols)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

/// Builds a password of exactly `options.length` characters, each drawn
/// independently from the character pool. A zero length gives an empty
/// string.
pub fn generate_password<R>(options: &PasswordOptions, rng: &mut R) -> String
where
    R: UniformRandom + ?Sized,
{
    let pool = CharacterPool::for_options(options);
    (0..options.length)
        .map(|_| *pick(pool.as_slice(), rng))
        .collect()
}

/// Builds a hyphen-joined passphrase of capitalized words, plus one digit
/// and/or one symbol token, in shuffled order.
///
/// Each word is resolved through `source` one after another. Lookup
/// failures fall back to the seed word, so this never fails. A word count
/// of zero is treated as one.
pub async fn generate_passphrase<W, R>(options: &PassphraseOptions, source: &W, rng: &mut R) -> String
where
    W: WordSource,
    R: UniformRandom + ?Sized,
{
    let word_count = options.word_count.max(1);
    let mut tokens = Vec::with_capacity(word_count + 2);

    for _ in 0..word_count {
        let seed = *pick(&SEED_WORDS, rng);
        let word = wordsource::lookup(source, seed, rng).await;
        tokens.push(capitalize(&word));
    }

    // 数字和符号各作为独立的片段
    if options.include_numbers {
        tokens.push(pick_char(NUMBERS, rng).to_string());
    }
    if options.include_symbols {
        tokens.push(pick_char(PASSPHRASE_SYMBOLS, rng).to_string());
    }

    shuffle(&mut tokens, rng);

    tokens.join(PASSPHRASE_SEPARATOR)
}

/// Runs whichever generator `settings.mode()` selects.
pub async fn generate<W, R>(settings: &GenerationSettings, source: &W, rng: &mut R) -> String
where
    W: WordSource,
    R: UniformRandom + ?Sized,
{
    log::debug!("Generating {} value, length {}", settings.mode(), settings.length());
    match settings.mode() {
        Mode::Passphrase => generate_passphrase(&settings.passphrase_options(), source, rng).await,
        Mode::Alphanumeric => generate_password(&settings.password_options(), rng),
    }
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// In-place Fisher-Yates shuffle, walking from the last index down to 1.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: UniformRandom + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

fn pick<'a, T, R>(items: &'a [T], rng: &mut R) -> &'a T
where
    R: UniformRandom + ?Sized,
{
    &items[rng.next_below(items.len())]
}

fn pick_char<R>(set: &str, rng: &mut R) -> char
where
    R: UniformRandom + ?Sized,
{
    let chars: Vec<char> = set.chars().collect();
    *pick(&chars, rng)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    pub rating: String,
    pub score: u8,
    pub feedback: String,
}

pub fn assess_password_strength(password: &str) -> StrengthReport {
    let strength_result = zxcvbn(password, &[]);
    let score = strength_result.score();
    let feedback = strength_result.feedback().map_or_else(
        String::new,
        |f| f.suggestions().iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ")
    );

    // 确定安全评级
    let rating = match score {
        Score::Zero => "Very weak",
        Score::One => "Weak",
        Score::Two => "Fair",
        Score::Three => "Strong",
        Score::Four => "Very strong",
        _ => "Unknown",
    }.to_string();

    StrengthReport { rating, score: score as u8, feedback }
}
