use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use keycraft::passgen::*;
use keycraft::wordsource::{OfflineWords, WordSource, WordSourceError};
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;

/// Replays a fixed list of indices, then keeps returning 0.
struct Scripted {
    values: VecDeque<usize>,
}

impl Scripted {
    fn new(values: &[usize]) -> Self {
        Self { values: values.iter().copied().collect() }
    }
}

impl UniformRandom for Scripted {
    fn next_below(&mut self, n: usize) -> usize {
        let value = self.values.pop_front().unwrap_or(0);
        assert!(value < n, "scripted value {} out of range 0..{}", value, n);
        value
    }
}

struct FailingSource {
    calls: AtomicUsize,
}

impl WordSource for FailingSource {
    async fn synonyms(&self, _seed: &str) -> Result<Vec<String>, WordSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(WordSourceError::Status(503))
    }
}

struct EchoSource;

impl WordSource for EchoSource {
    async fn synonyms(&self, seed: &str) -> Result<Vec<String>, WordSourceError> {
        Ok(vec![seed.to_string()])
    }
}

struct FixedSynonyms(Vec<&'static str>);

impl WordSource for FixedSynonyms {
    async fn synonyms(&self, _seed: &str) -> Result<Vec<String>, WordSourceError> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

fn is_capitalized_seed(token: &str) -> bool {
    SEED_WORDS.iter().any(|seed| capitalize(seed) == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_words_compiled_in() {
        assert_eq!(
            SEED_WORDS,
            ["happy", "strong", "bright", "quick", "calm", "brave", "wise", "kind", "free", "pure"]
        );
    }

    #[test]
    fn test_character_pool_order() {
        let pool = CharacterPool::new(true, true, false);
        assert_eq!(pool.len(), 62);
        assert_eq!(pool.as_slice()[0], 'a');
        assert_eq!(pool.as_slice()[26], 'A');
        assert_eq!(pool.as_slice()[52], '0');
        assert!(!pool.contains('!'));

        let full = CharacterPool::new(true, true, true);
        assert_eq!(full.len(), 88);
        assert_eq!(*full.as_slice().last().unwrap(), '?');
    }

    #[test]
    fn test_character_pool_always_has_lowercase() {
        let pool = CharacterPool::new(false, false, false);
        assert!(!pool.is_empty());
        assert_eq!(pool.as_slice().iter().collect::<String>(), LOWERCASE);
    }

    #[test]
    fn test_generate_password_length_and_pool() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for &(upper, numbers, symbols) in &[
            (false, false, false),
            (true, false, false),
            (true, true, false),
            (false, true, true),
            (true, true, true),
        ] {
            let options = PasswordOptions {
                length: 32,
                include_uppercase: upper,
                include_numbers: numbers,
                include_symbols: symbols,
            };
            let pool = CharacterPool::for_options(&options);
            let password = generate_password(&options, &mut rng);
            assert_eq!(password.chars().count(), 32);
            assert!(password.chars().all(|c| pool.contains(c)));
        }
    }

    #[test]
    fn test_generate_password_lowercase_only() {
        let options = PasswordOptions {
            length: 64,
            include_uppercase: false,
            include_numbers: false,
            include_symbols: false,
        };
        let password = generate_password(&options, &mut OsRng);
        assert!(password.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_password_without_symbols() {
        let options = PasswordOptions { length: 200, ..Default::default() };
        let password = generate_password(&options, &mut OsRng);
        assert!(!password.chars().any(|c| POOL_SYMBOLS.contains(c)));
    }

    #[test]
    fn test_generate_password_index_zero() {
        let options = PasswordOptions {
            length: 12,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: false,
        };
        let password = generate_password(&options, &mut Scripted::new(&[]));
        assert_eq!(password, "aaaaaaaaaaaa");
    }

    #[test]
    fn test_generate_password_last_index() {
        let options = PasswordOptions {
            length: 2,
            include_uppercase: true,
            include_numbers: true,
            include_symbols: true,
        };
        let password = generate_password(&options, &mut Scripted::new(&[87, 52]));
        assert_eq!(password, "?0");
    }

    #[test]
    fn test_generate_password_zero_length() {
        let options = PasswordOptions { length: 0, ..Default::default() };
        assert_eq!(generate_password(&options, &mut OsRng), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("happy"), "Happy");
        assert_eq!(capitalize("in high spirits"), "In high spirits");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize("Already"), "Already");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_shuffle_keeps_every_item() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let original: Vec<u32> = (0..50).collect();
        let mut shuffled = original.clone();
        shuffle(&mut shuffled, &mut rng);
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, original);
    }

    #[test]
    fn test_shuffle_follows_fisher_yates_steps() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        // i=3 -> j=0, i=2 -> j=2, i=1 -> j=0
        shuffle(&mut items, &mut Scripted::new(&[0, 2, 0]));
        assert_eq!(items, vec!['b', 'd', 'c', 'a']);
    }

    #[tokio::test]
    async fn test_passphrase_failing_source_uses_seed_words() {
        let source = FailingSource { calls: AtomicUsize::new(0) };
        let options = PassphraseOptions {
            word_count: 4,
            include_numbers: true,
            include_symbols: true,
        };
        let passphrase = generate_passphrase(&options, &source, &mut OsRng).await;
        let tokens: Vec<&str> = passphrase.split('-').collect();

        assert_eq!(tokens.len(), 6);
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
        assert_eq!(tokens.iter().filter(|t| is_capitalized_seed(t)).count(), 4);
        assert_eq!(
            tokens.iter().filter(|t| t.len() == 1 && t.chars().all(|c| c.is_ascii_digit())).count(),
            1
        );
        assert_eq!(
            tokens.iter().filter(|t| t.len() == 1 && PASSPHRASE_SYMBOLS.contains(**t)).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_passphrase_token_count_per_flags() {
        for &(numbers, symbols) in &[(false, false), (true, false), (false, true), (true, true)] {
            let options = PassphraseOptions {
                word_count: 3,
                include_numbers: numbers,
                include_symbols: symbols,
            };
            let passphrase = generate_passphrase(&options, &OfflineWords, &mut OsRng).await;
            let expected = 3 + usize::from(numbers) + usize::from(symbols);
            assert_eq!(passphrase.split('-').count(), expected);
        }
    }

    #[tokio::test]
    async fn test_passphrase_scripted_order() {
        let options = PassphraseOptions {
            word_count: 3,
            include_numbers: true,
            include_symbols: true,
        };
        // seeds happy/strong/bright, digit 7, symbol '$', then shuffle picks
        let mut rng = Scripted::new(&[0, 1, 2, 7, 3, 0, 1, 2, 0]);
        let passphrase = generate_passphrase(&options, &OfflineWords, &mut rng).await;
        assert_eq!(passphrase, "7-$-Bright-Strong-Happy");
    }

    #[tokio::test]
    async fn test_passphrase_two_words_echo_source() {
        let options = PassphraseOptions {
            word_count: 2,
            include_numbers: false,
            include_symbols: false,
        };
        let passphrase = generate_passphrase(&options, &EchoSource, &mut OsRng).await;
        let tokens: Vec<&str> = passphrase.split('-').collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.iter().all(|t| is_capitalized_seed(t)));
    }

    #[tokio::test]
    async fn test_passphrase_uses_chosen_synonym() {
        let options = PassphraseOptions {
            word_count: 1,
            include_numbers: false,
            include_symbols: false,
        };
        let source = FixedSynonyms(vec!["serene", "tranquil"]);
        // seed index, then synonym index
        let passphrase = generate_passphrase(&options, &source, &mut Scripted::new(&[4, 1])).await;
        assert_eq!(passphrase, "Tranquil");
    }

    #[tokio::test]
    async fn test_passphrase_zero_words_treated_as_one() {
        let options = PassphraseOptions {
            word_count: 0,
            include_numbers: false,
            include_symbols: false,
        };
        let passphrase = generate_passphrase(&options, &OfflineWords, &mut OsRng).await;
        assert!(is_capitalized_seed(&passphrase));
    }

    #[test]
    fn test_settings_reject_zero_length() {
        let result = GenerationSettings::new(0, true, true, false, Mode::Alphanumeric);
        assert!(matches!(result, Err(SettingsError::InvalidSettings(_))));
        assert!(GenerationSettings::new(1, false, false, false, Mode::Alphanumeric).is_ok());
    }

    #[test]
    fn test_settings_from_ui_clamps_length() {
        assert_eq!(GenerationSettings::from_ui(3, true, true, false, Mode::Alphanumeric).length(), 8);
        assert_eq!(GenerationSettings::from_ui(50, true, true, false, Mode::Alphanumeric).length(), 32);
        assert_eq!(GenerationSettings::from_ui(20, true, true, false, Mode::Alphanumeric).length(), 20);
    }

    #[test]
    fn test_settings_word_count() {
        let words = |length| {
            GenerationSettings::new(length, true, true, false, Mode::Passphrase)
                .unwrap()
                .word_count()
        };
        assert_eq!(words(4), 2);
        assert_eq!(words(8), 2);
        assert_eq!(words(12), 3);
        assert_eq!(words(15), 3);
        assert_eq!(words(32), 8);
    }

    #[test]
    fn test_settings_default_matches_form() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.length(), 12);
        assert!(settings.include_uppercase());
        assert!(settings.include_numbers());
        assert!(!settings.include_symbols());
        assert_eq!(settings.mode(), Mode::Alphanumeric);
    }

    #[tokio::test]
    async fn test_generate_dispatches_on_mode() {
        let settings = GenerationSettings::new(16, true, true, false, Mode::Alphanumeric).unwrap();
        let password = generate(&settings, &OfflineWords, &mut OsRng).await;
        assert_eq!(password.chars().count(), 16);
        assert!(!password.contains('-'));

        let passphrase_settings = settings.with_mode(Mode::Passphrase);
        let passphrase = generate(&passphrase_settings, &OfflineWords, &mut OsRng).await;
        assert_eq!(passphrase.split('-').count(), 4 + 1);
    }

    #[test]
    fn test_assess_password_strength() {
        let weak = assess_password_strength("password");
        assert!(weak.score <= 1);

        let strong = assess_password_strength("q7#Vt!9zLw@2mXp$Rk8&");
        assert!(strong.score >= 3);
        assert!(!strong.rating.is_empty());
    }
}
