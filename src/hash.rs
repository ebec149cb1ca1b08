// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

// Logistic-map digest. Not a secure hash. The same string must give the same
// digits on every platform, so all math stays in f64.

/// Logistic map growth rate, just past the onset of chaos.
pub const CHAOS_RATE: f64 = 3.569956786876;
pub const CHAOS_ITERATIONS: usize = 100;

/// Digests are padded to at least this many characters.
pub const MIN_DIGEST_LEN: usize = 13;

const DIGEST_START: usize = 4;
const DIGEST_END: usize = 21;
const FILLER_POS: usize = 5;
const DEFAULT_FILLER: char = '0';

const LETTERS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
pub const LETTER_CODE_LEN: usize = 6;

/// Iterates the logistic map 100 times starting from `1 / n`.
///
/// `n == 0` starts from infinity and settles on `-inf`; callers never pass it.
pub fn chaos_hash(n: f64) -> f64 {
    let mut a = 1.0 / n;
    for _ in 0..CHAOS_ITERATIONS {
        a = (1.0 - a) * a * CHAOS_RATE;
    }
    a
}

/// First UTF-16 code unit of a scalar value (the high surrogate for astral chars).
fn char_code(c: char) -> u16 {
    let mut buf = [0u16; 2];
    c.encode_utf16(&mut buf)[0]
}

fn fold_input(input: &str) -> f64 {
    input
        .chars()
        .map(|c| f64::from(char_code(c)) + 3.0)
        .fold(0.5, |acc, n| acc * (1.0 - acc) * chaos_hash(n))
}

/// Renders a double the way the reference number-to-string conversion does:
/// shortest round-trip digits, plain decimal for exponents in (-7, 21),
/// exponent notation (`1.5e-7`, `1e+21`) outside of it.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    // `{:e}` already yields the shortest digits that round-trip.
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // value = 0.d1d2..dk * 10^n
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{head}e{exp_sign}{}", (n - 1).abs())
        } else {
            format!("{head}.{tail}e{exp_sign}{}", (n - 1).abs())
        }
    };

    format!("{sign}{body}")
}

/// Reduces any string to a digit string of at least [`MIN_DIGEST_LEN`] characters.
pub fn make_hash(input: &str) -> String {
    let reversed: String = number_to_string(fold_input(input)).chars().rev().collect();
    let filler = reversed.chars().nth(FILLER_POS).unwrap_or(DEFAULT_FILLER);

    // The dot can't be read as a digit, so swap in the filler.
    let mut hash: String = reversed
        .replacen('.', filler.encode_utf8(&mut [0u8; 4]), 1)
        .chars()
        .skip(DIGEST_START)
        .take(DIGEST_END - DIGEST_START)
        .collect();

    let len = hash.chars().count();
    if len < MIN_DIGEST_LEN {
        hash.extend(std::iter::repeat(filler).take(MIN_DIGEST_LEN - len));
    }
    hash
}

/// Six-letter fingerprint of a word, the key into the word width table.
pub fn letter_code(word: &str) -> String {
    make_hash(word)
        .chars()
        .take(LETTER_CODE_LEN)
        .map(|c| LETTERS[c.to_digit(10).unwrap_or(0) as usize])
        .collect()
}
