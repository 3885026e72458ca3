use rand::{
    Rng,
    seq::{IndexedRandom, SliceRandom},
};

use crate::types::ShuffleAmount;

/// Length of a Spotify client id and client secret.
pub const CREDENTIAL_LENGTH: usize = 32;

pub fn is_valid_credential(value: &str) -> bool {
    value.chars().count() == CREDENTIAL_LENGTH
}

/// Hides all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    let visible: String = secret.chars().skip(len.saturating_sub(4)).collect();
    format!("{}{}", "*".repeat(len.saturating_sub(4)), visible)
}

/// Shuffles the whole set, then picks one element uniformly from it.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a mut [T], rng: &mut R) -> Option<&'a T> {
    items.shuffle(rng);
    items.choose(rng)
}

/// Picks `amount` elements, each independently and uniformly from the full set.
pub fn pick_random_many<T: Clone, R: Rng + ?Sized>(
    items: &mut [T],
    amount: usize,
    rng: &mut R,
) -> Vec<T> {
    (0..amount)
        .filter_map(|_| pick_random(items, rng).cloned())
        .collect()
}

/// Clap value parser for the number of tracks a shuffle enqueues.
pub fn parse_shuffle_amount(s: &str) -> Result<ShuffleAmount, String> {
    let amount: i64 = s
        .trim()
        .parse()
        .map_err(|_| "Please enter a number".to_string())?;
    ShuffleAmount::new(amount).map_err(|e| e.to_string())
}
