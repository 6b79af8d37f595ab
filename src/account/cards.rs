//! Card-number generator
//!
//! Produces a random 16-digit numeric string verified unique against the
//! account table, regenerating on collision.

use rand::Rng;
use sqlx::PgPool;
use thiserror::Error;

use super::repository::AccountRepository;

pub const CARD_NUMBER_LEN: usize = 16;

// With 10^16 possible numbers a collision streak this long means something
// is broken, not unlucky.
const MAX_ATTEMPTS: usize = 100;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Could not find a free card number after {0} attempts")]
    Exhausted(usize),
}

fn random_card_number() -> String {
    let mut rng = rand::thread_rng();
    (0..CARD_NUMBER_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Generate a 16-digit card number not yet present in `accounts_tb`
pub async fn generate_unique_card_number(pool: &PgPool) -> Result<String, CardError> {
    for _ in 0..MAX_ATTEMPTS {
        let number = random_card_number();
        if !AccountRepository::card_number_exists(pool, &number).await? {
            return Ok(number);
        }
    }
    Err(CardError::Exhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_numbers_are_16_ascii_digits() {
        for _ in 0..100 {
            let number = random_card_number();
            assert_eq!(number.len(), CARD_NUMBER_LEN);
            assert!(number.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn card_numbers_vary() {
        let a = random_card_number();
        let b = random_card_number();
        let c = random_card_number();
        // Three consecutive 16-digit collisions would indicate a broken RNG
        assert!(!(a == b && b == c));
    }
}
