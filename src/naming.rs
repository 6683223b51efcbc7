//! Unique tokens for output file names.

use rand::Rng;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Supplies short, collision-resistant file name fragments.
pub trait NameSupplier: Send + Sync {
    fn next_token(&self) -> String;
}

/// Random tokens of uppercase ASCII letters and digits.
#[derive(Debug, Clone, Copy)]
pub struct RandomToken {
    length: usize,
}

impl RandomToken {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl Default for RandomToken {
    fn default() -> Self {
        Self::new(5)
    }
}

impl NameSupplier for RandomToken {
    fn next_token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_token_shape() {
        let token = RandomToken::default().next_token();
        assert_eq!(token.len(), 5);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn zero_length_is_clamped() {
        assert_eq!(RandomToken::new(0).next_token().len(), 1);
    }
}
