use rand::Rng;

/// Generates an opaque token for email verification links.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Generates a unique Paystack transaction reference.
pub fn generate_reference() -> String {
    let bytes: [u8; 12] = rand::rng().random();
    format!("txp_{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn references_carry_prefix() {
        assert!(generate_reference().starts_with("txp_"));
    }
}
