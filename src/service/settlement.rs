use rand::{distr::Alphanumeric, Rng};

/// Opaque reference attached to a payout for display and support lookups.
/// Carries no business meaning.
pub fn generate_settlement_reference() -> String {
    let suffix = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("CF_PY_{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_prefixed_and_uppercase() {
        let reference = generate_settlement_reference();
        assert!(reference.starts_with("CF_PY_"));
        assert_eq!(reference.len(), "CF_PY_".len() + 7);
        assert_eq!(reference, reference.to_uppercase());
    }
}
