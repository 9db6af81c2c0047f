//! Phone-number-keyed identity resolution. Decides, given whatever user the
//! phone lookup found, whether a login attempt registers, returns the stored
//! account, or fails. Persistence stays with the caller.

use crate::models::usermodel::User;

use super::error::ServiceError;

#[derive(Debug, Clone)]
pub enum IdentityOutcome {
    /// The phone is free; the caller creates the account.
    Register { full_name: String },
    /// The stored account wins. A non-empty supplied name refreshes the
    /// profile; nothing else (including the stored role) changes.
    Login {
        user: User,
        rename_to: Option<String>,
    },
}

pub fn resolve(
    phone_number: &str,
    existing: Option<User>,
    is_sign_up: bool,
    full_name: Option<&str>,
) -> Result<IdentityOutcome, ServiceError> {
    let supplied_name = full_name.map(str::trim).filter(|name| !name.is_empty());

    if is_sign_up {
        if existing.is_some() {
            return Err(ServiceError::AlreadyRegistered(phone_number.to_string()));
        }

        let full_name = supplied_name.ok_or_else(|| {
            ServiceError::Validation("Full name is required to sign up".to_string())
        })?;

        Ok(IdentityOutcome::Register {
            full_name: full_name.to_string(),
        })
    } else {
        let user = existing.ok_or_else(|| ServiceError::UnknownPhone(phone_number.to_string()))?;

        Ok(IdentityOutcome::Login {
            user,
            rename_to: supplied_name.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usermodel::UserRole;
    use chrono::Utc;
    use uuid::Uuid;

    fn stored_user(phone: &str) -> User {
        User {
            id: Uuid::new_v4(),
            phone_number: phone.to_string(),
            full_name: "Asha Rao".to_string(),
            role: UserRole::User,
            address: "12 Lake View Road".to_string(),
            total_earnings: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn first_signup_registers_with_the_trimmed_name() {
        let outcome = resolve("9876543210", None, true, Some("  Asha Rao  ")).unwrap();
        assert!(matches!(
            outcome,
            IdentityOutcome::Register { full_name } if full_name == "Asha Rao"
        ));
    }

    // Phone number is the sole uniqueness key: a second signup with the same
    // phone is rejected outright.
    #[test]
    fn duplicate_signup_fails_already_registered() {
        let existing = stored_user("9876543210");
        let err = resolve("9876543210", Some(existing), true, Some("Someone Else")).unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyRegistered(phone) if phone == "9876543210"));
    }

    #[test]
    fn signup_requires_a_full_name() {
        assert!(matches!(
            resolve("9876543210", None, true, None),
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            resolve("9876543210", None, true, Some("   ")),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn login_with_an_unregistered_phone_fails_not_found() {
        let err = resolve("0000000000", None, false, None).unwrap_err();
        assert!(matches!(err, ServiceError::UnknownPhone(phone) if phone == "0000000000"));
    }

    #[test]
    fn login_returns_the_stored_account_unchanged() {
        let existing = stored_user("9876543210");
        let stored_id = existing.id;

        let outcome = resolve("9876543210", Some(existing), false, None).unwrap();
        match outcome {
            IdentityOutcome::Login { user, rename_to } => {
                assert_eq!(user.id, stored_id);
                assert_eq!(user.role, UserRole::User);
                assert!(rename_to.is_none());
            }
            other => panic!("expected login, got {:?}", other),
        }
    }

    #[test]
    fn login_with_a_name_refreshes_the_profile_only() {
        let existing = stored_user("9876543210");
        let outcome = resolve("9876543210", Some(existing), false, Some("Asha R.")).unwrap();
        assert!(matches!(
            outcome,
            IdentityOutcome::Login { rename_to: Some(name), .. } if name == "Asha R."
        ));

        // A blank name is ignored rather than erasing the stored one.
        let existing = stored_user("9876543210");
        let outcome = resolve("9876543210", Some(existing), false, Some("")).unwrap();
        assert!(matches!(outcome, IdentityOutcome::Login { rename_to: None, .. }));
    }
}
