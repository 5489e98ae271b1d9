use crate::{
    pkg::internal::auth::{Role, User},
    prelude::*,
};

/// A record with a single owning user. Implemented by anything whose
/// mutation rights hinge on who created it.
pub trait Owned {
    fn owner_id(&self) -> &str;
}

/// Caller must be the owner; admins get no override.
pub fn ensure_owner(caller: &User, resource: &impl Owned) -> Result<()> {
    if resource.owner_id() == caller.user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("Not authorized to modify this resource"))
    }
}

/// Caller must be the owner or an admin.
pub fn ensure_owner_or_admin(caller: &User, resource: &impl Owned) -> Result<()> {
    if caller.role == Role::Admin || resource.owner_id() == caller.user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("Not authorized to access this resource"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Posting {
        posted_by: String,
    }

    impl Owned for Posting {
        fn owner_id(&self) -> &str {
            &self.posted_by
        }
    }

    fn user(user_id: &str, role: Role) -> User {
        User {
            user_id: user_id.to_string(),
            email: format!("{user_id}@example.com"),
            name: user_id.to_string(),
            role,
        }
    }

    #[test]
    fn test_owner_passes_both_checks() {
        let posting = Posting {
            posted_by: "u1".to_string(),
        };
        let owner = user("u1", Role::Employer);
        assert!(ensure_owner(&owner, &posting).is_ok());
        assert!(ensure_owner_or_admin(&owner, &posting).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let posting = Posting {
            posted_by: "u1".to_string(),
        };
        let other = user("u2", Role::Employer);
        assert!(matches!(
            ensure_owner(&other, &posting),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_owner_or_admin(&other, &posting),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_admin_override_only_where_granted() {
        let posting = Posting {
            posted_by: "u1".to_string(),
        };
        let admin = user("root", Role::Admin);
        assert!(matches!(
            ensure_owner(&admin, &posting),
            Err(AppError::Forbidden(_))
        ));
        assert!(ensure_owner_or_admin(&admin, &posting).is_ok());
    }
}
