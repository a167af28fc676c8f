//! Role and ownership checks shared by every write path.

use crate::{error::AppError, middleware::auth::Principal, models::MemberRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Reads are open to everyone. Writes need the owner or an admin.
pub fn can_modify(principal: Option<&Principal>, owner_id: i32, access: Access) -> bool {
    if access == Access::Read {
        return true;
    }
    match principal {
        Some(p) => p.member_id == owner_id || p.role == MemberRole::Admin,
        None => false,
    }
}

pub fn ensure_can_modify(principal: &Principal, owner_id: i32) -> Result<(), AppError> {
    if can_modify(Some(principal), owner_id, Access::Write) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

pub fn require_admin(principal: &Principal) -> Result<(), AppError> {
    if principal.role == MemberRole::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(member_id: i32, role: MemberRole) -> Principal {
        Principal { member_id, role }
    }

    #[test]
    fn reads_always_allowed() {
        assert!(can_modify(None, 1, Access::Read));
        let other = principal(2, MemberRole::Gourmet);
        assert!(can_modify(Some(&other), 1, Access::Read));
    }

    #[test]
    fn anonymous_cannot_write() {
        assert!(!can_modify(None, 1, Access::Write));
    }

    #[test]
    fn owner_and_admin_can_write() {
        assert!(can_modify(Some(&principal(1, MemberRole::Cook)), 1, Access::Write));
        assert!(can_modify(Some(&principal(9, MemberRole::Admin)), 1, Access::Write));
    }

    #[test]
    fn other_member_is_forbidden() {
        let other = principal(2, MemberRole::Cook);
        assert!(!can_modify(Some(&other), 1, Access::Write));
        assert!(matches!(ensure_can_modify(&other, 1), Err(AppError::Forbidden)));
    }

    #[test]
    fn admin_gate() {
        assert!(require_admin(&principal(1, MemberRole::Admin)).is_ok());
        assert!(matches!(
            require_admin(&principal(1, MemberRole::Cook)),
            Err(AppError::Forbidden)
        ));
    }
}
