//! Authentication helpers used by HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! session-to-user resolution and role guards here.

use crate::domain::{Error, Role, User};

use super::ApiResult;
use super::session::SessionContext;
use super::state::HttpState;

/// Resolve the session's login to a full user record.
///
/// A session referencing a user that no longer exists, or whose recorded
/// role no longer matches the stored one, is treated the same as no session
/// at all.
pub async fn current_user(state: &HttpState, session: &SessionContext) -> ApiResult<User> {
    let (user_id, role) = session.require_login()?;
    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(Error::from)?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    if user.role() != role {
        return Err(Error::unauthorized("login required"));
    }
    Ok(user)
}

/// Reject callers that do not hold the admin role.
pub fn require_admin(user: &User) -> ApiResult<()> {
    if user.role() == Role::Admin {
        Ok(())
    } else {
        Err(Error::forbidden("admin role required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::{NewUser, PasswordHash, Role, UserId};
    use rstest::rstest;

    fn user_with_role(role: Role) -> User {
        let fields = NewUser::try_from_parts(
            "t@example.com",
            PasswordHash::hash("pw"),
            role,
            "Tester",
            None,
        )
        .expect("fixture user");
        User::new(UserId::new("u1").expect("fixture id"), fields)
    }

    #[rstest]
    #[case(Role::Admin, true)]
    #[case(Role::Shop, false)]
    #[case(Role::Beneficiary, false)]
    fn only_admins_pass_the_admin_guard(#[case] role: Role, #[case] allowed: bool) {
        let result = require_admin(&user_with_role(role));
        if allowed {
            assert!(result.is_ok());
        } else {
            let error = result.expect_err("non-admin should be rejected");
            assert_eq!(error.code(), ErrorCode::Forbidden);
        }
    }
}
