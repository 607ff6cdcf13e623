//! Role hierarchy evaluation and page guarding

use desk_common::{Role, User};

/// True iff `actual` ranks at least as high as `required`.
///
/// `None` models an unrecognized or missing role and ranks as 0, so it
/// never satisfies any requirement (fail closed). Never panics.
#[inline]
pub fn has_at_least_role(actual: Option<Role>, required: Role) -> bool {
    actual.map_or(0, |r| r.rank()) >= required.rank()
}

/// What the UI should do after evaluating a guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the page
    Granted,
    /// No session: send the visitor to the login flow
    RedirectToLogin,
    /// Authenticated but under-ranked. Carries enough detail for the
    /// UI to show a permission-denied message; the legacy behavior of
    /// silently bouncing to the dashboard is a presentation choice.
    Denied {
        /// Minimum role the page declares
        required: Role,
        /// Role the session actually holds
        actual: Role,
    },
}

/// Declarative access requirement for a page or route.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageGuard {
    /// Minimum role, or `None` for any authenticated user
    pub required: Option<Role>,
}

impl PageGuard {
    /// Guard requiring only an authenticated session
    pub fn authenticated() -> Self {
        Self { required: None }
    }

    /// Guard requiring at least `role`
    pub fn min_role(role: Role) -> Self {
        Self {
            required: Some(role),
        }
    }

    /// Evaluate against the current session, if any.
    pub fn evaluate(&self, session: Option<&User>) -> GuardOutcome {
        let Some(user) = session else {
            return GuardOutcome::RedirectToLogin;
        };
        match self.required {
            None => GuardOutcome::Granted,
            Some(required) if has_at_least_role(Some(user.role), required) => {
                GuardOutcome::Granted
            }
            Some(required) => GuardOutcome::Denied {
                required,
                actual: user.role,
            },
        }
    }
}
