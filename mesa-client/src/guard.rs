//! Route guard
//!
//! A pure predicate over the session, evaluated before entering a view.

use shared::client::AuthResponse;

/// Views of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    SignIn,
    SignUp,
    Restaurants,
    ReservationForm,
    ReservationConfirmation,
    ReservationHistory,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::SignIn => "/auth/sign-in",
            Route::SignUp => "/auth/sign-up",
            Route::Restaurants => "/pages/restaurants",
            Route::ReservationForm => "/pages/reservation/form",
            Route::ReservationConfirmation => "/pages/reservation/confirmation",
            Route::ReservationHistory => "/pages/reservation/history",
        }
    }

    /// Everything under `/pages` needs a session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::SignIn | Route::SignUp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    NotAuthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect { to: Route, reason: RedirectReason },
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Decide whether `route` may be entered with `session`
pub fn guard(session: Option<&AuthResponse>, route: Route) -> Access {
    if !route.is_protected() || session.is_some() {
        return Access::Allow;
    }
    Access::Redirect {
        to: Route::SignIn,
        reason: RedirectReason::NotAuthenticated,
    }
}
