//! Auth service - sign-in, sign-up, sign-out
//!
//! The only writer of the session store.

use shared::client::{AuthResponse, Profile, SignInRequest, SignUpRequest};

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::session::SessionStore;

#[derive(Debug, Clone)]
pub struct AuthService<H> {
    http: H,
    session: SessionStore,
}

impl<H: HttpClient> AuthService<H> {
    pub fn new(http: H, session: SessionStore) -> Self {
        Self { http, session }
    }

    /// Sign in and persist the returned token and profile
    pub async fn sign_in(&self, request: &SignInRequest) -> ClientResult<AuthResponse> {
        let auth: AuthResponse = self.http.post("/auth/sign-in", request).await?;
        self.session.set(&auth)?;
        tracing::info!(user_id = auth.user.id, "Signed in");
        Ok(auth)
    }

    /// Register a new account; does not sign in
    pub async fn sign_up(&self, request: &SignUpRequest) -> ClientResult<Profile> {
        let profile: Profile = self.http.post("/auth/sign-up", request).await?;
        tracing::info!(user_id = profile.id, "Account created");
        Ok(profile)
    }

    /// Forget the stored session
    pub fn sign_out(&self) -> ClientResult<()> {
        self.session.clear()?;
        tracing::info!("Signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> ClientResult<bool> {
        Ok(self.session.get()?.is_some())
    }

    pub fn current_user(&self) -> ClientResult<Option<Profile>> {
        self.session.user()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
