//! Mesa Client - restaurant reservation client library
//!
//! Talks to the reservation backend over HTTP and carries a reservation
//! from "form submitted" to "payment confirmed", across the redirect to the
//! payment provider.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod notice;
pub mod payment;
pub mod session;
pub mod storage;

use std::sync::Arc;

pub use api::{
    AuthService, CatalogFilter, CheckoutApi, CheckoutService, DistrictService, ReservationApi,
    ReservationService, RestaurantService,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{Access, RedirectReason, Route};
pub use http::{HttpClient, NetworkHttpClient};
pub use notice::{Notice, NoticeLevel};
pub use payment::{
    Confirmation, ConfirmationView, FlowError, FlowState, PaymentRedirect, PendingPaymentSlot,
    ReservationFlow, ReturnParams, StartOutcome,
};
pub use session::SessionStore;
pub use storage::{FileStorage, MemoryStorage, Storage};

// Re-export shared types for convenience
pub use shared::client::{AuthResponse, Profile, SignInRequest, SignUpRequest};
pub use shared::models::{District, Page, PageRequest, Reservation, Restaurant};

/// Reservation flow wired to the network services
pub type NetworkReservationFlow =
    ReservationFlow<ReservationService<NetworkHttpClient>, CheckoutService<NetworkHttpClient>>;

/// Everything one "page load" needs, sharing a transport and a storage
#[derive(Debug, Clone)]
pub struct MesaClient {
    config: ClientConfig,
    http: NetworkHttpClient,
    session: SessionStore,
    slot: PendingPaymentSlot,
}

impl MesaClient {
    /// Client over `storage`; requests carry the stored session's token
    pub fn new(config: ClientConfig, storage: Arc<dyn Storage>) -> ClientResult<Self> {
        config.validate()?;
        let session = SessionStore::new(storage.clone());
        let http = config.build_http_client()?.with_session(session.clone());
        Ok(Self {
            config,
            http,
            session,
            slot: PendingPaymentSlot::new(storage),
        })
    }

    /// Client over file storage in `config.data_dir`
    pub fn open(config: ClientConfig) -> ClientResult<Self> {
        let storage = FileStorage::new(&config.data_dir);
        storage.ensure_dir()?;
        tracing::debug!(dir = %storage.dir().display(), "Opened storage");
        Self::new(config, Arc::new(storage))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn slot(&self) -> &PendingPaymentSlot {
        &self.slot
    }

    pub fn auth(&self) -> AuthService<NetworkHttpClient> {
        AuthService::new(self.http.clone(), self.session.clone())
    }

    pub fn districts(&self) -> DistrictService<NetworkHttpClient> {
        DistrictService::new(self.http.clone())
    }

    pub fn restaurants(&self) -> RestaurantService<NetworkHttpClient> {
        RestaurantService::new(self.http.clone())
    }

    pub fn reservations(&self) -> ReservationService<NetworkHttpClient> {
        ReservationService::new(self.http.clone())
    }

    pub fn checkout(&self) -> CheckoutService<NetworkHttpClient> {
        CheckoutService::new(
            self.http.clone(),
            self.config.return_url.clone(),
            self.config.cancel_url.clone(),
        )
    }

    /// A fresh flow in state `Idle`
    pub fn reservation_flow(&self) -> NetworkReservationFlow {
        ReservationFlow::new(self.reservations(), self.checkout(), self.slot.clone())
    }

    pub fn confirmation(&self) -> ConfirmationView<ReservationService<NetworkHttpClient>> {
        ConfirmationView::new(self.reservations(), self.slot.clone())
    }

    /// Route guard against the stored session
    pub fn guard(&self, route: Route) -> ClientResult<Access> {
        let session = self.session.get()?;
        Ok(guard::guard(session.as_ref(), route))
    }
}
