//! Composition root: builds the stores and services and wires them together.
//!
//! SYSTEM CONTEXT
//! ==============
//! The app shell builds one [`ClientContext`] at mount and provides it to the
//! component tree. Tests build their own with in-memory storage, a stub
//! transport, and a manual clock.
//!
//! DESIGN
//! ======
//! Construction order matters: the session store hydrates from storage, then
//! the auth client binds its logout handler to the bus, so a navigation check
//! that finds an expired token always has someone listening.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use log::debug;

use crate::config::ClientConfig;
use crate::net::api::ProfileApi;
use crate::net::auth_client::AuthClient;
use crate::net::transport::Transport;
use crate::state::notification::NotificationStore;
use crate::state::session::SessionStore;
use crate::util::clock::Clock;
use crate::util::event_bus::EventBus;
use crate::util::listeners::ListenerId;
use crate::util::navigation::NavigationListener;
use crate::util::storage::KeyValueStorage;

/// Shared client services. Clones share the same stores.
pub struct ClientContext<T> {
    pub config: ClientConfig,
    pub session: Arc<SessionStore>,
    pub notifications: Arc<NotificationStore>,
    pub bus: Arc<EventBus<()>>,
    pub auth: Arc<AuthClient<T>>,
    pub profile: Arc<ProfileApi<T>>,
    pub navigation: Arc<NavigationListener>,
    logout_handler: ListenerId,
}

impl<T> Clone for ClientContext<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            session: Arc::clone(&self.session),
            notifications: Arc::clone(&self.notifications),
            bus: Arc::clone(&self.bus),
            auth: Arc::clone(&self.auth),
            profile: Arc::clone(&self.profile),
            navigation: Arc::clone(&self.navigation),
            logout_handler: self.logout_handler,
        }
    }
}

impl<T: Transport + Clone> ClientContext<T> {
    pub fn new(config: ClientConfig, storage: Arc<dyn KeyValueStorage>, transport: T, clock: Arc<dyn Clock>) -> Self {
        let session = Arc::new(SessionStore::init(Arc::clone(&storage)));
        let notifications = Arc::new(NotificationStore::new());
        let bus = Arc::new(EventBus::new());
        let auth = Arc::new(AuthClient::new(
            config.clone(),
            transport.clone(),
            Arc::clone(&session),
            Arc::clone(&notifications),
        ));
        let logout_handler = auth.bind_logout(&bus);
        let profile = Arc::new(ProfileApi::new(config.clone(), transport, Arc::clone(&session)));
        let navigation = Arc::new(NavigationListener::new(
            storage,
            Arc::clone(&notifications),
            Arc::clone(&bus),
            clock,
        ));
        debug!("client context ready (api: {})", config.api_base_url);
        Self { config, session, notifications, bus, auth, profile, navigation, logout_handler }
    }
}

impl<T> ClientContext<T> {
    /// Id of the auth client's `logout` registration on [`ClientContext::bus`].
    #[must_use]
    pub fn logout_handler(&self) -> ListenerId {
        self.logout_handler
    }

    /// Detach the auth client from the bus. Later `logout` emits do nothing.
    pub fn unbind_logout(&self) -> bool {
        self.bus.off_handler(self.logout_handler)
    }
}

#[cfg(any(feature = "csr", not(target_arch = "wasm32")))]
mod platform {
    use std::sync::Arc;

    use super::ClientContext;
    use crate::config::ClientConfig;
    use crate::net::transport::PlatformTransport;
    use crate::util::clock::SystemClock;
    use crate::util::storage::PlatformStorage;

    /// Context type used by the running application.
    pub type PlatformContext = ClientContext<PlatformTransport>;

    impl PlatformContext {
        /// Build with the platform's storage, transport, and system clock.
        #[must_use]
        pub fn platform(config: ClientConfig) -> Self {
            Self::new(
                config,
                Arc::new(PlatformStorage::default()),
                PlatformTransport::default(),
                Arc::new(SystemClock),
            )
        }
    }
}

#[cfg(any(feature = "csr", not(target_arch = "wasm32")))]
pub use platform::PlatformContext;
