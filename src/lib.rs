pub mod auth;
pub mod config;
pub mod events_api;
pub mod fallback;
pub mod filters;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod results;
pub mod screen;
pub mod search_input;
pub mod session;
mod utils;

pub use config::ApiConfig;
pub use events_api::EventsApi;
pub use filters::{Budget, FilterError, FilterKey, FilterState, FilterValue, SortKey};
pub use gateway::{ApiClient, GatewayError};
pub use models::{Category, EventQueryResult, EventRecord, ItemResult};
pub use results::ResultSet;
pub use screen::SearchScreen;
pub use search_input::{InputPhase, SearchInput};
pub use session::{InitialRoute, Session, SessionError, SessionStore, UserProfile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Everything the app shell needs before its first frame: the restored
/// session (which decides the opening route) and a configured API handle.
pub struct App {
    pub session: Session,
    pub api: EventsApi,
}

impl App {
    pub fn bootstrap() -> Result<Self, StartupError> {
        logging::init("info");
        Self::with_parts(SessionStore::open_default(), ApiConfig::from_env())
    }

    pub fn with_parts(store: SessionStore, config: ApiConfig) -> Result<Self, StartupError> {
        tracing::info!(base_url = %config.base_url, session = ?store.path(), "starting event-scout");
        let session = Session::initialize(store)?;
        let api = EventsApi::new(ApiClient::new(config)?);
        Ok(Self { session, api })
    }

    pub fn initial_route(&self) -> InitialRoute {
        self.session.initial_route()
    }

    pub fn search_screen(&self) -> SearchScreen {
        SearchScreen::new(self.api.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn bootstrap_with_parts_routes_by_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let mut app = App::with_parts(SessionStore::open(path.clone()), ApiConfig::default()).unwrap();
        assert_eq!(app.initial_route(), InitialRoute::Welcome);

        app.session
            .login(UserProfile {
                token: Some("tok".into()),
                email: "a@b.co".into(),
                user_id: "1".into(),
                ..UserProfile::default()
            })
            .unwrap();

        let app = App::with_parts(SessionStore::open(path), ApiConfig::default()).unwrap();
        assert_eq!(app.initial_route(), InitialRoute::Home);
        assert!(app.search_screen().results().is_empty());
    }
}
