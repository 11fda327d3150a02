use crate::security::SessionVerifier;
use axum::extract::FromRef;
use fxhash::FxHashMap;
use stagehand_database::Database;
use stagehand_domain::config::ApiConfig;
use stagehand_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[stagehand_derive::stagehand_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    pub database: Database,
    pub sessions: SessionVerifier,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Shared router state: configuration, storage, session verification and feature slices.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get(&TypeId::of::<T>()).and_then(InitializedSlice::downcast::<T>)
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns an error if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Names of the registered slices (for diagnostics).
    pub fn slice_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.inner.slices.values().map(|slice| slice.name)
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

impl FromRef<ApiState> for Database {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.database.clone()
    }
}

impl FromRef<ApiState> for SessionVerifier {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.sessions.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    database: Option<Database>,
    sessions: Option<SessionVerifier>,
    slices: Vec<InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn db(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Overrides the verifier otherwise derived from `[security.session]`.
    #[must_use]
    pub fn sessions(mut self, sessions: SessionVerifier) -> Self {
        self.sessions = Some(sessions);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.push(slice);
        self
    }

    /// Registers multiple slices at once.
    #[must_use]
    pub fn register_slices<I>(mut self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        self.slices.extend(slices);
        self
    }

    /// Builds the state; unless overridden, the session verifier is derived from
    /// `[security.session]`.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] if the config or database is missing,
    /// or if the same slice type was registered twice.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".into(),
            context: None,
        })?;
        let database = self.database.ok_or_else(|| ApiStateError::Validation {
            message: "Database not provided".into(),
            context: None,
        })?;
        let sessions =
            self.sessions.unwrap_or_else(|| SessionVerifier::new(&config.security.session));

        let mut slices = FxHashMap::default();
        for slice in self.slices {
            let name = slice.name;
            if slices.insert(slice.id, slice).is_some() {
                return Err(ApiStateError::Validation {
                    message: format!("Feature slice registered twice: {name}").into(),
                    context: None,
                });
            }
        }

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, database, sessions, slices }) })
    }
}
