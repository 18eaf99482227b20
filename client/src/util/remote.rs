//! Glue between Leptos context and the `net` layer: building an authenticated
//! [`Remote`], keeping the id token fresh, and reporting failures as toasts.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use std::future::Future;

use leptos::prelude::*;

use crate::config::BackendConfig;
use crate::net::Remote;
use crate::net::error::ApiError;
use crate::net::identity::TokenGrant;
use crate::state::auth::{AuthSession, AuthState, SessionScope};
use crate::state::toast::ToastQueue;

pub const CONFIG_PATH: &str = "/api/config";

/// Pair the loaded config with the session's id token.
///
/// # Errors
///
/// [`ApiError::NotConfigured`] before `/api/config` has loaded and
/// [`ApiError::Unauthenticated`] without a session.
pub fn remote_for(config: Option<&BackendConfig>, session: Option<&AuthSession>) -> Result<Remote, ApiError> {
    let config = config.ok_or(ApiError::NotConfigured)?;
    let session = session.ok_or(ApiError::Unauthenticated)?;
    Ok(Remote { config: config.clone(), id_token: session.id_token.clone() })
}

/// Refresh `session` in place when its id token is about to expire.
/// Returns whether a refresh happened.
///
/// # Errors
///
/// Whatever `refresh` fails with; the session is left untouched.
pub async fn ensure_fresh<R, Fut>(session: &mut AuthSession, now_ms: i64, refresh: R) -> Result<bool, ApiError>
where
    R: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<TokenGrant, ApiError>>,
{
    if !session.needs_refresh(now_ms) {
        return Ok(false);
    }
    let grant = refresh(session.refresh_token.clone()).await?;
    session.apply_refresh(grant, now_ms);
    Ok(true)
}

/// Current [`Remote`] from context, refreshing and re-persisting the session
/// first when needed. A rejected refresh signs the tab out.
///
/// # Errors
///
/// See [`remote_for`]; a failed refresh yields [`ApiError::Unauthenticated`].
pub async fn fresh_remote(config: RwSignal<Option<BackendConfig>>, auth: RwSignal<AuthState>) -> Result<Remote, ApiError> {
    let cfg = ensure_config(config).await?;
    let mut session = auth.get_untracked().session.ok_or(ApiError::Unauthenticated)?;
    let refreshed = ensure_fresh(&mut session, crate::util::time::now_ms(), |token| {
        let cfg = cfg.clone();
        async move { crate::net::identity::refresh(&cfg, &token).await }
    })
    .await;
    match refreshed {
        Ok(true) => {
            persist(&session);
            auth.update(|a| a.session = Some(session.clone()));
        }
        Ok(false) => {}
        Err(e) => {
            log::warn!("session refresh failed: {e}");
            forget(session.scope);
            auth.update(|a| a.session = None);
            return Err(ApiError::Unauthenticated);
        }
    }
    remote_for(Some(&cfg), Some(&session))
}

fn persist(session: &AuthSession) {
    use crate::util::storage::BrowserStore;
    crate::state::auth::store_session(&BrowserStore::Local, &BrowserStore::Tab, session);
}

fn forget(scope: SessionScope) {
    use crate::util::storage::BrowserStore;
    crate::state::auth::clear_session(&BrowserStore::Local, &BrowserStore::Tab, scope);
}

/// The three contexts every remote action needs, captured once at component
/// setup so event handlers and spawned tasks never look up context.
#[derive(Clone, Copy)]
pub struct RemoteCtx {
    pub config: RwSignal<Option<BackendConfig>>,
    pub auth: RwSignal<AuthState>,
    pub toasts: RwSignal<ToastQueue>,
}

impl RemoteCtx {
    #[must_use]
    pub fn from_context() -> Self {
        Self { config: expect_context(), auth: expect_context(), toasts: expect_context() }
    }

    /// Run `run` against a fresh [`Remote`] in the background. Success goes to
    /// `on_ok`; any failure becomes an error toast prefixed with `action`.
    pub fn spawn<T, F, Fut, K>(self, action: &'static str, run: F, on_ok: K)
    where
        T: 'static,
        F: FnOnce(Remote) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        K: FnOnce(T) + 'static,
    {
        self.spawn_or_else(action, run, on_ok, |_| {});
    }

    /// Like [`RemoteCtx::spawn`], also handing the failure to `on_err` after
    /// it has been reported.
    pub fn spawn_or_else<T, F, Fut, K, E>(self, action: &'static str, run: F, on_ok: K, on_err: E)
    where
        T: 'static,
        F: FnOnce(Remote) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        K: FnOnce(T) + 'static,
        E: FnOnce(ApiError) + 'static,
    {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let result = match fresh_remote(self.config, self.auth).await {
                Ok(remote) => run(remote).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(value) => on_ok(value),
                Err(e) => {
                    report(self.toasts, action, &e);
                    if let Some(scope) = self.auth.with_untracked(|a| rejected_session_scope(a, &e)) {
                        log::warn!("auth: credentials rejected, signing out");
                        forget(scope);
                        self.auth.update(|a| a.session = None);
                    }
                    on_err(e);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (action, run, on_ok, on_err);
        }
    }
}

/// The scope to sign out when `err` means the backend no longer accepts the
/// current session, `None` otherwise.
#[must_use]
pub fn rejected_session_scope(state: &AuthState, err: &ApiError) -> Option<SessionScope> {
    if !err.is_auth_failure() {
        return None;
    }
    state.session.as_ref().map(|s| s.scope)
}

/// Log a remote failure and surface it as an error toast.
pub fn report(toasts: RwSignal<ToastQueue>, action: &str, err: &ApiError) {
    log::warn!("{action}: {err}");
    let message = format!("{action}: {err}");
    let id = toasts.try_update(|q| q.error(message));
    if let Some(id) = id {
        schedule_dismiss(toasts, id);
    }
}

/// Show a success toast.
pub fn notify(toasts: RwSignal<ToastQueue>, message: &str) {
    let message = message.to_owned();
    if let Some(id) = toasts.try_update(|q| q.success(message)) {
        schedule_dismiss(toasts, id);
    }
}

/// Show an error toast for a failure that never reached the network.
pub fn notify_error(toasts: RwSignal<ToastQueue>, message: &str) {
    let message = message.to_owned();
    if let Some(id) = toasts.try_update(|q| q.error(message)) {
        schedule_dismiss(toasts, id);
    }
}

fn schedule_dismiss(toasts: RwSignal<ToastQueue>, id: u64) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(crate::state::toast::TOAST_TTL_MS))).await;
        let _ = toasts.try_update(|q| q.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (toasts, id);
    }
}

/// The loaded config, fetching and storing it first when startup has not
/// finished yet.
///
/// # Errors
///
/// See [`fetch_backend_config`].
pub async fn ensure_config(config: RwSignal<Option<BackendConfig>>) -> Result<BackendConfig, ApiError> {
    if let Some(cfg) = config.get_untracked() {
        return Ok(cfg);
    }
    let cfg = fetch_backend_config().await?;
    config.set(Some(cfg.clone()));
    Ok(cfg)
}

/// Fetch the host-published backend config.
///
/// # Errors
///
/// Transport errors, or [`ApiError::Decode`] when the payload has the wrong shape.
pub async fn fetch_backend_config() -> Result<BackendConfig, ApiError> {
    let body = crate::net::http::send_json(crate::net::http::Method::Get, CONFIG_PATH, None, None).await?;
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
