use std::sync::Arc;

use crate::routes::tasks::store::TaskStore;
use crate::token::TokenVerifier;

/// Shared handles injected into every handler. Both collaborators are
/// narrow capability traits so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub verifier: Arc<dyn TokenVerifier>,
}
