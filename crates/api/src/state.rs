use vigil_db::ConnectionProvider;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Holds no mutable data: every request opens its own database connection
/// through [`ConnectionProvider`], so cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Per-request connection factory.
    pub db: ConnectionProvider,
}
