pub mod bootstrap;
pub mod controller;
pub mod router;
pub mod state;

pub use bootstrap::Bootstrapper;
pub use controller::AppController;
pub use router::{route, NetworkStatus, Routed, UiEvent};
pub use state::{AppState, Focus};
