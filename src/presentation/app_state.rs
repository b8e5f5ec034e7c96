// Application state for HTTP handlers
use crate::application::controller::DashboardController;

pub struct AppState {
    pub controller: DashboardController,
}
