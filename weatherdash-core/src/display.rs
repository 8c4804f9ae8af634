use crate::presenter::DashboardView;

/// Where the dashboard draws itself.
///
/// Implementations hold at most one active theme; rendering a view with a new
/// theme replaces the previous one.
pub trait DisplaySurface: Send + Sync {
    fn set_loading(&self, active: bool);

    /// Show a transient error notice, replacing any current one.
    fn show_notice(&self, message: &str);

    fn clear_notice(&self);

    fn render(&self, view: &DashboardView);
}
