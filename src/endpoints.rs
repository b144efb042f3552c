//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the survey charts.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for updating the countries shown on the dashboard.
pub const DASHBOARD_COUNTRY_FILTER: &str = "/api/dashboard/filter";

/// The route for stylesheets and scripts.
pub const STATIC: &str = "/static";
