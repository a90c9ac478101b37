use askama::Template;

/// Root document for the dashboard. The client script mounts into `#app`
/// and renders from the embedded page object.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardDocument {
    pub app_name: String,
    pub page_json: String,
    pub asset_version: &'static str,
}
