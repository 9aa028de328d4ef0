//! Canned payloads for demo (offline) mode.
//!
//! Routes are matched on `(Method, template)` where `{id}` stands for exactly
//! one path segment. Query strings and trailing slashes are ignored. Anything
//! without an entry gets an empty object.

use serde_json::{json, Value};

use super::types::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Canned {
    DashboardStats,
    DashboardActivity,
    CurrentUser,
    EmptyList,
    EmptyObject,
}

const ROUTES: &[(Method, &str, Canned)] = &[
    (Method::Get, "/auth/me", Canned::CurrentUser),
    (Method::Get, "/dashboard/stats", Canned::DashboardStats),
    (Method::Get, "/dashboard/activity", Canned::DashboardActivity),
    (Method::Get, "/dashboard/summary", Canned::EmptyObject),
    // emails
    (Method::Get, "/emails", Canned::EmptyList),
    (Method::Get, "/emails/{id}", Canned::EmptyList),
    (Method::Post, "/emails/sync", Canned::EmptyList),
    (Method::Post, "/emails/{id}/process", Canned::EmptyList),
    (Method::Patch, "/emails/{id}", Canned::EmptyList),
    // tasks
    (Method::Get, "/tasks", Canned::EmptyList),
    (Method::Get, "/tasks/{id}", Canned::EmptyList),
    (Method::Post, "/tasks", Canned::EmptyList),
    (Method::Put, "/tasks/{id}", Canned::EmptyList),
    (Method::Patch, "/tasks/{id}", Canned::EmptyList),
    (Method::Delete, "/tasks/{id}", Canned::EmptyList),
    // approvals
    (Method::Get, "/approvals", Canned::EmptyList),
    (Method::Get, "/approvals/{id}", Canned::EmptyList),
    (Method::Put, "/approvals/{id}", Canned::EmptyList),
    (Method::Post, "/approvals/approve-all", Canned::EmptyList),
    (Method::Post, "/approvals/{id}/approve", Canned::EmptyList),
    (Method::Post, "/approvals/{id}/reject", Canned::EmptyList),
    // calendar
    (Method::Get, "/calendar/events", Canned::EmptyList),
    (Method::Post, "/calendar/events", Canned::EmptyList),
    (Method::Put, "/calendar/events/{id}", Canned::EmptyList),
    (Method::Delete, "/calendar/events/{id}", Canned::EmptyList),
    (Method::Get, "/calendar/availability", Canned::EmptyList),
    (Method::Post, "/calendar/sync", Canned::EmptyList),
    // settings
    (Method::Get, "/settings", Canned::EmptyObject),
    (Method::Put, "/settings", Canned::EmptyObject),
    (Method::Put, "/settings/profile", Canned::EmptyObject),
    (Method::Post, "/settings/password", Canned::EmptyObject),
    (Method::Put, "/settings/notifications", Canned::EmptyObject),
    (Method::Put, "/settings/ai", Canned::EmptyObject),
];

impl Canned {
    fn body(self) -> Value {
        match self {
            Canned::DashboardStats => json!({
                "emails": 3,
                "pendingApprovals": 1,
                "tasks": 5,
                "events": 2
            }),
            Canned::DashboardActivity => json!([
                { "action": "Processed email from CEO", "time": "5 min ago" },
                { "action": "Approved task: Client Meeting", "time": "30 min ago" }
            ]),
            Canned::CurrentUser => json!({
                "user": { "fullName": "Demo User", "email": "demo@executive.ai" }
            }),
            Canned::EmptyList => json!([]),
            Canned::EmptyObject => json!({}),
        }
    }
}

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn matches_template(template: &str, path: &[&str]) -> bool {
    let template = segments(template);
    template.len() == path.len()
        && template
            .iter()
            .zip(path)
            .all(|(t, p)| *t == "{id}" || t == p)
}

/// Canned payload for a demo-mode call.
pub fn mock_response(method: Method, path: &str) -> Value {
    let path = segments(path);
    ROUTES
        .iter()
        .find(|(m, template, _)| *m == method && matches_template(template, &path))
        .map_or(Canned::EmptyObject, |(_, _, canned)| *canned)
        .body()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_counters() {
        let stats = mock_response(Method::Get, "/dashboard/stats");
        assert_eq!(stats["emails"], 3);
        assert_eq!(stats["pendingApprovals"], 1);
        assert_eq!(stats["tasks"], 5);
        assert_eq!(stats["events"], 2);
    }

    #[test]
    fn test_activity_ignores_query_string() {
        let activity = mock_response(Method::Get, "/dashboard/activity?limit=10");
        assert_eq!(activity.as_array().map(Vec::len), Some(2));
        assert_eq!(activity[0]["action"], "Processed email from CEO");
    }

    #[test]
    fn test_collections_are_empty_lists() {
        assert_eq!(mock_response(Method::Get, "/emails"), json!([]));
        assert_eq!(mock_response(Method::Get, "/tasks/42"), json!([]));
        assert_eq!(mock_response(Method::Get, "/approvals?status=pending"), json!([]));
        assert_eq!(mock_response(Method::Post, "/approvals/7/approve"), json!([]));
        assert_eq!(mock_response(Method::Post, "/approvals/approve-all"), json!([]));
        assert_eq!(mock_response(Method::Delete, "/calendar/events/abc/"), json!([]));
    }

    #[test]
    fn test_settings_are_empty_objects() {
        assert_eq!(mock_response(Method::Get, "/settings"), json!({}));
        assert_eq!(mock_response(Method::Put, "/settings/ai"), json!({}));
    }

    #[test]
    fn test_unknown_routes_fall_back_to_empty_object() {
        assert_eq!(mock_response(Method::Get, "/integrations/calendar/status"), json!({}));
        assert_eq!(mock_response(Method::Delete, "/emails"), json!({}));
        assert_eq!(mock_response(Method::Get, "/emails/1/attachments"), json!({}));
    }

    #[test]
    fn test_demo_current_user() {
        let me = mock_response(Method::Get, "/auth/me");
        assert_eq!(me["user"]["fullName"], "Demo User");
        assert_eq!(me["user"]["email"], "demo@executive.ai");
    }
}
