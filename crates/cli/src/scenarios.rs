//! Built-in smoke suite for the JSONPlaceholder API.
//!
//! Covers the service's GET and POST surface: list, fetch by id, filter by
//! user, and create with both structured and raw JSON bodies.

use restprobe_domain::{
    Expectation, LengthOperator, ProbeConfig, RequestBody, RequestSpec, Scenario, ValuePredicate,
};
use serde_json::json;

/// Name of the built-in suite.
pub const SUITE_NAME: &str = "jsonplaceholder smoke";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@(.+)$";

/// Builds the built-in scenarios, applying the configured time bound.
#[must_use]
pub fn smoke_suite(config: &ProbeConfig) -> Vec<Scenario> {
    let max_ms = config.max_response_ms;
    vec![
        list_posts(max_ms),
        fetch_post_by_id(max_ms),
        filter_posts_by_user(max_ms),
        create_post_structured(max_ms),
        create_post_raw(max_ms),
        create_comment(max_ms),
    ]
}

fn list_posts(max_ms: u64) -> Scenario {
    Scenario::new("list all posts", RequestSpec::get("/posts"))
        .expecting(Expectation::status(200))
        .expecting(Expectation::time_under(max_ms))
        .expecting(Expectation::ContentType {
            expected: "application/json".to_string(),
        })
        .expecting(Expectation::JsonLength {
            path: "$".to_string(),
            operator: LengthOperator::GreaterThan,
            expected: 0,
        })
        .expecting(Expectation::json_exists("$[0].id"))
        .expecting(Expectation::json_exists("$[0].title"))
        .expecting(Expectation::json_exists("$[0].userId"))
}

fn fetch_post_by_id(max_ms: u64) -> Scenario {
    Scenario::new(
        "fetch post by id",
        RequestSpec::get("/posts/{id}").with_path_param("id", 1),
    )
    .expecting(Expectation::status(200))
    .expecting(Expectation::time_under(max_ms))
    .expecting(Expectation::json_eq("$.id", json!(1)))
    .expecting(Expectation::json_exists("$.userId"))
    .expecting(Expectation::json_non_empty("$.title"))
    .expecting(Expectation::json_non_empty("$.body"))
}

fn filter_posts_by_user(max_ms: u64) -> Scenario {
    Scenario::new(
        "filter posts by user",
        RequestSpec::get("/posts").with_query("userId", 1),
    )
    .expecting(Expectation::status(200))
    .expecting(Expectation::time_under(max_ms))
    .expecting(Expectation::JsonLength {
        path: "$".to_string(),
        operator: LengthOperator::GreaterThan,
        expected: 0,
    })
    .expecting(Expectation::JsonEach {
        path: "$[*].userId".to_string(),
        predicate: ValuePredicate::Equals { value: json!(1) },
    })
}

fn create_post_structured(max_ms: u64) -> Scenario {
    let title = "Exploring the test double pattern";
    let body = "A short field report on replacing live collaborators with doubles.";
    Scenario::new(
        "create post with structured body",
        RequestSpec::post("/posts").with_json_body(json!({
            "title": title,
            "body": body,
            "userId": 1,
        })),
    )
    .expecting(Expectation::status(201))
    .expecting(Expectation::time_under(max_ms))
    .expecting(Expectation::json_exists("$.id"))
    .expecting(Expectation::json_eq("$.title", json!(title)))
    .expecting(Expectation::json_eq("$.body", json!(body)))
    .expecting(Expectation::json_eq("$.userId", json!(1)))
}

fn create_post_raw(max_ms: u64) -> Scenario {
    let raw = r#"{
  "title": "Posting with a raw JSON body",
  "body": "This request submits its payload as a pre-rendered string.",
  "userId": 2
}"#;
    Scenario::new(
        "create post with raw body",
        RequestSpec::post("/posts").with_body(RequestBody::raw_json(raw)),
    )
    .expecting(Expectation::status(201))
    .expecting(Expectation::time_under(max_ms))
    .expecting(Expectation::ContentType {
        expected: "application/json".to_string(),
    })
    .expecting(Expectation::json_exists("$.id"))
    .expecting(Expectation::json_eq("$.userId", json!(2)))
    .expecting(Expectation::JsonPath {
        path: "$.title".to_string(),
        predicate: ValuePredicate::Contains {
            value: "raw JSON".to_string(),
        },
    })
}

fn create_comment(max_ms: u64) -> Scenario {
    let name = "Probe Reviewer";
    let email = "reviewer@example.com";
    let body = "Leaving a comment to confirm the create endpoint echoes fields.";
    Scenario::new(
        "create comment",
        RequestSpec::post("/comments").with_json_body(json!({
            "postId": 1,
            "name": name,
            "email": email,
            "body": body,
        })),
    )
    .expecting(Expectation::status(201))
    .expecting(Expectation::time_under(max_ms))
    .expecting(Expectation::json_exists("$.id"))
    .expecting(Expectation::json_eq("$.postId", json!(1)))
    .expecting(Expectation::json_eq("$.name", json!(name)))
    .expecting(Expectation::json_eq("$.email", json!(email)))
    .expecting(Expectation::json_eq("$.body", json!(body)))
    .expecting(Expectation::JsonPath {
        path: "$.email".to_string(),
        predicate: ValuePredicate::MatchesPattern {
            pattern: EMAIL_PATTERN.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use restprobe_domain::HttpMethod;

    #[test]
    fn test_suite_shape() {
        let config = ProbeConfig::default();
        let suite = smoke_suite(&config);
        assert_eq!(suite.len(), 6);
        assert!(suite.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_fetch_by_id_renders() {
        let config = ProbeConfig::default();
        let suite = smoke_suite(&config);
        let fetch = suite
            .iter()
            .find(|s| s.name == "fetch post by id")
            .map(|s| &s.request);
        let rendered = fetch.map(RequestSpec::render_path);
        assert_eq!(rendered.and_then(Result::ok).as_deref(), Some("/posts/1"));
    }

    #[test]
    fn test_post_scenarios_carry_bodies() {
        let config = ProbeConfig::default();
        for scenario in smoke_suite(&config) {
            if scenario.request.method == HttpMethod::Post {
                assert!(!scenario.request.body.is_empty(), "{}", scenario.name);
            }
        }
    }

    #[test]
    fn test_time_bound_follows_config() {
        let config = ProbeConfig::default().with_max_response_ms(1234);
        let suite = smoke_suite(&config);
        let has_bound = suite.iter().all(|s| {
            s.expectations
                .iter()
                .any(|e| matches!(e, Expectation::TimeUnder { max_ms: 1234 }))
        });
        assert!(has_bound);
    }
}
