// tests/dispatcher.rs
//! End-to-end verb tests against a recording in-memory transport.

mod common;

use common::*;
use notion_cli::{
    AppError, Command, CredentialSources, Dispatcher, HttpMethod, NotionErrorCode, Verb,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn command(verb: Verb) -> Command {
    Command::try_from(verb).unwrap()
}

fn all_verbs() -> Vec<Command> {
    let target = || PAGE_HEX.to_string();
    vec![
        command(Verb::Page { target: target(), page_size: 100 }),
        command(Verb::Props { target: target() }),
        command(Verb::Blocks { target: target(), page_size: 100 }),
        command(Verb::Comments { target: target() }),
        command(Verb::Search { query: vec!["roadmap".into()], page_size: 20 }),
        command(Verb::Comment { target: target(), text: vec!["hello".into()] }),
        command(Verb::Update {
            target: target(),
            properties: Some(r#"{"Priority": {"select": "Low"}}"#.into()),
        }),
        command(Verb::Db { database: target(), filter: None, page_size: 50 }),
        command(Verb::Schema { database: target() }),
    ]
}

#[tokio::test]
async fn missing_credential_fails_every_verb_before_any_request() {
    let transport = MockTransport::new();
    let dispatcher = Dispatcher::new(&transport);

    for command in all_verbs() {
        let err = dispatcher
            .run(&command, &CredentialSources::none())
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::MissingCredential(_)),
            "{} returned {:?}",
            command.verb(),
            err
        );
    }
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn page_renders_all_three_sections() {
    let transport = MockTransport::new()
        .route(HttpMethod::Get, &format!("pages/{}", PAGE_ID), 200, page_body())
        .route(HttpMethod::Get, &format!("blocks/{}/children", PAGE_ID), 200, blocks_body())
        .route(HttpMethod::Get, "comments", 200, comments_body());

    let output = Dispatcher::new(&transport)
        .run(&command(Verb::Page { target: PAGE_HEX.into(), page_size: 100 }), &test_credentials())
        .await
        .unwrap();

    assert!(output.is_success());
    assert_eq!(output.exit_code(), 0);
    assert_eq!(
        output.text,
        "\
============================================================
Roadmap
============================================================
ID: 01234567-89ab-cdef-0123-456789abcdef
URL: https://www.notion.so/Roadmap-0123456789abcdef0123456789abcdef
Created: 2024-03-01T09:30:00.000Z
Updated: 2024-03-02T10:00:00.000Z

## Properties
  Due: 2024-04-01
  Priority: High

## Content
## Goals
[ ] Ship it

## Comments
[2024-03-03 08:15] 9f8e7d6c:
  Nice plan


"
    );

    let endpoints: Vec<String> = transport.requests().iter().map(|r| r.to_string()).collect();
    assert_eq!(
        endpoints,
        vec![
            format!("GET pages/{}", PAGE_ID),
            format!("GET blocks/{}/children?page_size=100", PAGE_ID),
            format!("GET comments?block_id={}", PAGE_ID),
        ]
    );
}

#[tokio::test]
async fn page_isolates_a_failed_blocks_fetch() {
    let transport = MockTransport::new()
        .route(HttpMethod::Get, &format!("pages/{}", PAGE_ID), 200, page_body())
        .route(
            HttpMethod::Get,
            &format!("blocks/{}/children", PAGE_ID),
            500,
            json!({"object": "error", "status": 500, "code": "internal_server_error", "message": "Something went wrong"}),
        )
        .route(HttpMethod::Get, "comments", 200, comments_body());

    let output = Dispatcher::new(&transport)
        .run(&command(Verb::Page { target: PAGE_HEX.into(), page_size: 100 }), &test_credentials())
        .await
        .unwrap();

    assert!(!output.is_success());
    assert_eq!(output.exit_code(), 1);
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].section, "Content");
    assert!(output.text.contains("  Priority: High"));
    assert!(output.text.contains(
        "## Content\n[error: API Error 500 (internal_server_error): Something went wrong]\n"
    ));
    assert!(output.text.contains("## Comments\n[2024-03-03 08:15] 9f8e7d6c:\n  Nice plan"));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn page_reports_every_failed_section() {
    let transport = MockTransport::new();

    let output = Dispatcher::new(&transport)
        .run(&command(Verb::Page { target: PAGE_HEX.into(), page_size: 10 }), &test_credentials())
        .await
        .unwrap();

    let sections: Vec<&str> = output.failures.iter().map(|f| f.section).collect();
    assert_eq!(sections, vec!["Properties", "Content", "Comments"]);
    assert!(!output.text.contains("===="));
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test]
async fn props_surfaces_remote_failure() {
    let transport = MockTransport::new();
    let err = Dispatcher::new(&transport)
        .run(&command(Verb::Props { target: PAGE_HEX.into() }), &test_credentials())
        .await
        .unwrap_err();

    match err {
        AppError::RemoteRequestFailed { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code, NotionErrorCode::ObjectNotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn props_with_unknown_type_names_the_tag() {
    let mut page = page_body();
    page["properties"]["Shape"] = json!({"id": "s", "type": "hologram", "hologram": {}});
    let transport =
        MockTransport::new().route(HttpMethod::Get, &format!("pages/{}", PAGE_ID), 200, page);

    let err = Dispatcher::new(&transport)
        .run(&command(Verb::Props { target: PAGE_HEX.into() }), &test_credentials())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unrecognized property type 'hologram'");
}

#[tokio::test]
async fn props_lists_every_property() {
    let transport =
        MockTransport::new().route(HttpMethod::Get, &format!("pages/{}", PAGE_ID), 200, page_body());

    let output = Dispatcher::new(&transport)
        .run(&command(Verb::Props { target: PAGE_HEX.into() }), &test_credentials())
        .await
        .unwrap();
    assert_eq!(output.text, "Due: 2024-04-01\nName: Roadmap\nPriority: High\n");
}

#[tokio::test]
async fn update_patches_expanded_payload() {
    let transport = MockTransport::new().route(
        HttpMethod::Patch,
        &format!("pages/{}", PAGE_ID),
        200,
        json!({"object": "page", "id": PAGE_ID, "last_edited_time": "2024-03-05T12:00:00.000Z"}),
    );

    let update = command(Verb::Update {
        target: PAGE_HEX.into(),
        properties: Some(r#"{"Tags": {"multi_select": ["A", "B"]}}"#.into()),
    });
    let output = Dispatcher::new(&transport)
        .run(&update, &test_credentials())
        .await
        .unwrap();

    assert_eq!(
        output.text,
        format!("Page updated: {}\nUpdated at: 2024-03-05T12:00:00.000Z\n", PAGE_ID)
    );
    let requests = transport.requests();
    assert_eq!(
        requests[0].body,
        Some(json!({"properties": {"Tags": {"multi_select": [{"name": "A"}, {"name": "B"}]}}}))
    );
}

#[tokio::test]
async fn comment_posts_runs_with_mentions() {
    let transport = MockTransport::new().route(
        HttpMethod::Post,
        "comments",
        200,
        json!({"object": "comment", "id": "c9", "created_time": "2024-03-05T12:00:00.000Z"}),
    );

    let mention = format!("<@{}>", PAGE_HEX);
    let comment = command(Verb::Comment {
        target: PAGE_HEX.into(),
        text: vec!["thanks".into(), mention],
    });
    let output = Dispatcher::new(&transport)
        .run(&comment, &test_credentials())
        .await
        .unwrap();

    assert_eq!(output.text, "Comment posted: c9\nTime: 2024-03-05T12:00:00.000Z\n");
    let body = transport.requests()[0].body.clone().unwrap();
    assert_eq!(body["parent"]["page_id"], PAGE_ID);
    assert_eq!(body["rich_text"][0]["text"]["content"], "thanks ");
    assert_eq!(body["rich_text"][1]["mention"]["user"]["id"], PAGE_ID);
}

#[tokio::test]
async fn db_passes_filter_through() {
    let row = page_body();
    let transport = MockTransport::new().route(
        HttpMethod::Post,
        &format!("databases/{}/query", PAGE_ID),
        200,
        json!({"object": "list", "results": [row], "has_more": false}),
    );

    let query = command(Verb::Db {
        database: PAGE_HEX.into(),
        filter: Some(r#"{"property": "Priority", "select": {"equals": "High"}}"#.into()),
        page_size: 10,
    });
    let output = Dispatcher::new(&transport)
        .run(&query, &test_credentials())
        .await
        .unwrap();

    assert_eq!(
        output.text,
        format!(
            "Found 1 result(s)\n\nRoadmap\n  ID: {}\n  Due: 2024-04-01\n  Priority: High\n",
            PAGE_ID
        )
    );
    assert_eq!(
        transport.requests()[0].body,
        Some(json!({
            "page_size": 10,
            "filter": {"property": "Priority", "select": {"equals": "High"}}
        }))
    );
}

#[tokio::test]
async fn search_lists_results() {
    let transport = MockTransport::new().route(
        HttpMethod::Post,
        "search",
        200,
        json!({"object": "list", "results": [page_body()], "has_more": true}),
    );

    let search = command(Verb::Search {
        query: vec!["road".into(), "map".into()],
        page_size: 5,
    });
    let output = Dispatcher::new(&transport)
        .run(&search, &test_credentials())
        .await
        .unwrap();

    assert_eq!(
        output.text,
        format!(
            "[page] Roadmap\n  ID: {}\n  URL: https://www.notion.so/Roadmap-{}\n\n",
            PAGE_ID, PAGE_HEX
        )
    );
    assert_eq!(
        transport.requests()[0].body,
        Some(json!({"query": "road map", "page_size": 5}))
    );
}

#[tokio::test]
async fn blocks_renders_nested_children() {
    let transport = MockTransport::new().route(
        HttpMethod::Get,
        &format!("blocks/{}/children", PAGE_ID),
        200,
        json!({"results": [{
            "type": "toggle",
            "toggle": {"rich_text": [{"plain_text": "More"}]},
            "children": [
                {"type": "paragraph", "paragraph": {"rich_text": [{"plain_text": "one"}]}},
                {"type": "paragraph", "paragraph": {"rich_text": [{"plain_text": "two"}]}}
            ]
        }]}),
    );

    let output = Dispatcher::new(&transport)
        .run(&command(Verb::Blocks { target: PAGE_HEX.into(), page_size: 100 }), &test_credentials())
        .await
        .unwrap();
    assert_eq!(output.text, "▸ More\n  one\n  two\n");
}

#[tokio::test]
async fn schema_lists_declared_types() {
    let transport = MockTransport::new().route(
        HttpMethod::Get,
        &format!("databases/{}", PAGE_ID),
        200,
        json!({
            "object": "database",
            "id": PAGE_ID,
            "title": [{"plain_text": "Tasks"}],
            "properties": {
                "Name": {"id": "title", "type": "title", "title": {}},
                "Created": {"id": "c", "type": "created_time", "created_time": {}}
            }
        }),
    );

    let output = Dispatcher::new(&transport)
        .run(&command(Verb::Schema { database: PAGE_HEX.into() }), &test_credentials())
        .await
        .unwrap();
    assert_eq!(
        output.text,
        format!("Tasks\nID: {}\n\n  Created: created_time (read-only)\n  Name: title\n", PAGE_ID)
    );
}
