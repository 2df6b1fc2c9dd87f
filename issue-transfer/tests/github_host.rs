//! `GitHubHost` against a mock GitHub API.

use issue_transfer::{
    ApiError, GitHubHost, IssueHost, IssueUpdate, Milestone, MilestoneState, RepoCoordinate,
};
use octocrab::Octocrab;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo() -> RepoCoordinate {
    RepoCoordinate::new("octo", "new")
}

fn host(server: &MockServer) -> GitHubHost {
    let octocrab = Octocrab::builder()
        .base_uri(server.uri())
        .unwrap()
        .build()
        .unwrap();
    GitHubHost::from_octocrab(octocrab)
}

async fn mount_graphql(server: &MockServer, variables: Value, response: Value) {
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "variables": variables })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_rate_limit(server: &MockServer) {
    let rate = json!({ "limit": 5000, "used": 0, "remaining": 5000, "reset": 0 });
    Mock::given(method("GET"))
        .and(path("/rate_limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resources": { "core": rate, "search": rate, "graphql": rate },
            "rate": rate,
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn follows_label_and_milestone_cursors_independently() {
    let server = MockServer::start().await;
    let milestones = json!({
        "pageInfo": { "hasNextPage": false, "endCursor": "M1" },
        "nodes": [{ "number": 1, "title": "v1" }],
    });
    mount_graphql(
        &server,
        json!({ "owner": "octo", "repo": "new", "labelsCursor": null, "milestonesCursor": null }),
        json!({ "data": { "repository": {
            "id": "R_new",
            "labels": {
                "pageInfo": { "hasNextPage": true, "endCursor": "L1" },
                "nodes": [{ "name": "bug", "color": "d73a4a", "description": null }],
            },
            "milestones": milestones,
        }}}),
    )
    .await;
    // Milestones are done after the first page; repeats must be ignored.
    mount_graphql(
        &server,
        json!({ "labelsCursor": "L1", "milestonesCursor": null }),
        json!({ "data": { "repository": {
            "id": "R_new",
            "labels": {
                "pageInfo": { "hasNextPage": false, "endCursor": "L2" },
                "nodes": [{ "name": "urgent", "color": "e11d21", "description": "Now" }],
            },
            "milestones": milestones,
        }}}),
    )
    .await;

    let snapshot = host(&server).fetch_target_repository(&repo()).await.unwrap();

    assert_eq!(snapshot.id, "R_new");
    let labels: Vec<&str> = snapshot.labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(labels, vec!["bug", "urgent"]);
    assert_eq!(snapshot.labels[1].description.as_deref(), Some("Now"));
    assert_eq!(snapshot.milestones.len(), 1);
    assert_eq!(snapshot.milestones[0].number, 1);
}

#[tokio::test]
async fn pages_through_source_issues() {
    let server = MockServer::start().await;
    mount_graphql(
        &server,
        json!({ "owner": "octo", "repo": "old", "cursor": null }),
        json!({ "data": { "repository": { "issues": {
            "pageInfo": { "hasNextPage": true, "endCursor": "C1" },
            "nodes": [{
                "id": "I_1", "number": 1, "title": "First", "body": "",
                "labels": { "nodes": [{ "name": "bug", "color": "d73a4a" }] },
                "milestone": { "title": "v1", "description": null, "dueOn": null, "state": "CLOSED" },
            }],
        }}}}),
    )
    .await;
    mount_graphql(
        &server,
        json!({ "cursor": "C1" }),
        json!({ "data": { "repository": { "issues": {
            "pageInfo": { "hasNextPage": false, "endCursor": null },
            "nodes": [{ "id": "I_2", "number": 2, "title": "Second", "body": "text", "milestone": null }],
        }}}}),
    )
    .await;

    let issues = host(&server)
        .fetch_source_issues(&RepoCoordinate::new("octo", "old"))
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].labels[0].name, "bug");
    let milestone = issues[0].milestone.as_ref().unwrap();
    assert_eq!(milestone.state, MilestoneState::Closed);
    assert_eq!(milestone.description, "");
    assert!(milestone.due_on.is_none());
    assert!(!issues[1].has_metadata());
}

#[tokio::test]
async fn null_repository_is_not_found() {
    let server = MockServer::start().await;
    mount_graphql(
        &server,
        json!({ "owner": "octo", "repo": "new" }),
        json!({ "data": { "repository": null } }),
    )
    .await;

    let result = host(&server).fetch_target_repository(&repo()).await;

    assert!(matches!(
        result,
        Err(ApiError::RepositoryNotFound { repository }) if repository == "octo/new"
    ));
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let server = MockServer::start().await;
    mount_graphql(
        &server,
        json!({ "repositoryId": "R_new", "issueId": "I_1" }),
        json!({ "data": null, "errors": [{ "message": "Could not resolve to a node" }] }),
    )
    .await;

    let result = host(&server).transfer_issue("R_new", "I_1").await;

    assert!(matches!(
        result,
        Err(ApiError::GraphQl { message }) if message == "Could not resolve to a node"
    ));
}

#[tokio::test]
async fn transfers_issue_by_node_id() {
    let server = MockServer::start().await;
    mount_graphql(
        &server,
        json!({ "repositoryId": "R_new", "issueId": "I_1" }),
        json!({ "data": { "transferIssue": { "issue": {
            "id": "I_moved", "number": 104, "url": "https://github.com/octo/new/issues/104",
        }}}}),
    )
    .await;

    let transferred = host(&server).transfer_issue("R_new", "I_1").await.unwrap();

    assert_eq!(transferred.number, 104);
    assert_eq!(transferred.url, "https://github.com/octo/new/issues/104");
}

#[tokio::test]
async fn creates_milestone_with_rest_body() {
    let server = MockServer::start().await;
    mount_rate_limit(&server).await;
    Mock::given(method("POST"))
        .and(path("/repos/octo/new/milestones"))
        .and(body_json(
            json!({ "title": "v2", "description": "Second", "state": "closed" }),
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 9,
            "title": "v2",
            "html_url": "https://github.com/octo/new/milestone/9",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let milestone = Milestone {
        title: "v2".to_string(),
        description: "Second".to_string(),
        due_on: None,
        state: MilestoneState::Closed,
    };
    let created = host(&server)
        .create_milestone(&repo(), &milestone)
        .await
        .unwrap();

    assert_eq!(created.number, 9);
    assert_eq!(created.url, "https://github.com/octo/new/milestone/9");
}

#[tokio::test]
async fn updates_issue_with_single_patch() {
    let server = MockServer::start().await;
    mount_rate_limit(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/new/issues/104"))
        .and(body_json(json!({ "labels": ["bug", "urgent"], "milestone": 9 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "number": 104 })))
        .expect(1)
        .mount(&server)
        .await;

    let update =
        IssueUpdate::new(104, vec!["bug".to_string(), "urgent".to_string()], Some(9)).unwrap();
    host(&server).update_issue(&repo(), &update).await.unwrap();
}

#[tokio::test]
async fn rejected_update_carries_status() {
    let server = MockServer::start().await;
    mount_rate_limit(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/repos/octo/new/issues/104"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "documentation_url": "https://docs.github.com/rest",
        })))
        .mount(&server)
        .await;

    let update = IssueUpdate::new(104, Vec::new(), Some(9)).unwrap();
    let err = host(&server)
        .update_issue(&repo(), &update)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 422, .. }));
    assert!(!err.is_retryable());
}
