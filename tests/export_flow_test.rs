use anyhow::Result;
use httpmock::prelude::*;
use okta_group_export::utils::prompt::ScriptedPrompt;
use okta_group_export::{app, ExportConfig, ExportError, OktaClient};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

const GROUP_ID: &str = "00g1ab2cd3EF4gh5i6j7";

fn member(index: usize) -> Value {
    json!({
        "id": format!("00u{:05}", index),
        "status": "ACTIVE",
        "created": "2023-01-15T08:30:00.000Z",
        "lastLogin": "2024-03-07T15:04:05.000Z",
        "profile": {
            "firstName": format!("First{}", index),
            "lastName": format!("Last{}", index),
            "email": format!("user{}@example.com", index),
            "login": format!("user{}@example.com", index)
        }
    })
}

fn members(start: usize, count: usize) -> Value {
    Value::Array((start..start + count).map(member).collect())
}

fn mock_group(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/groups/{}", GROUP_ID));
        then.status(200).json_body(json!({
            "id": GROUP_ID,
            "profile": {"name": "Engineering", "description": "All engineers"}
        }));
    });
}

fn config(server: &MockServer, output: PathBuf, extra_attrs: Vec<String>) -> ExportConfig {
    ExportConfig {
        org_url: server.base_url(),
        token: "test-token".to_string(),
        group_query: GROUP_ID.to_string(),
        output,
        quick: true,
        extra_attrs,
        verbose: false,
    }
}

#[tokio::test]
async fn test_pagination_exports_all_rows_across_pages() -> Result<()> {
    let server = MockServer::start();
    mock_group(&server);

    // Attribute discovery sample.
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "10");
        then.status(200).json_body(members(0, 10));
    });

    // Three pages of 200, 200, 47; cursor URLs are opaque to the client.
    let page2_url = format!("{}/page2", server.base_url());
    let page3_url = format!("{}/page3", server.base_url());

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "200");
        then.status(200)
            .header(
                "Link",
                format!(
                    "<{}/api/v1/groups/{}/users?limit=200>; rel=\"self\", <{}>; rel=\"next\"",
                    server.base_url(),
                    GROUP_ID,
                    page2_url
                ),
            )
            .json_body(members(0, 200));
    });
    server.mock(|when, then| {
        when.method(GET).path("/page2");
        then.status(200)
            .header("Link", format!("<{}>; rel=\"next\"", page3_url))
            .json_body(members(200, 200));
    });
    server.mock(|when, then| {
        when.method(GET).path("/page3");
        then.status(200).json_body(members(400, 47));
    });

    let temp = TempDir::new()?;
    let output = temp.path().join("members.csv");
    let client = OktaClient::new(&server.base_url(), "test-token")?;
    let mut prompt = ScriptedPrompt::default();

    let summary = app::run(&config(&server, output.clone(), vec![]), &client, &mut prompt).await?;

    assert_eq!(summary.rows, 447);
    assert_eq!(summary.group.name, "Engineering");

    let mut reader = csv::Reader::from_path(&output)?;
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "User ID",
            "First Name",
            "Last Name",
            "Email",
            "Login",
            "Status",
            "Created",
            "Last Login"
        ]
    );

    let records: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(records.len(), 447);
    for record in &records {
        assert_eq!(record.len(), headers.len());
    }
    assert_eq!(&records[0][0], "00u00000");
    assert_eq!(&records[0][6], "2023-01-15 08:30:00");
    assert_eq!(&records[446][0], "00u00446");

    Ok(())
}

#[tokio::test]
async fn test_zero_members_writes_header_only_and_succeeds() -> Result<()> {
    let server = MockServer::start();
    mock_group(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "10");
        then.status(200).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "200");
        then.status(200).json_body(json!([]));
    });

    let temp = TempDir::new()?;
    let output = temp.path().join("empty.csv");
    let client = OktaClient::new(&server.base_url(), "test-token")?;
    let mut prompt = ScriptedPrompt::default();

    let summary = app::run(&config(&server, output.clone(), vec![]), &client, &mut prompt).await?;
    assert_eq!(summary.rows, 0);

    // Empty sample leaves only baseline attributes for quick mode.
    let content = std::fs::read_to_string(&output)?;
    assert_eq!(content, "User ID,Status,Created,Last Login\n");

    Ok(())
}

#[tokio::test]
async fn test_fields_with_commas_are_quoted_and_round_trip() -> Result<()> {
    let server = MockServer::start();
    mock_group(&server);

    let tricky = json!([{
        "id": "00u00001",
        "status": "ACTIVE",
        "created": "2023-01-15T08:30:00.000Z",
        "lastLogin": null,
        "profile": {
            "firstName": "Bob",
            "lastName": "Smith, Jr.",
            "email": "bob@example.com",
            "login": "bob@example.com",
            "regions": ["east", "west"]
        }
    }]);

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "10");
        then.status(200).json_body(tricky.clone());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "200");
        then.status(200).json_body(tricky);
    });

    let temp = TempDir::new()?;
    let output = temp.path().join("quoting.csv");
    let client = OktaClient::new(&server.base_url(), "test-token")?;
    let mut prompt = ScriptedPrompt::default();

    let cfg = config(&server, output.clone(), vec!["regions".to_string()]);
    let summary = app::run(&cfg, &client, &mut prompt).await?;
    assert_eq!(summary.rows, 1);

    let raw = std::fs::read_to_string(&output)?;
    assert!(raw.contains("\"Smith, Jr.\""));

    let mut reader = csv::Reader::from_path(&output)?;
    let headers = reader.headers()?.clone();
    let last_name_col = headers.iter().position(|h| h == "Last Name").unwrap();
    let regions_col = headers.iter().position(|h| h == "regions").unwrap();
    let last_login_col = headers.iter().position(|h| h == "Last Login").unwrap();

    let record = reader.records().next().unwrap()?;
    assert_eq!(&record[last_name_col], "Smith, Jr.");
    assert_eq!(&record[regions_col], "east;west");
    assert_eq!(&record[last_login_col], "");

    Ok(())
}

#[tokio::test]
async fn test_rejected_token_is_a_distinct_auth_error() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path(format!("/api/v1/groups/{}", GROUP_ID));
        then.status(401).json_body(json!({
            "errorCode": "E0000011",
            "errorSummary": "Invalid token provided"
        }));
    });

    let temp = TempDir::new()?;
    let output = temp.path().join("never.csv");
    let client = OktaClient::new(&server.base_url(), "bad-token")?;
    let mut prompt = ScriptedPrompt::default();

    let err = app::run(&config(&server, output.clone(), vec![]), &client, &mut prompt)
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::AuthError { status: 401 }));
    assert!(!output.exists());

    Ok(())
}

#[tokio::test]
async fn test_empty_selection_is_a_validation_error() -> Result<()> {
    let server = MockServer::start();
    mock_group(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/v1/groups/{}/users", GROUP_ID))
            .query_param("limit", "10");
        then.status(200).json_body(members(0, 3));
    });

    let temp = TempDir::new()?;
    let mut cfg = config(&server, temp.path().join("never.csv"), vec![]);
    cfg.quick = false;

    let client = OktaClient::new(&server.base_url(), "test-token")?;
    // Clear everything, finish, add no extras.
    let mut prompt = ScriptedPrompt::new(["NONE", "", ""]);

    let err = app::run(&cfg, &client, &mut prompt).await.unwrap_err();
    assert!(matches!(err, ExportError::ValidationError { .. }));

    Ok(())
}
