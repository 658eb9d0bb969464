use mockito::Matcher;
use serde_json::json;

use sous::{export_items, Format, Ingredient, ShoppingList, SousError, TaskExporter, TodoistClient};

#[test]
fn test_add_task() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/tasks")
        .match_header("authorization", "Bearer secret-token")
        .match_body(Matcher::Json(json!({
            "content": "milk (2)",
            "project_id": "2203306141"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "1", "content": "milk (2)"}"#)
        .create();

    let client = TodoistClient::with_base_url("secret-token".to_string(), server.url());
    client.add_task("milk (2)", "2203306141").unwrap();
    mock.assert();
}

#[test]
fn test_add_task_rejected() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/tasks")
        .with_status(403)
        .with_body("Forbidden")
        .create();

    let client = TodoistClient::with_base_url("wrong".to_string(), format!("{}/", server.url()));
    match client.add_task("milk", "1") {
        Err(SousError::Export { item, message }) => {
            assert_eq!(item, "milk");
            assert!(message.contains("403"));
        }
        other => panic!("Expected Export error, got {other:?}"),
    }
}

#[test]
fn test_export_shopping_list_with_partial_failure() {
    let mut server = mockito::Server::new();
    let accepted = server
        .mock("POST", "/tasks")
        .match_body(Matcher::Regex(r#""content":"(eggs|salt)""#.to_string()))
        .with_status(200)
        .with_body("{}")
        .expect(2)
        .create();
    let rejected = server
        .mock("POST", "/tasks")
        .match_body(Matcher::PartialJson(json!({"content": "milk (2)"})))
        .with_status(500)
        .with_body("Internal Server Error")
        .expect(1)
        .create();

    let milk = Ingredient::new("milk").with_quantity("1 cup");
    let ingredients = vec![
        milk.clone(),
        Ingredient::new("eggs"),
        milk,
        Ingredient::new("salt"),
    ];
    let list = ShoppingList::new(&ingredients, Format::Compact, None);

    let client = TodoistClient::with_base_url("token".to_string(), server.url());
    let report = export_items(&client, &list.format(), "42");

    assert_eq!(report.exported, 2);
    assert_eq!(report.failures.len(), 1);
    match &report.failures[0] {
        SousError::Export { item, .. } => assert_eq!(item, "milk (2)"),
        other => panic!("Expected Export error, got {other:?}"),
    }
    accepted.assert();
    rejected.assert();
}
