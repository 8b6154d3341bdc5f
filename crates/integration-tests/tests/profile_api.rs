//! Integration tests for the profile API.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (pr-cli migrate)
//! - The API server running (cargo run -p profile-registry-api)
//! - Network access to ViaCEP
//!
//! Run with: cargo test -p profile-registry-integration-tests -- --ignored

use profile_registry_integration_tests::{
    api_base_url, profile_body, unique_cellphone, unique_cpf, unique_email,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;

async fn post_profile(client: &Client, body: &Value) -> (StatusCode, Value) {
    let resp = client
        .post(format!("{}/profile", api_base_url()))
        .json(body)
        .send()
        .await
        .expect("Failed to send request");
    let status = resp.status();
    let json = resp.json().await.expect("Response was not JSON");
    (status, json)
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_health() {
    let resp = Client::new()
        .get(format!("{}/health", api_base_url()))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_readiness() {
    let resp = Client::new()
        .get(format!("{}/health/ready", api_base_url()))
        .send()
        .await
        .expect("Failed to reach server");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server, database and ViaCEP"]
async fn test_create_profile() {
    let client = Client::new();
    let email = unique_email();
    let body = profile_body(&unique_cpf(), &unique_cellphone(), &email);

    let (status, json) = post_profile(&client, &body).await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    let data = &json["data"];
    assert_eq!(data["email"], email.as_str());
    assert!(data["cnpj"].is_null());
    assert_eq!(data["address"]["zipcode"], "01310100");
    assert_eq!(data["address"]["city"], "São Paulo");
    assert_eq!(data["address"]["state"], "SP");
    assert_eq!(data["address"]["profileId"], data["id"]);
}

#[tokio::test]
#[ignore = "Requires running API server, database and ViaCEP"]
async fn test_create_profile_twice_conflicts() {
    let client = Client::new();
    let body = profile_body(&unique_cpf(), &unique_cellphone(), &unique_email());

    let (first, json) = post_profile(&client, &body).await;
    assert_eq!(first, StatusCode::CREATED, "{json}");

    let (second, json) = post_profile(&client, &body).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "profile-repository.createProfile");
    assert!(
        json["error"]["message"]
            .as_str()
            .expect("message")
            .ends_with("already taken")
    );
}

#[tokio::test]
#[ignore = "Requires running API server, database and ViaCEP"]
async fn test_create_profile_cellphone_taken() {
    let client = Client::new();
    let cellphone = unique_cellphone();

    let (first, json) = post_profile(
        &client,
        &profile_body(&unique_cpf(), &cellphone, &unique_email()),
    )
    .await;
    assert_eq!(first, StatusCode::CREATED, "{json}");

    let (second, json) = post_profile(
        &client,
        &profile_body(&unique_cpf(), &cellphone, &unique_email()),
    )
    .await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(json["error"]["message"], "cellphone already taken");
}

#[tokio::test]
#[ignore = "Requires running API server and ViaCEP"]
async fn test_create_profile_address_mismatch() {
    let mut body = profile_body(&unique_cpf(), &unique_cellphone(), &unique_email());
    body["city"] = Value::from("Rio de Janeiro");
    body["state"] = Value::from("RJ");

    let (status, json) = post_profile(&Client::new(), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "create-profile.addressMismatch");
}

#[tokio::test]
#[ignore = "Requires running API server and ViaCEP"]
async fn test_create_profile_unknown_zip() {
    let mut body = profile_body(&unique_cpf(), &unique_cellphone(), &unique_email());
    body["zipCode"] = Value::from("99999999");

    let (status, json) = post_profile(&Client::new(), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "create-profile.getAddress");
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_create_profile_missing_document() {
    let mut body = profile_body(&unique_cpf(), &unique_cellphone(), &unique_email());
    body.as_object_mut().expect("object").remove("cpf");

    let (status, json) = post_profile(&Client::new(), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["message"], "missing CPF or CNPJ");
    assert_eq!(json["error"]["status"], true);
}
