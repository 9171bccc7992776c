mod support;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use leakward_core::github::{COMMIT_MESSAGE, Credential, GitHubClient};
use leakward_core::templates::TemplateSet;
use leakward_core::types::{DeployMode, DeploymentTarget};

use support::fake_github::{FakeGitHub, FakeServer};

fn names(repos: &[&str]) -> Vec<String> {
    repos.iter().map(|r| r.to_string()).collect()
}

#[tokio::test]
async fn creates_workflow_when_directory_missing() {
    let server = FakeServer::start(FakeGitHub::default()).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();

    let results = client
        .deploy_workflow(&Credential::new("t"), &names(&["acme/api"]), DeployMode::Apply)
        .await;

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].message, "Deployed successfully");

    let writes = server.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(
        writes[0].path,
        "/repos/acme/api/contents/.github/workflows/security.yml"
    );
    let body = writes[0].body.as_ref().expect("json body");
    assert_eq!(body["message"], COMMIT_MESSAGE);
    let decoded = STANDARD
        .decode(body["content"].as_str().unwrap())
        .unwrap();
    assert_eq!(decoded, TemplateSet::builtin().workflow().as_bytes());
}

#[tokio::test]
async fn creates_workflow_when_only_unrelated_workflows_exist() {
    let fake = FakeGitHub::default().with_workflows("acme/api", &["ci.yml", "release.yml"]);
    let server = FakeServer::start(fake).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();

    let results = client
        .deploy_workflow(&Credential::new("t"), &names(&["acme/api"]), DeployMode::Apply)
        .await;

    assert!(results[0].success);
    assert!(!results[0].skipped);
    assert_eq!(server.writes().len(), 1);
}

#[tokio::test]
async fn skips_repository_with_existing_security_workflow() {
    let fake = FakeGitHub::default()
        .with_workflows("acme/one", &["ci.yml", "GitLeaks.yml"])
        .with_workflows("acme/two", &["SECURITY-scan.yaml"]);
    let server = FakeServer::start(fake).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();

    let results = client
        .deploy_workflow(
            &Credential::new("t"),
            &names(&["acme/one", "acme/two"]),
            DeployMode::Apply,
        )
        .await;

    assert!(results.iter().all(|r| r.success && r.skipped));
    assert_eq!(results[0].message, "Workflow already exists");
    assert!(server.writes().is_empty());
}

#[tokio::test]
async fn dry_run_never_touches_the_api() {
    let server = FakeServer::start(FakeGitHub::default()).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();

    let results = client
        .deploy_workflow(
            &Credential::new("t"),
            &names(&["acme/a", "acme/b", "acme/c"]),
            DeployMode::DryRun,
        )
        .await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.success && r.dry_run));
    assert_eq!(results[0].message, "Would deploy (dry run)");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn failures_are_isolated_and_order_is_preserved() {
    let fake = FakeGitHub::default()
        .with_put_status("acme/rejected", 422)
        .with_malformed_dir("acme/garbled")
        .with_workflows("acme/present", &["security.yml"]);
    let server = FakeServer::start(fake).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();
    let input = names(&[
        "acme/rejected",
        "not-a-full-name",
        "acme/garbled",
        "acme/present",
        "acme/fresh",
    ]);

    let results = client
        .deploy_workflow(&Credential::new("t"), &input, DeployMode::Apply)
        .await;

    assert_eq!(results.len(), input.len());
    let targets: Vec<DeploymentTarget> = results.iter().map(|r| r.target.clone()).collect();
    let expected: Vec<DeploymentTarget> = input
        .iter()
        .map(|r| DeploymentTarget::Repo(r.clone()))
        .collect();
    assert_eq!(targets, expected);

    assert!(!results[0].success);
    assert_eq!(results[0].message, "Failed: 422");
    assert!(!results[1].success);
    assert!(results[1].message.contains("owner/name"));
    assert!(!results[2].success);
    assert!(results[2].message.contains("Malformed response"));
    assert!(results[3].success && results[3].skipped);
    assert!(results[4].success);
    assert_eq!(results[4].message, "Deployed successfully");

    let written: Vec<String> = server.writes().into_iter().map(|w| w.path).collect();
    assert_eq!(
        written,
        vec![
            "/repos/acme/rejected/contents/.github/workflows/security.yml".to_string(),
            "/repos/acme/fresh/contents/.github/workflows/security.yml".to_string(),
        ]
    );
}

#[tokio::test]
async fn update_status_200_counts_as_success() {
    let fake = FakeGitHub::default().with_put_status("acme/api", 200);
    let server = FakeServer::start(fake).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();

    let results = client
        .deploy_workflow(&Credential::new("t"), &names(&["acme/api"]), DeployMode::Apply)
        .await;

    assert!(results[0].success);
}

#[tokio::test]
async fn empty_repository_list_yields_no_results() {
    let server = FakeServer::start(FakeGitHub::default()).await;
    let client = GitHubClient::with_api_url(&server.base_url).unwrap();

    let results = client
        .deploy_workflow(&Credential::new("t"), &[], DeployMode::Apply)
        .await;

    assert!(results.is_empty());
    assert!(server.requests().is_empty());
}
