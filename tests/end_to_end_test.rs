use async_trait::async_trait;
use httpmock::prelude::*;
use httpmock::Method::HEAD;
use std::fs;
use std::path::Path;
use template_harvester::core::{RepoFetcher, SecretPrompt, TemplateValidator};
use template_harvester::domain::model::ToolExit;
use template_harvester::utils::console::Console;
use template_harvester::{
    CredentialProvider, HarvestConfig, HarvestSettings, Harvester, HttpProbe, Result,
};
use tempfile::TempDir;

struct DirFetcher;

#[async_trait]
impl RepoFetcher for DirFetcher {
    async fn shallow_clone(&self, _url: &str, dest: &Path) -> Result<ToolExit> {
        fs::create_dir_all(dest)?;
        fs::write(dest.join("cve-2024-0001.yaml"), "id: cve-2024-0001\n")?;
        Ok(ToolExit::Success)
    }
}

struct AcceptAll;

#[async_trait]
impl TemplateValidator for AcceptAll {
    async fn validate(&self, _dir: &Path) -> Result<ToolExit> {
        Ok(ToolExit::Success)
    }
}

struct TypedToken(&'static str);

impl SecretPrompt for TypedToken {
    fn prompt_secret(&self, _message: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn test_end_to_end_with_real_http_probe() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("nuclei.txt");
    let env_file = temp_dir.path().join(".env");

    let server = MockServer::start();
    let public_head = server.mock(|when, then| {
        when.method(HEAD).path("/alice/public-templates");
        then.status(200);
    });
    let public_get = server.mock(|when, then| {
        when.method(GET)
            .path("/alice/public-templates")
            .header("Authorization", "token ghp_e2e");
        then.status(200).body("ok");
    });
    let gone_head = server.mock(|when, then| {
        when.method(HEAD).path("/alice/deleted");
        then.status(404);
    });
    let private_head = server.mock(|when, then| {
        when.method(HEAD).path("/alice/private");
        then.status(200);
    });
    let private_get = server.mock(|when, then| {
        when.method(GET).path("/alice/private");
        then.status(403);
    });

    let public = server.url("/alice/public-templates");
    let gone = server.url("/alice/deleted");
    let private = server.url("/alice/private");
    fs::write(&input, format!("{}\n{}\n{}\n", public, gone, private)).unwrap();

    let config = HarvestConfig::from_toml_str(&format!(
        r#"
[workspace]
root = "{}"

[credential]
env_file = "{}"
key = "HARVEST_E2E_TOKEN"

[output]
color = false
"#,
        temp_dir.path().join("nuclei-templates").display(),
        env_file.display()
    ))
    .unwrap();

    let settings = HarvestSettings::from_config(&input, &config).with_console(Console::plain());
    let root = settings.root().to_path_buf();
    let credentials = CredentialProvider::new(
        &config.credential.env_file,
        &config.credential.key,
        TypedToken("ghp_e2e"),
    );

    let harvester = Harvester::new(
        settings,
        HttpProbe::new().unwrap(),
        DirFetcher,
        AcceptAll,
        credentials,
    );

    let summary = harvester.run().await.unwrap();

    public_head.assert();
    public_get.assert();
    gone_head.assert();
    private_head.assert();
    private_get.assert();

    assert_eq!(summary.total_attempts, 3);
    assert_eq!(summary.successful, 1);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.skipped_auth, 1);

    assert!(root
        .join("validated/public-templates_0/cve-2024-0001.yaml")
        .is_file());
    assert!(!root.join("private_2").exists());
    assert_eq!(
        fs::read_to_string(&input).unwrap(),
        format!("{}\n# {}\n{}\n", public, gone, private)
    );
    assert_eq!(
        fs::read_to_string(root.join("attempted.txt")).unwrap(),
        format!("{}\n", public)
    );
    assert_eq!(
        fs::read_to_string(&env_file).unwrap(),
        "HARVEST_E2E_TOKEN='ghp_e2e'\n"
    );
}
