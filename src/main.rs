use clap::Parser;
use template_harvester::utils::{logger, validation::Validate};
use template_harvester::{
    CliArgs, CredentialProvider, DialoguerPrompt, GitFetcher, Harvester, HarvestConfig,
    HarvestError, HarvestSettings, HttpProbe, NucleiValidator,
};

fn fail(e: HarvestError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    logger::init_cli_logger();
    tracing::info!("Starting template-harvester");
    tracing::debug!("CLI args: {:?}", args);

    let config = HarvestConfig::discover().unwrap_or_else(|e| fail(e));
    if let Err(e) = config.validate() {
        fail(e);
    }

    let settings = HarvestSettings::from_config(&args.file, &config);
    let probe = HttpProbe::new().unwrap_or_else(|e| fail(e));
    let fetcher = GitFetcher::new(&config.tools.git, config.tools.clone_depth);
    let validator = NucleiValidator::new(&config.tools.scanner);
    let credentials = CredentialProvider::new(
        &config.credential.env_file,
        &config.credential.key,
        DialoguerPrompt,
    );

    let harvester = Harvester::new(settings, probe, fetcher, validator, credentials);

    // Per-URL failures are reported in the summary, never through the exit code.
    match harvester.run().await {
        Ok(summary) => harvester.report(&summary),
        Err(e) => fail(e),
    }
}
