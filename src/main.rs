use clap::Parser;
use okta_group_export::utils::{logger, prompt::ConsolePrompt};
use okta_group_export::{app, CliArgs, OktaClient};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting okta-group-export");

    let mut prompt = ConsolePrompt;
    let config = match args.resolve(&mut prompt) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if config.verbose {
        tracing::debug!("config: {:?}", config);
    }

    let client = match OktaClient::new(&config.org_url, &config.token) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Failed to create API client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    match app::run(&config, &client, &mut prompt).await {
        Ok(summary) => {
            if summary.rows == 0 {
                println!(
                    "🔶 Group '{}' has no members; wrote a header-only file.",
                    summary.group.name
                );
            }
            println!(
                "✅ Exported {} members of '{}' to {}",
                summary.rows,
                summary.group.name,
                summary.output.display()
            );
        }
        Err(e) => {
            tracing::error!("❌ Export failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
