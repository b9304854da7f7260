use clap::{Arg, Command};
use tracing_subscriber::EnvFilter;

use cligpt::app::App;
use cligpt::config::{COMPLETE_MODE_TEMPERATURE, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("cligpt")
        .about("Turn a plain-language task into a shell command, explain it, and run it on confirmation")
        .arg(
            Arg::new("task")
                .help("The task to accomplish, in plain language")
                .num_args(1..),
        )
        .arg(
            Arg::new("complete")
                .long("complete")
                .help("Print only the raw suggested command (for shell completion integration)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("explain")
                .long("explain")
                .help("Print only an explanation of the given command, judged against the task")
                .value_name("COMMAND")
                .num_args(1),
        )
        .arg(
            Arg::new("set-api-key")
                .long("set-api-key")
                .help("Store the OpenAI API key in the config file")
                .value_name("API_KEY")
                .num_args(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Show configuration information")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Handle configuration commands
    if let Some(api_key) = matches.get_one::<String>("set-api-key") {
        let mut config = Config::load()?;
        config.set_api_key(api_key.clone())?;
        println!("API key saved successfully");
        return Ok(());
    }

    if matches.get_flag("config") {
        Config::show_config_info()?;
        return Ok(());
    }

    let mut config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.loglevel.clone())),
        )
        .init();

    // All trailing arguments joined with spaces form the task description
    let prompt = matches
        .get_many::<String>("task")
        .unwrap_or_default()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(command) = matches.get_one::<String>("explain") {
        let app = App::new(&config)?;
        return app.run_explain(command, &prompt).await;
    }

    if prompt.is_empty() {
        eprintln!("No task provided. Use 'cligpt --help' for usage information.");
        return Ok(());
    }

    if matches.get_flag("complete") {
        // Completion integration wants stable output unless configured otherwise
        if config.temperature.command.is_none() {
            config.temperature.command = Some(COMPLETE_MODE_TEMPERATURE);
        }
        let app = App::new(&config)?;
        return app.run_complete(&prompt).await;
    }

    let app = App::new(&config)?;
    app.run_interactive(&prompt).await
}
