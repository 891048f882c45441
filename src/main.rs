use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ipwatch::application::config::AppConfig;
use ipwatch::application::services::monitor::MonitorService;
use ipwatch::domain::ports::journal::IntervalJournal;
use ipwatch::domain::ports::notifier::ChangeNotifier;
use ipwatch::domain::value_objects::Verbosity;
use ipwatch::infrastructure::journal::{CsvJournal, StdoutJournal};
use ipwatch::infrastructure::notifications::{
    CompositeNotifier, TerminalNotifier, WebhookNotifier,
};
use ipwatch::infrastructure::probes::HttpProbe;
use ipwatch::presentation::cli::app::{Cli, Commands, WatchArgs};
use ipwatch::presentation::cli::commands::query::run_query;
use ipwatch::presentation::cli::commands::report::run_report;
use ipwatch::presentation::cli::commands::watch::run_watch;

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    // stdout belongs to the journal and the status line.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        AppConfig::load_from(path)?
    } else {
        AppConfig::load()?
    };

    match cli.command {
        Some(Commands::Query { json }) => {
            let probe = HttpProbe::new(config.general.url.clone())?;
            run_query(&probe, json).await?;
        }
        Some(Commands::Report { file, json }) => {
            run_report(&file, json)?;
        }
        Some(Commands::Watch(args)) => watch(&config, args).await?,
        None => watch(&config, WatchArgs::default()).await?,
    }

    Ok(())
}

async fn watch(config: &AppConfig, args: WatchArgs) -> anyhow::Result<()> {
    // CLI flags override their config-file counterparts.
    let interval_secs = args.interval.unwrap_or(config.general.interval_secs);
    let url = args.url.unwrap_or_else(|| config.general.url.clone());
    let directory = args
        .directory
        .unwrap_or_else(|| config.output.directory.clone());
    let prefix = args.prefix.unwrap_or_else(|| config.output.prefix.clone());

    // In stdout mode the journal owns the status line, so the console
    // notifier drops to quiet.
    let verbosity = Verbosity::from_flags(args.quiet || args.stdout, args.silent);

    // Manual DI: this is the only place that knows concrete types
    let probe = HttpProbe::new(url.clone())?;

    let (journal, destination): (Box<dyn IntervalJournal>, String) = if args.stdout {
        (Box::new(StdoutJournal::new()), "standard output".to_string())
    } else {
        let journal = CsvJournal::create(&directory, &prefix, Local::now())?;
        let destination = journal.path().display().to_string();
        (Box::new(journal), destination)
    };

    let mut notifiers: Vec<Box<dyn ChangeNotifier>> =
        vec![Box::new(TerminalNotifier::new(verbosity))];
    if let Some(ref webhook_url) = config.notifications.webhook_url {
        notifiers.push(Box::new(WebhookNotifier::new(webhook_url.clone())?));
    }
    let notifier = CompositeNotifier::new(notifiers);

    notifier.announce_start(&url, interval_secs, &destination)?;

    let mut service = MonitorService::new(&probe, &*journal, &notifier);
    run_watch(&mut service, interval_secs).await
}
