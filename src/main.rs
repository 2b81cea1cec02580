use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use youtube_transcript_fetcher::cli::{Cli, USAGE};
use youtube_transcript_fetcher::{output, Config, TranscriptFetcher};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("{}", USAGE);
            let _ = err.print();
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let default_filter = if cli.verbose {
        "youtube_transcript_fetcher=debug,yt_transcript=debug"
    } else {
        "youtube_transcript_fetcher=info,yt_transcript=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!("Ignoring configuration file: {:#}", err);
        Config::default()
    });
    if let Some(languages) = &cli.languages {
        config = config.with_languages(languages);
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = Some(dir.clone());
    }

    println!("Fetching transcript for '{}'...", cli.url);

    let transcript = match TranscriptFetcher::new(&config) {
        Ok(fetcher) => fetcher.show_progress(!cli.quiet).get_transcript(&cli.url).await,
        Err(err) => {
            println!("Error fetching transcript: {:#}", err);
            None
        }
    };

    let Some(transcript) = transcript else {
        println!("Failed to retrieve transcript.");
        return;
    };

    if !cli.quiet {
        output::print_to_console(&transcript);
    }

    match output::save_transcript(&cli.url, &transcript, &config.output_dir()) {
        Ok(path) => println!("\nTranscript saved to '{}'.", path.display()),
        Err(err) => {
            tracing::error!("{:#}", err);
            println!("Failed to save transcript: {:#}", err);
        }
    }
}
