use clap::Parser;
use std::path::PathBuf;

/// Short usage line printed when the arguments are wrong
pub const USAGE: &str = "Usage: yt-transcript <YouTube_URL>";

#[derive(Parser, Debug)]
#[command(
    name = "yt-transcript",
    about = "YouTube Transcript Fetcher - Download a video's transcript with timestamps",
    version,
    long_about = "Fetches the transcript of a YouTube video, preferring English and then \
                  other common languages, and saves it as timestamped text to \
                  youtube_transcript_<video id>.txt."
)]
pub struct Cli {
    /// YouTube video URL (youtube.com/watch?v=... or youtu.be/...)
    #[arg(value_name = "YouTube_URL")]
    pub url: String,

    /// Comma separated transcript languages in order of preference
    #[arg(short, long, value_name = "LANGS", env = "YT_TRANSCRIPT_LANGUAGES")]
    pub languages: Option<String>,

    /// Directory to write the transcript file to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators and the console copy of the transcript
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_url() {
        let cli = Cli::try_parse_from(["yt-transcript", "https://youtu.be/abc"]).unwrap();
        assert_eq!(cli.url, "https://youtu.be/abc");
        assert!(cli.output_dir.is_none());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "yt-transcript",
            "-l",
            "de,en",
            "--output-dir",
            "/tmp/out",
            "-q",
            "https://youtu.be/abc",
        ])
        .unwrap();
        assert_eq!(cli.languages.as_deref(), Some("de,en"));
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
        assert!(cli.quiet);
    }

    #[test]
    fn test_wrong_argument_count() {
        assert!(Cli::try_parse_from(["yt-transcript"]).is_err());
        assert!(Cli::try_parse_from(["yt-transcript", "a", "b"]).is_err());
    }
}
