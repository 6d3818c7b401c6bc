//! CLI argument parsing with clap.

use clap::Parser;

/// Generate images from a text prompt with Stability AI.
#[derive(Parser, Debug)]
#[command(name = "realpix", version, about)]
pub struct Cli {
    /// Text prompt describing the desired image.
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Read prompts and commands from stdin instead of generating once.
    #[arg(short, long)]
    pub interactive: bool,

    /// Directory downloads are saved to (overrides the config file).
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Only download the tiles at these indices (repeatable).
    #[arg(short, long = "download", value_name = "INDEX", conflicts_with = "no_download")]
    pub download: Vec<usize>,

    /// Do not download anything; just show the result grid.
    #[arg(long)]
    pub no_download: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the initial prompt from the positional argument or the file flag.
    ///
    /// Interactive mode may start without a prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if no prompt is given outside interactive mode, or if
    /// the prompt file cannot be read.
    pub fn resolve_prompt(&self) -> Result<Option<String>, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(Some(text.clone()))
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path).map(|text| Some(text.trim_end().to_string()))
        } else if self.interactive {
            Ok(None)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a prompt string, use -p/--prompt-file, or run with --interactive",
            ))
        }
    }
}
