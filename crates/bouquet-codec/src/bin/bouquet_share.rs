use std::{
    fs::File,
    io::{self, BufReader, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use bouquet_codec::{Bouquet, DecodeOptions, Decoder};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const BROKEN_LINK: &str =
    "this bouquet link is broken or incomplete; ask the sender for a new one or build a fresh bouquet";

#[derive(Parser, Debug)]
#[command(name = "bouquet-share", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Log every decode stage to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Longest accepted payload, in bytes.
    #[arg(long, global = true, default_value_t = DecodeOptions::DEFAULT_MAX_ENCODED_LEN)]
    max_encoded_len: usize,

    /// Longest accepted decompressed JSON, in UTF-16 units.
    #[arg(long, global = true, default_value_t = DecodeOptions::DEFAULT_MAX_DECOMPRESSED_LEN)]
    max_decompressed_len: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode bouquet JSON into a share payload.
    Encode {
        /// Bouquet JSON file; stdin when omitted.
        #[arg(long = "in")]
        in_path: Option<PathBuf>,
    },
    /// Build a full share link for bouquet JSON.
    Link {
        /// Site root the viewer lives under, e.g. https://example.com/bouquet/.
        #[arg(long)]
        base_url: String,

        /// Bouquet JSON file; stdin when omitted.
        #[arg(long = "in")]
        in_path: Option<PathBuf>,
    },
    /// Decode a share payload and print the bouquet as JSON.
    Decode { payload: String },
    /// Decode the bouquet carried by a share link.
    Open { link: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = DecodeOptions {
        max_encoded_len: cli.max_encoded_len,
        max_decompressed_len: cli.max_decompressed_len,
    };

    match cli.cmd {
        Command::Encode { in_path } => {
            let bouquet = read_bouquet(in_path.as_deref())?;
            println!("{}", bouquet_codec::encode(&bouquet));
        }
        Command::Link { base_url, in_path } => {
            let bouquet = read_bouquet(in_path.as_deref())?;
            let link = bouquet_codec::share_link(&base_url, &bouquet)
                .with_context(|| format!("build link under '{base_url}'"))?;
            println!("{link}");
        }
        Command::Decode { payload } => {
            let bouquet = Decoder::new().with_options(options).decode(payload.trim());
            print_bouquet(bouquet)?;
        }
        Command::Open { link } => {
            let bouquet = Decoder::new().with_options(options).decode_link(link.trim());
            print_bouquet(bouquet)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_bouquet(path: Option<&Path>) -> anyhow::Result<Bouquet> {
    let bouquet = match path {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open bouquet '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| format!("parse bouquet JSON '{}'", path.display()))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("read bouquet JSON from stdin")?;
            serde_json::from_str(&buf).context("parse bouquet JSON from stdin")?
        }
    };
    Ok(bouquet)
}

fn print_bouquet(bouquet: Option<Bouquet>) -> anyhow::Result<()> {
    let Some(bouquet) = bouquet else {
        anyhow::bail!(BROKEN_LINK);
    };
    println!("{}", serde_json::to_string_pretty(&bouquet)?);
    Ok(())
}
