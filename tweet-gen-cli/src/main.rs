use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{info, LevelFilter};

use tweet_gen_core::model::chain::Chain;
use tweet_gen_core::model::generation_config::{GenerationConfig, DEFAULT_MAX_LENGTH};
use tweet_gen_core::model::generator::Generator;
use tweet_gen_core::model::random::seeded_source;
use tweet_gen_core::ChainError;

/// Generates random tweets from a Markov chain built over a corpus.
#[derive(Parser, Debug)]
#[command(name = "tweet-gen", version, allow_negative_numbers = true)]
struct Cli {
	/// Seed of the random generator
	seed: i64,

	/// Number of tweets to generate
	tweet_count: usize,

	/// Corpus file, words separated by whitespace
	corpus_file: PathBuf,

	/// Maximum number of words to read from the corpus (0 = all)
	#[arg(default_value_t = 0)]
	words_to_read: usize,

	/// Maximum number of words in a tweet (at least 2)
	#[arg(long, value_name = "WORDS", default_value_t = DEFAULT_MAX_LENGTH)]
	max_length: usize,

	/// Print the learned chain as JSON before the tweets
	#[arg(long)]
	dump_chain: bool,

	/// Increase verbosity (-v, -vv, -vvv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count, conflicts_with = "verbose")]
	quiet: u8,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let stdout = io::stdout();
	match run(&cli, &mut stdout.lock()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Error: {e:#}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8, quiet: u8) {
	let level = match (verbose, quiet) {
		(0, 0) => None,
		(_, 1) => Some(LevelFilter::Error),
		(_, q) if q > 1 => Some(LevelFilter::Off),
		(1, _) => Some(LevelFilter::Info),
		(2, _) => Some(LevelFilter::Debug),
		_ => Some(LevelFilter::Trace),
	};

	// RUST_LOG applies unless -v / -q is given
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	builder.format_timestamp_millis();
	if let Some(level) = level {
		builder.filter_level(level);
	}
	builder.init();
}

/// Builds the chain and writes `cli.tweet_count` tweets to `out`.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
	let config = GenerationConfig::new(cli.tweet_count, cli.max_length)?;

	let chain = Chain::from_file(&cli.corpus_file, cli.words_to_read).map_err(|e| match e {
		ChainError::Io(source) => anyhow::Error::new(source)
			.context(format!("incorrect file path: {}", cli.corpus_file.display())),
		other => anyhow::Error::new(other).context("failed to build the chain"),
	})?;
	info!("Chain ready: {} words, {} transitions", chain.len(), chain.edge_count());

	if cli.dump_chain {
		serde_json::to_writer_pretty(&mut *out, &chain.dump()).context("failed to dump the chain")?;
		writeln!(out)?;
	}

	// Seeds are taken bit for bit, negative ones included
	let mut generator = Generator::new(&chain, seeded_source(cli.seed as u64));
	let tweets = generator
		.generate(&config)
		.with_context(|| format!("cannot generate from {}", cli.corpus_file.display()))?;

	for (i, tweet) in tweets.iter().enumerate() {
		writeln!(out, "Tweet {}: {}", i + 1, tweet)?;
	}
	out.flush()?;
	Ok(())
}
