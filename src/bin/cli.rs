//! CQi CLI Client
//!
//! Command-line interface for querying a CQi server.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cqi::model::Corpus;
use cqi::{Client, Config, Field};
use tracing_subscriber::{fmt, EnvFilter};

/// CQi CLI
#[derive(Parser, Debug)]
#[command(name = "cqi-cli")]
#[command(about = "CLI for CQi corpus servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = cqi::config::DEFAULT_PORT)]
    port: u16,

    /// Username for the handshake
    #[arg(short, long, default_value = "anonymous")]
    user: String,

    /// Password for the handshake
    #[arg(long, default_value = "")]
    password: String,

    /// Inactivity timeout in milliseconds (0 waits forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ping the server
    Ping,

    /// List corpora
    Corpora,

    /// Show a corpus and its attributes
    Info {
        /// Corpus name
        corpus: String,
    },

    /// Run a query and store the result as a subcorpus
    Query {
        /// Corpus name
        corpus: String,

        /// Name of the subcorpus to create
        name: String,

        /// CQP query, including the terminating ';'
        query: String,
    },

    /// Dump match positions of a subcorpus
    Dump {
        /// Subcorpus, as CORPUS:Name
        subcorpus: String,

        /// Field to dump (match, matchend, target, keyword)
        #[arg(short, long, default_value = "match")]
        field: Field,

        /// First match
        #[arg(long, default_value = "0")]
        first: i32,

        /// Last match (defaults to the last one)
        #[arg(long)]
        last: Option<i32>,
    },

    /// Look up attribute values at corpus positions
    Lookup {
        /// Attribute, as CORPUS.attribute
        attribute: String,

        /// Corpus positions
        cpos: Vec<i32>,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cqi=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .credentials(&args.user, &args.password)
        .inactivity_timeout_ms(args.timeout_ms)
        .build();

    let mut client = Client::new(config);
    if let Err(e) = client.connect() {
        tracing::error!("Failed to connect: {}", e);
        return ExitCode::FAILURE;
    }

    let result = run(&mut client, args.command);

    if client.is_connected() {
        if let Err(e) = client.disconnect() {
            tracing::warn!("Disconnect failed: {}", e);
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(client: &mut Client, command: Commands) -> cqi::Result<()> {
    match command {
        Commands::Ping => {
            println!("{}", client.ctrl_ping()?);
        }
        Commands::Corpora => {
            for name in client.corpus_list_corpora()? {
                println!("{}", name);
            }
        }
        Commands::Info { corpus } => {
            let corpus = Corpus::fetch(client, &corpus)?;
            println!("{} ({} tokens, charset {})", corpus.name, corpus.size, corpus.charset);
            for property in &corpus.properties {
                println!("  property   {}", property);
            }
            for attr in corpus.positional_attributes(client)? {
                println!("  positional {} (lexicon {})", attr.name, attr.lexicon_size);
            }
            for attr in corpus.structural_attributes(client)? {
                let values = if attr.has_values { ", with values" } else { "" };
                println!("  structural {} ({} regions{})", attr.name, attr.size, values);
            }
            for attr in corpus.alignment_attributes(client)? {
                println!("  alignment  {} ({} alignments)", attr.name, attr.size);
            }
        }
        Commands::Query { corpus, name, query } => {
            let corpus = Corpus::fetch(client, &corpus)?;
            let subcorpus = corpus.query(client, &name, &query)?;
            println!("{}: {} matches", subcorpus.api_name, subcorpus.size);
        }
        Commands::Dump {
            subcorpus,
            field,
            first,
            last,
        } => {
            let last = match last {
                Some(last) => last,
                None => client.cqp_subcorpus_size(&subcorpus)? - 1,
            };
            if last >= first {
                for cpos in client.cqp_dump_subcorpus(&subcorpus, field, first, last)? {
                    println!("{}", cpos);
                }
            }
        }
        Commands::Lookup { attribute, cpos } => {
            let values = client.cl_cpos2str(&attribute, &cpos)?;
            for (position, value) in cpos.iter().zip(values) {
                println!("{}\t{}", position, value);
            }
        }
    }
    Ok(())
}
