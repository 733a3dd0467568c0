use clap::{Parser as ClapParser, Subcommand};
use jmesq::cli::{self, CliError, SearchOptions, SearchOutcome};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "jmesq")]
#[command(about = "jmesq - query and reshape JSON documents with JMESPath-style expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query against a JSON document
    Search {
        /// The query to run
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,
    },

    /// List documentation topics
    Docs,

    /// Show documentation for a specific topic
    Doc {
        /// Topic name (use 'jmesq docs' to list topics)
        topic: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            input,
            pretty,
            syntax_only,
        } => run_search(query, input, pretty, syntax_only),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { topic } => cli::get_doc_topic(&topic).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        log::debug!("command failed: {:?}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_search(
    query: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = SearchOptions {
        query,
        input,
        pretty,
        syntax_only,
    };

    match cli::execute_search(&options)? {
        SearchOutcome::SyntaxValid => println!("Syntax is valid"),
        SearchOutcome::Success { rendered, .. } => println!("{}", rendered),
    }
    Ok(())
}
