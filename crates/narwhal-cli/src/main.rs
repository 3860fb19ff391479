use narwhal::{GraphDoc, HierarchyGraph, SolveOptions};
use serde::Serialize;
use std::io::Read;
use std::time::Instant;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(narwhal::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Order,
    Report,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    seed: Option<u64>,
    rounds: Option<usize>,
}

#[derive(Serialize)]
struct ReportOut<'a> {
    layout: &'a [String],
    stats: &'a narwhal::SolveStats,
    elapsed_ms: f64,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [order] [--seed <n>] [--rounds <n>] [<path>|-]\n\
  narwhal-cli report [--pretty] [--seed <n>] [--rounds <n>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the graph document is read from stdin.\n\
  - order prints the final node ordering as one space-joined line.\n\
  - report prints a JSON object with the layout and the solve statistics.\n\
  - Without --seed the random moves are seeded from entropy and runs are\n\
    not reproducible.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "order" => args.command = Command::Order,
            "report" => args.command = Command::Report,
            "--pretty" => args.pretty = true,
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--rounds" => {
                let Some(rounds) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.rounds = Some(
                    rounds
                        .parse::<usize>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let doc = GraphDoc::from_json(&text)?;
    let graph = HierarchyGraph::from_doc(&doc)?;

    let mut options = SolveOptions {
        seed: args.seed,
        ..Default::default()
    };
    if let Some(rounds) = args.rounds {
        options.max_rounds = rounds;
    }

    let start = Instant::now();
    let result = narwhal::solve(&graph, options);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    match args.command {
        Command::Order => println!("{}", result.layout.join(" ")),
        Command::Report => write_json(
            &ReportOut {
                layout: &result.layout,
                stats: &result.stats,
                elapsed_ms,
            },
            args.pretty,
        )?,
    }

    Ok(())
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
