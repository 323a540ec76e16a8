use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use conceptkg::detect::{detect_concepts, CommandDetector, ObjectDetector, StaticDetector};
use conceptkg::pipeline::user_message;
use conceptkg::present::{concept_table, write_concepts_file, CONCEPTS_FILE_NAME};
use conceptkg::{graph, logging, Config, ConceptSet, OutputKind, Pipeline, PipelineOutput};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "conceptkg")]
#[command(version, about = "Detect objects in an image and explore their ConceptNet knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect objects in an image and list the concepts
    Detect {
        /// Image to analyse
        image: PathBuf,

        /// Also write the concept list to a file (default: detected_concepts.txt)
        #[arg(long, num_args = 0..=1, default_missing_value = CONCEPTS_FILE_NAME)]
        download: Option<PathBuf>,
    },
    /// Build the knowledge graph and print it as Graphviz DOT
    Graph(RunArgs),
    /// Build the knowledge graph and print its RDF (Turtle) description
    Describe(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Image to detect concepts in
    #[arg(long, conflicts_with = "concepts")]
    image: Option<PathBuf>,

    /// Seed concepts given directly (comma separated)
    #[arg(long, value_delimiter = ',')]
    concepts: Vec<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Query the store as it is, without fetching new relations
    #[arg(long)]
    skip_fetch: bool,

    /// Also write the concept list to a file (default: detected_concepts.txt)
    #[arg(long, num_args = 0..=1, default_missing_value = CONCEPTS_FILE_NAME)]
    download: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load()?;
    if let Some(path) = logging::init(&config.logging) {
        eprintln!("Logging to {}", path.display());
    }
    log::info!("Starting ConceptKG v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Detect { image, download } => {
            let detector = command_detector(&config)?;
            let concepts = detect(detector, image).await?;
            show_concepts(&concepts, download.as_deref(), std::io::stdout())?;
            if concepts.is_empty() {
                eprintln!("No objects detected in the image. Please try another image.");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Graph(args) => run_pipeline(&config, args, OutputKind::Graph).await,
        Command::Describe(args) => run_pipeline(&config, args, OutputKind::Description).await,
    }
}

fn command_detector(config: &Config) -> Result<Box<dyn ObjectDetector>> {
    let detector = CommandDetector::from_config(&config.detection).ok_or_else(|| {
        anyhow::anyhow!("No detector configured. Set [detection] command in config.toml or pass --concepts.")
    })?;
    Ok(Box::new(detector))
}

/// Detection shells out and blocks, so it runs off the async executor.
async fn detect(detector: Box<dyn ObjectDetector>, image: PathBuf) -> Result<ConceptSet> {
    let concepts =
        tokio::task::spawn_blocking(move || detect_concepts(detector.as_ref(), &image)).await?;
    Ok(concepts)
}

/// Print the concept table to `out` and optionally write the concept list.
fn show_concepts(
    concepts: &ConceptSet,
    download: Option<&Path>,
    mut out: impl Write,
) -> Result<()> {
    writeln!(out, "Detected Concepts")?;
    write!(out, "{}", concept_table(concepts))?;
    if let Some(path) = download {
        write_concepts_file(concepts, path)?;
        eprintln!("Concept list written to {}", path.display());
    }
    Ok(())
}

async fn run_pipeline(config: &Config, args: RunArgs, kind: OutputKind) -> Result<ExitCode> {
    let detector: Box<dyn ObjectDetector> = match &args.image {
        Some(_) => command_detector(config)?,
        None if !args.concepts.is_empty() => Box::new(StaticDetector::new(args.concepts.clone())),
        None => anyhow::bail!("Pass --image <IMAGE> or --concepts <a,b,...>"),
    };
    let image = args.image.clone().unwrap_or_default();

    let concepts = detect(detector, image).await?;
    // stdout carries the graph text, so the table goes to stderr
    show_concepts(&concepts, args.download.as_deref(), std::io::stderr())?;

    let pipeline = Pipeline::from_config(config)?;
    let output = match pipeline.run(&concepts, kind, args.skip_fetch).await {
        Ok(output) => output,
        Err(e) => {
            log::error!("Pipeline failed: {}", e);
            eprintln!("{}", user_message(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let text = match output {
        PipelineOutput::Graph(g) => {
            if g.is_empty() {
                eprintln!("No relations found.");
            }
            graph::to_dot(&g, &concepts)
        }
        PipelineOutput::Description(text) => {
            if text.is_empty() {
                eprintln!("No relations found.");
            }
            text
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)?;
            println!("Output written to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_defaults_to_concepts_file() {
        let cli = Cli::try_parse_from(["conceptkg", "graph", "--concepts", "dog", "--download"])
            .unwrap();
        let Command::Graph(args) = cli.command else {
            panic!("expected graph command");
        };
        assert_eq!(args.download, Some(PathBuf::from(CONCEPTS_FILE_NAME)));

        let cli = Cli::try_parse_from(["conceptkg", "detect", "img.jpg", "--download", "out.txt"])
            .unwrap();
        let Command::Detect { download, .. } = cli.command else {
            panic!("expected detect command");
        };
        assert_eq!(download, Some(PathBuf::from("out.txt")));

        let cli = Cli::try_parse_from(["conceptkg", "describe", "--concepts", "dog"]).unwrap();
        let Command::Describe(args) = cli.command else {
            panic!("expected describe command");
        };
        assert_eq!(args.download, None);
    }

    #[test]
    fn test_concept_table_goes_to_given_writer() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONCEPTS_FILE_NAME);
        let concepts = ConceptSet::from_labels(["dog", "frisbee"]);
        let mut out = Vec::new();

        show_concepts(&concepts, Some(&path), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Detected Concepts\n"));
        assert!(text.contains("| frisbee "));
        assert!(!text.contains("written to"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dog\nfrisbee");
    }
}
