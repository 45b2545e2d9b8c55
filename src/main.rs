//! axiom-mirror CLI: inspect and edit an ontology through descriptors.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use axiom_mirror::descriptor::{LINK_INDIVIDUAL, TYPE_INDIVIDUAL, full_layout, layout_by_name};
use axiom_mirror::intent::IntentSummary;
use axiom_mirror::prelude::*;
use axiom_mirror::store::RdfSyntax;

#[derive(Parser)]
#[command(name = "axiom-mirror", version, about = "Typed mirror of ontology axioms")]
struct Cli {
    /// TOML configuration file. Without one, a persistent RDF store in
    /// `--data-dir` is used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory of the RDF store (ignored with `--config`).
    #[arg(long, global = true, default_value = ".axiom-mirror")]
    data_dir: PathBuf,

    /// Namespace short names resolve against (ignored with `--config`).
    #[arg(long, global = true, default_value = "http://example.org/onto#")]
    namespace: String,

    /// Print intents as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Individual,
    Class,
    ObjectProperty,
    DataProperty,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Individual => EntityKind::Individual,
            KindArg::Class => EntityKind::Concept,
            KindArg::ObjectProperty => EntityKind::ObjectProperty,
            KindArg::DataProperty => EntityKind::DataProperty,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Turtle,
    RdfXml,
}

impl From<FormatArg> for RdfSyntax {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Turtle => RdfSyntax::Turtle,
            FormatArg::RdfXml => RdfSyntax::RdfXml,
        }
    }
}

/// The explicit format, else the one the file extension suggests, else Turtle.
fn syntax_for(path: &std::path::Path, format: Option<FormatArg>) -> RdfSyntax {
    format
        .map(RdfSyntax::from)
        .or_else(|| RdfSyntax::from_path(path))
        .unwrap_or_default()
}

#[derive(Subcommand)]
enum Commands {
    /// Read an entity from the store and print its descriptor.
    Show {
        /// Short name or absolute IRI.
        name: String,

        #[arg(long, value_enum, default_value = "individual")]
        kind: KindArg,

        /// Layout name (default: the full layout for the kind).
        #[arg(long)]
        layout: Option<String>,
    },

    /// Link two individuals through an object property.
    Link {
        subject: String,
        property: String,
        object: String,
    },

    /// Remove an object property link between two individuals.
    Unlink {
        subject: String,
        property: String,
        object: String,
    },

    /// Add a class to an individual's types.
    Type { individual: String, class: String },

    /// Load an RDF file (Turtle or RDF/XML) into the store.
    Import {
        file: PathBuf,

        /// Syntax of the file (default: from its extension).
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Write the store to an RDF file.
    Export {
        file: PathBuf,

        /// Syntax of the file (default: from its extension).
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List the built-in descriptor layouts.
    Layouts,
}

fn open(cli: &Cli) -> Result<OntologyRef> {
    let config = match &cli.config {
        Some(path) => MirrorConfig::load(path)?,
        None => {
            let mut config = MirrorConfig::new("cli", Iri::new(cli.namespace.as_str())?);
            config.backend = Backend::Rdf;
            config.data_dir = Some(cli.data_dir.clone());
            config
        }
    };
    Ok(OntologyRef::open(&config)?)
}

fn print_intents(intents: &[MappingIntent], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(intents).into_diagnostic()?);
        return Ok(());
    }
    for intent in intents.iter().filter(|i| i.is_change()) {
        println!("{intent}");
    }
    println!("{}", IntentSummary::of(intents));
    Ok(())
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Show { name, kind, layout } => {
            let onto = open(&cli)?;
            let entity = EntityKind::from(*kind);
            let layout = match layout {
                Some(l) => layout_by_name(l)
                    .ok_or_else(|| miette::miette!("unknown layout: {l} (see `axiom-mirror layouts`)"))?,
                None => full_layout(entity),
            };
            let ground = onto.ground(name, entity)?;
            let mut descriptor = Descriptor::new(ground, layout)?;
            let intents = descriptor.read_axioms()?;
            if !cli.json {
                println!("{descriptor}");
            }
            print_intents(&intents, cli.json)?;
        }

        Commands::Link {
            subject,
            property,
            object,
        }
        | Commands::Unlink {
            subject,
            property,
            object,
        } => {
            let onto = open(&cli)?;
            let mut descriptor = Descriptor::named(&onto, subject, &LINK_INDIVIDUAL)?;
            descriptor.read_axioms()?;
            let property = onto.object_property(property)?;
            let object = onto.individual(object)?;
            if matches!(cli.command, Commands::Link { .. }) {
                descriptor.add_object_link(&property, object)?;
            } else {
                descriptor.remove_object_link(&property, &object)?;
            }
            let intents = descriptor.write_axioms()?;
            onto.synchronize_reasoner()?;
            print_intents(&intents, cli.json)?;
        }

        Commands::Type { individual, class } => {
            let onto = open(&cli)?;
            let mut descriptor = Descriptor::named(&onto, individual, &TYPE_INDIVIDUAL)?;
            descriptor.read_axioms()?;
            descriptor.add(AspectKind::Type, onto.concept(class)?)?;
            let intents = descriptor.write_axioms()?;
            onto.synchronize_reasoner()?;
            print_intents(&intents, cli.json)?;
        }

        Commands::Import { file, format } => {
            let onto = open(&cli)?;
            let added = onto.import(file, syntax_for(file, *format))?;
            println!("imported {added} statements from {}", file.display());
        }

        Commands::Export { file, format } => {
            let onto = open(&cli)?;
            onto.synchronize_reasoner()?;
            let syntax = syntax_for(file, *format);
            onto.export(file, syntax)?;
            println!(
                "exported {} statements to {} ({syntax})",
                onto.store().statement_count()?,
                file.display()
            );
        }

        Commands::Layouts => {
            for layout in axiom_mirror::descriptor::layout::LAYOUTS {
                let aspects: Vec<String> = layout.aspects.iter().map(|a| a.to_string()).collect();
                println!("{:<30} {:<16} {}", layout.name, layout.entity.to_string(), aspects.join(", "));
            }
        }
    }

    Ok(())
}
