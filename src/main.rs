//! folio - render article HTML and print its table of contents

use std::fmt::Write as _;
use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use folio::{Article, Media, OutlineNode, RenderNode};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Render article HTML and its table of contents", long_about = None)]
#[command(after_help = "EXAMPLES:
    folio post.html                  Print the table of contents
    folio post.html -f tree          Print the render tree
    cat post.html | folio - -f json  Dump tree and outline as JSON")]
struct Cli {
    /// Input HTML file, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Nested Markdown list of heading links
    Outline,
    /// Indented render tree
    Tree,
    /// Tree, outline and active section as JSON
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> folio::Result<()> {
    let article = if cli.input == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        Article::from_bytes(&bytes)
    } else {
        Article::open(&cli.input)?
    };

    match cli.format {
        Format::Outline => print!("{}", render_outline(article.outline())),
        Format::Tree => print!("{}", render_tree(article.tree().nodes())),
        Format::Json => println!("{}", article.to_json(cli.pretty)?),
    }

    if !cli.quiet && !matches!(cli.format, Format::Json) {
        eprintln!(
            "{}: {} top-level nodes, {} headings",
            cli.input,
            article.tree().nodes().len(),
            article.headings().len()
        );
    }

    Ok(())
}

fn render_outline(outline: &[OutlineNode]) -> String {
    let mut out = String::new();
    write_outline(&mut out, outline, 0);
    out
}

fn write_outline(out: &mut String, nodes: &[OutlineNode], depth: usize) {
    for node in nodes {
        let _ = writeln!(
            out,
            "{}- [{}]({})",
            "  ".repeat(depth),
            node.heading.text,
            node.href()
        );
        write_outline(out, &node.children, depth + 1);
    }
}

fn render_tree(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    write_tree(&mut out, nodes, 0);
    out
}

fn write_tree(out: &mut String, nodes: &[RenderNode], depth: usize) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        let _ = match node {
            RenderNode::Text(text) => writeln!(out, "{indent}{:?}", text),
            RenderNode::Void { tag, .. } => writeln!(out, "{indent}<{tag} />"),
            RenderNode::Media(Media::Image { src, alt }) => {
                writeln!(out, "{indent}[image {src:?} alt={alt:?}]")
            }
            RenderNode::Media(Media::Video { poster, sources }) => writeln!(
                out,
                "{indent}[video poster={:?} sources={}]",
                poster.as_deref().unwrap_or(""),
                sources.len()
            ),
            RenderNode::Code { language, source } => writeln!(
                out,
                "{indent}[code {} {} lines]",
                language.as_deref().unwrap_or("-"),
                source.lines().count()
            ),
            RenderNode::Element { tag, attrs, .. } => match attrs.get("id") {
                Some(id) => writeln!(out, "{indent}<{tag} #{id}>"),
                None => writeln!(out, "{indent}<{tag}>"),
            },
        };
        write_tree(out, node.children(), depth + 1);
    }
}
