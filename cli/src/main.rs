//! enews CLI - newsletter HTML from Word documents

use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use enews::render::{to_json, ArticleRenderer};
use enews::{
    detect_format_from_path, extract, parse_file, Article, Conversion, ImageMode, JsonFormat,
    RenderOptions, SourceFormat,
};

type CliResult = Result<(), Box<dyn StdError>>;

#[derive(Parser)]
#[command(name = "enews")]
#[command(author = "polaris")]
#[command(version)]
#[command(about = "Convert Word documents into styled newsletter HTML", long_about = None)]
struct Cli {
    /// Input document (.docx or .txt)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    render: RenderArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write article.html, images/ and manifest.json
    Convert {
        /// Input document (.docx or .txt)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write only the HTML page
    Html {
        /// Input document (.docx or .txt)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write only the numbered images
    Images {
        /// Input document (.docx)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Show document information and conversion statistics
    Info {
        /// Input document (.docx or .txt)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct RenderArgs {
    /// How images appear in the HTML
    #[arg(long, value_enum, env = "ENEWS_IMAGE_MODE")]
    image_mode: Option<ImageModeArg>,

    /// Lines shorter than this (in characters) without closing punctuation become subheadings
    #[arg(long, value_name = "N", env = "ENEWS_HEADING_THRESHOLD")]
    heading_threshold: Option<usize>,

    /// Embed text without HTML escaping
    #[arg(long)]
    raw_text: bool,

    /// Wrap the body in a centered container
    #[arg(long)]
    container: bool,

    /// Value of the html lang attribute
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

impl RenderArgs {
    fn to_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new()
            .with_raw_text(self.raw_text)
            .with_container(self.container);
        if let Some(mode) = self.image_mode {
            options = options.with_image_mode(mode.into());
        }
        if let Some(threshold) = self.heading_threshold {
            options = options.with_heading_threshold(threshold);
        }
        if let Some(ref lang) = self.lang {
            options = options.with_lang(lang);
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ImageModeArg {
    /// Embed images as base64 data URIs
    Inline,
    /// Numbered placeholders; images written separately (default)
    Placeholder,
}

impl From<ImageModeArg> for ImageMode {
    fn from(mode: ImageModeArg) -> Self {
        match mode {
            ImageModeArg::Inline => ImageMode::Inline,
            ImageModeArg::Placeholder => ImageMode::Placeholder,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            render,
        }) => cmd_convert(&input, output.as_deref(), &render),
        Some(Commands::Html {
            input,
            output,
            render,
        }) => cmd_html(&input, output.as_deref(), &render),
        Some(Commands::Images { input, output }) => cmd_images(&input, output.as_deref()),
        Some(Commands::Info { input, render }) => cmd_info(&input, &render),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.render)
            } else {
                println!("{}", "Usage: enews <FILE> [OUTPUT]".yellow());
                println!("       enews --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        log::debug!("{:?}", e);
        eprintln!("{}: {}", "Error".red().bold(), e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  {} {}", "caused by:".red(), cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn file_title(input: &Path) -> Option<String> {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn report_empty(input: &Path) {
    println!(
        "{} {}",
        "No content found in".yellow().bold(),
        input.display().to_string().yellow()
    );
}

/// Parse, extract and render one file.
fn convert(
    input: &Path,
    options: RenderOptions,
    pb: Option<&ProgressBar>,
) -> Result<Conversion, Box<dyn StdError>> {
    let step = |msg: &'static str| {
        if let Some(pb) = pb {
            pb.inc(1);
            pb.set_message(msg);
        }
    };

    if let Some(pb) = pb {
        pb.set_message("Reading document...");
    }
    let document = parse_file(input)?;

    step("Extracting content...");
    let extraction = extract(document);

    step("Rendering HTML...");
    let title = file_title(input);
    let conversion = ArticleRenderer::new(options).render(extraction, title.as_deref());

    step("Writing files...");
    Ok(conversion)
}

fn write_images(article: &Article, dir: &Path) -> Result<usize, Box<dyn StdError>> {
    if article.images.is_empty() {
        return Ok(0);
    }
    fs::create_dir_all(dir)?;
    for image in &article.images {
        fs::write(dir.join(image.filename()), &image.data)?;
    }
    Ok(article.images.len())
}

fn cmd_convert(input: &Path, output: Option<&Path>, render: &RenderArgs) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_enews", stem))
    });

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let conversion = convert(input, render.to_options(), Some(&pb))?;
    let Conversion::Article(article) = conversion else {
        pb.finish_and_clear();
        report_empty(input);
        return Ok(());
    };

    fs::create_dir_all(&output_dir)?;
    fs::write(output_dir.join("article.html"), &article.html)?;
    let image_count = write_images(&article, &output_dir.join("images"))?;
    fs::write(
        output_dir.join("manifest.json"),
        to_json(&article, JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Output files in".green().bold(), output_dir.display());
    println!("  {} article.html", "├─".dimmed());
    println!("  {} manifest.json", "├─".dimmed());
    println!("  {} images/ ({} files)", "└─".dimmed(), image_count);

    if image_count > 0 {
        println!(
            "\n{}",
            "Upload the images in order and paste each URL over the matching placeholder."
                .cyan()
        );
    }

    Ok(())
}

fn cmd_html(input: &Path, output: Option<&Path>, render: &RenderArgs) -> CliResult {
    let Conversion::Article(article) = convert(input, render.to_options(), None)? else {
        report_empty(input);
        return Ok(());
    };

    if let Some(path) = output {
        fs::write(path, &article.html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", article.html);
    }

    if article.has_images() {
        eprintln!(
            "{} {} images were not written; use `enews images` to save them",
            "Note:".yellow().bold(),
            article.images.len()
        );
    }

    Ok(())
}

fn cmd_images(input: &Path, output: Option<&Path>) -> CliResult {
    if detect_format_from_path(input)? == SourceFormat::PlainText {
        println!("{} plain text files carry no images", "Note:".yellow().bold());
        return Ok(());
    }

    let options = RenderOptions::new().placeholder_images();
    let Conversion::Article(article) = convert(input, options, None)? else {
        report_empty(input);
        return Ok(());
    };

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    write_images(&article, &output_dir)?;

    for image in &article.images {
        println!("{} {}", "Extracted".green(), image.filename());
    }
    println!(
        "\n{} {} images extracted",
        "Done!".green().bold(),
        article.images.len()
    );

    Ok(())
}

fn cmd_info(input: &Path, render: &RenderArgs) -> CliResult {
    let conversion = convert(input, render.to_options(), None)?;
    let Conversion::Article(article) = conversion else {
        report_empty(input);
        return Ok(());
    };
    let metadata = &article.metadata;
    let stats = &article.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), metadata.source_format);
    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Document title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Article".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Title".bold(), article.title);
    println!("{}: {}", "Description".bold(), article.meta_description);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}: {} / {} / {}",
        "Headings (h1/h2/h3)".bold(),
        stats.h1_count,
        stats.h2_count,
        stats.h3_count
    );
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Image references".bold(), stats.image_ref_count);
    if stats.unresolved_image_count > 0 {
        println!(
            "{}: {}",
            "Unresolved references".bold().yellow(),
            stats.unresolved_image_count
        );
    }
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "enews".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Newsletter HTML from Word documents");
    println!();
    println!("License: MIT");
}
