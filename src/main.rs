use altona_site::{config, generate, output, server};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "altona-site")]
#[command(about = "Build and serve the Villa Altona Goa site")]
#[command(long_about = "\
Build and serve the Villa Altona Goa site

The site is one page: a hero photo, a grid of four more, and a lightbox that
steps through the whole gallery with wrap-around. Every lightbox state is
rendered to its own page, so the output needs no JavaScript.

Source structure:

  site/
  ├── config.toml        # Listing copy, colors, animation, backend, gallery
  └── assets/            # Copied to the output root (images, favicon)

Output structure:

  dist/
  ├── index.html         # Gallery closed
  ├── gallery/N.html     # Lightbox open at image N
  └── backend.json       # Public backend client config

Run 'altona-site gen-config' to print a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site into the output directory
    Build,
    /// Validate config and gallery without writing anything
    Check,
    /// Serve the output directory over HTTP
    Serve(ServeArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Port to listen on (overrides config and PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (overrides config and ALTONA_HOST)
    #[arg(long)]
    host: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let site = generate::build(&cli.source, &cli.output)?;
            output::print_generate_output(&site);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let gallery = site_config.gallery();
            output::print_gallery_output(&gallery);
            println!("==> Site is valid");
        }
        Command::Serve(args) => {
            let mut site_config =
                config::load_serve_config(&cli.source, |key| std::env::var(key).ok())?;
            if let Some(port) = args.port {
                site_config.server.port = port;
            }
            if let Some(host) = args.host {
                site_config.server.host = host;
            }
            site_config.validate()?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(&site_config.server, cli.output))?;
            info!("Bye");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
