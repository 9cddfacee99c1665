use clap::{Parser, Subcommand};
use guidepress::assets::AssetStore;
use guidepress::project::Projector;
use guidepress::{config, hours, output, record};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "guidepress")]
#[command(about = "Publish guide records as Zola static-site source")]
#[command(long_about = "\
Publish guide records as Zola static-site source

The admin tool's database is the data source. Export the items table as a
JSON array and guidepress turns each record into a Zola page plus its
images:

  zola/
  ├── content/
  │   ├── locations/7.md             # TOML front matter + description body
  │   └── events/3.md
  └── static/img/
      ├── cover/location/<ref>.jpg   # Cover images
      └── location/7/<ref>.jpg       # Gallery images, one dir per record

Inline image payloads (data:image/...;base64,...) are persisted once under
a content-derived name in the files directory; records referencing the same
image share one stored file.

Location records carry weekly opening hours as seven lines of ranges
(Monday first), e.g. '7.30-15.30,19.30-28'; an end hour past 24 means
open past midnight.

Run 'guidepress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site tree to write content/ and static/ into (overrides config.toml)
    #[arg(long, global = true)]
    site_root: Option<PathBuf>,

    /// Directory for content-addressed image originals (overrides config.toml)
    #[arg(long, global = true)]
    files_dir: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish all records from an export file into the site tree
    Publish {
        /// Exported items file (JSON array of {id, data, createdAt, updatedAt})
        items: PathBuf,
    },
    /// Validate an export file without writing anything
    Check {
        /// Exported items file
        items: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Publish { items } => {
            let config = resolve_config(&cli)?;
            let records = record::load_records(items)?;

            println!("==> Publishing {} records to {}", records.len(), config.site_root.display());
            let projector = Projector::new(&config.site_root, AssetStore::new(&config.files_dir));
            let published = projector.publish_all(&records)?;
            output::print_publish_output(&records, &published);
        }
        Command::Check { items } => {
            let records = record::load_records(items)?;

            for record in &records {
                if let Some(text) = &record.opening_hours {
                    hours::parse_week(text)
                        .map_err(|e| format!("record {} ({}): {e}", record.id, record.title))?;
                }
            }
            output::print_check_output(&records);
            println!("==> Export is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Merge config.toml with CLI flag overrides.
fn resolve_config(cli: &Cli) -> Result<config::SiteConfig, config::ConfigError> {
    let mut config = config::load_config(&cli.config)?;
    if let Some(site_root) = &cli.site_root {
        config.site_root = site_root.clone();
    }
    if let Some(files_dir) = &cli.files_dir {
        config.files_dir = files_dir.clone();
    }
    config.validate()?;
    Ok(config)
}
