// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use dpkg_catalog::{Catalog, PackageRecord, ScanOptions};
use tracing::info;

#[derive(Parser)]
#[command(name = "dpkg-catalog")]
#[command(author, version, about = "Browse installed Debian packages and their dependencies", long_about = None)]
struct Cli {
    /// Control file to read (plain, gzip, xz or zstd)
    #[arg(short, long, global = true, default_value = "/var/lib/dpkg/status")]
    status: String,

    /// Keep a final record that is not followed by a blank line
    #[arg(long, global = true)]
    flush_trailing: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed packages
    List {
        /// Only packages no other package depends on
        #[arg(long, conflicts_with = "missing")]
        orphans: bool,
        /// List dependency names with no installed package instead
        #[arg(long)]
        missing: bool,
    },
    /// Show one package with its dependencies and reverse dependencies
    Show {
        /// Package name
        package_name: String,
    },
    /// Export the whole catalog as JSON
    Export {
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn render_package(record: &PackageRecord) {
    println!("Package: {}", record.name());
    println!("  Version: {}", record.version());
    println!("  Architecture: {}", record.architecture());
    println!("  Maintainer: {}", record.maintainer());
    println!("  Description: {}", record.simple_description());
    for line in record.extended_description() {
        if line.is_empty() {
            println!();
        } else {
            println!("    {}", line);
        }
    }

    println!("  Depends:");
    if record.dependencies().is_empty() {
        println!("    (none)");
    }
    for (name, resolved) in record.dependencies() {
        let marker = if *resolved { "installed" } else { "not installed" };
        println!("    {} [{}]", name, marker);
    }

    println!("  Required by:");
    if record.reverse_dependencies().is_empty() {
        println!("    (none)");
    }
    for name in record.reverse_dependencies().keys() {
        println!("    {}", name);
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // No command provided, show help
        println!("dpkg-catalog v{}", env!("CARGO_PKG_VERSION"));
        println!("Run 'dpkg-catalog --help' for usage information");
        return Ok(());
    };

    info!("Reading package status from: {}", cli.status);
    let options = ScanOptions {
        flush_trailing_record: cli.flush_trailing,
    };
    let catalog = Catalog::load_with(&cli.status, options)?;

    match command {
        Commands::List { orphans, missing } => {
            if missing {
                let missing = catalog.missing_dependencies();
                for (name, dependents) in &missing {
                    println!("{} (needed by {})", name, dependents.join(", "));
                }
                println!("\nTotal: {} missing dependency name(s)", missing.len());
                return Ok(());
            }

            let records = if orphans {
                catalog.orphans()
            } else {
                catalog.iter().collect()
            };
            for record in &records {
                println!(
                    "  {} {} [{}]",
                    record.name(),
                    record.version(),
                    record.architecture()
                );
            }
            println!("\nTotal: {} package(s)", records.len());
            Ok(())
        }
        Commands::Show { package_name } => {
            let record = catalog
                .get(&package_name)
                .ok_or_else(|| anyhow::anyhow!("Package '{}' is not installed", package_name))?;
            render_package(record);
            Ok(())
        }
        Commands::Export { pretty } => {
            let json = if pretty {
                serde_json::to_string_pretty(&catalog)?
            } else {
                serde_json::to_string(&catalog)?
            };
            println!("{}", json);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_status_path() {
        let cli = Cli::try_parse_from(["dpkg-catalog", "list"]).unwrap();
        assert_eq!(cli.status, "/var/lib/dpkg/status");
        assert!(!cli.flush_trailing);
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                orphans: false,
                missing: false
            })
        ));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dpkg-catalog",
            "show",
            "bash",
            "--status",
            "/tmp/status",
            "--flush-trailing",
        ])
        .unwrap();
        assert_eq!(cli.status, "/tmp/status");
        assert!(cli.flush_trailing);
        assert!(matches!(
            cli.command,
            Some(Commands::Show { package_name }) if package_name == "bash"
        ));
    }

    #[test]
    fn test_orphans_conflicts_with_missing() {
        let result = Cli::try_parse_from(["dpkg-catalog", "list", "--orphans", "--missing"]);
        assert!(result.is_err());
    }
}
