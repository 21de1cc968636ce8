// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("dpkg-catalog")
        .version(env!("CARGO_PKG_VERSION"))
        .author("dpkg-catalog Contributors")
        .about("Browse installed Debian packages and their dependencies")
        .subcommand_required(false)
        .arg(
            Arg::new("status")
                .short('s')
                .long("status")
                .value_name("PATH")
                .global(true)
                .default_value("/var/lib/dpkg/status")
                .help("Control file to read (plain, gzip, xz or zstd)"),
        )
        .arg(
            Arg::new("flush_trailing")
                .long("flush-trailing")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Keep a final record that is not followed by a blank line"),
        )
        .subcommand(
            Command::new("list")
                .about("List installed packages")
                .arg(
                    Arg::new("orphans")
                        .long("orphans")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("missing")
                        .help("Only packages no other package depends on"),
                )
                .arg(
                    Arg::new("missing")
                        .long("missing")
                        .action(ArgAction::SetTrue)
                        .help("List dependency names with no installed package instead"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show one package with its dependencies and reverse dependencies")
                .arg(Arg::new("package_name").required(true).help("Package name")),
        )
        .subcommand(
            Command::new("export")
                .about("Export the whole catalog as JSON")
                .arg(
                    Arg::new("pretty")
                        .short('p')
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print the JSON output"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("dpkg-catalog.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
