//! `jsonc-edit`: edit JSON-with-comments files in place.
//!
//! Usage:
//!   jsonc-edit get    <file> <path>
//!   jsonc-edit set    <file> <path> <value>
//!   jsonc-edit delete <file> <path>
//!
//! Paths are dotted (`server.ports.0`) or JSON Pointers (`/server/ports/0`). Set `RUST_LOG=debug` to see which
//! edits are skipped or re-serialized.

use jsonc_edit::cli::{parse_args, run};
use std::io::{self, Write};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(|command| run(&command));
    match result {
        Ok(Some(output)) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{output}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
