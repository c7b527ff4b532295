use clap::Parser;
use std::path::PathBuf;

use pdf2word::{DEFAULT_DATA_DIR, DEFAULT_SCHEMA_FILE, SchemaValidator};

#[derive(Parser)]
#[command(
    name = "validate-json",
    version,
    about = "Validate extracted JSON documents against a JSON Schema"
)]
struct Args {
    /// Schema every document must satisfy
    #[arg(long, default_value = DEFAULT_SCHEMA_FILE)]
    schema: PathBuf,
    /// Directory whose *.json files are validated
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let validator = match SchemaValidator::from_file(&args.schema) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}: {e}", args.schema.display());
            std::process::exit(1);
        }
    };

    if let Err(e) = validator.validate_dir(&args.data_dir, |outcome| println!("{outcome}")) {
        eprintln!("Error: {}: {e}", args.data_dir.display());
        std::process::exit(1);
    }
}
