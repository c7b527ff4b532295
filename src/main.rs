use clap::Parser;
use std::path::PathBuf;

const USAGE: &str = "Usage: pdf2word <input_pdf> <output_docx>";

#[derive(Parser)]
#[command(
    name = "pdf2word",
    about = "Convert PDF files to Word documents",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Input PDF file
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,
    /// Output DOCX file
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            log::debug!("{e}");
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    let result = pdf2word::convert_pdf_to_docx(&args.input, &args.output);
    println!("{}", result.to_json_line());
}
