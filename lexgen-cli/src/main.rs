use std::path::PathBuf;
use std::process::ExitCode;

use lexgen_core::model::distribution::Distribution;
use lexgen_core::model::generator::{GenerationRequest, Generator};

const USAGE: &str = "usage: lexgen-cli [WORDS] [SYLLABLES] [FILE] \
[--distribution poisson|zipf] [--alphabetize] [--seed N] [--dump-phonology]";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct CliArgs {
    request: GenerationRequest,
    /// Phonology file; the built-in Hrau phonology when absent
    file: Option<PathBuf>,
    /// Print the phonology as JSON instead of generating words
    dump_phonology: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        request: GenerationRequest::default(),
        file: None,
        dump_phonology: false,
    };
    let mut positional = 0;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" | "--distribution" => {
                let value = args.next().ok_or("--distribution needs a value")?;
                cli.request.distribution = value.parse::<Distribution>().map_err(|e| format!("{e}"))?;
            }
            "-a" | "--alphabetize" => cli.request.alphabetize = true,
            "-s" | "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                cli.request.seed = Some(value.parse().map_err(|_| format!("invalid seed: {value}"))?);
            }
            "--dump-phonology" => cli.dump_phonology = true,
            "-h" | "--help" => return Err(USAGE.to_owned()),
            s if s.starts_with('-') => return Err(format!("unknown option {s}\n{USAGE}")),
            s => {
                match positional {
                    0 => cli.request.word_count = s.parse().map_err(|_| format!("invalid word count: {s}"))?,
                    1 => cli.request.syllables_per_word = s.parse().map_err(|_| format!("invalid syllable count: {s}"))?,
                    2 => cli.file = Some(PathBuf::from(s)),
                    _ => return Err(format!("unexpected argument {s}\n{USAGE}")),
                }
                positional += 1;
            }
        }
    }

    Ok(cli)
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    // Built-in phonology unless a file is given
    let app = match &cli.file {
        Some(path) => Generator::from_file(path)?,
        None => Generator::default(),
    };

    if cli.dump_phonology {
        println!("{}", app.phonology().to_json_pretty()?);
        return Ok(());
    }

    log::info!("generating {} words for {}", cli.request.word_count, app.language());
    let words = app.generate(&cli.request)?;
    if !words.is_empty() {
        println!("{}", words.join("\n"));
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
