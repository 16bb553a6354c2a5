//! Line-oriented driver for the urlcanon engine.
//!
//! Reads one URL per line, writes one canonical URL per line in the same
//! order, and reports failures on stderr. A producer thread feeds lines
//! over a bounded channel; strict mode cancels the whole pipeline on the
//! first normalization failure.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::Arc;
use std::thread;

use clap::Parser;
use tracing::debug;

use urlcanon::{logging, normalize, schemes};

/// Lines in flight between the reader and the normalizer.
const CHANNEL_CAPACITY: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "urlcanon",
    about = "Normalizes URLs. Input must be URLs line by line, from a file or stdin.",
    after_help = "Examples:\n  \
        urlcanon -f urls.txt -o normalized_urls.txt\n  \
        cat urls.txt | urlcanon > normalized_urls.txt\n\n  \
        # Strict mode enabled. Any parsing error stops processing\n  \
        urlcanon -f urls.txt -o normalized_urls.txt -s"
)]
struct Args {
    /// Input filename (stdin if omitted)
    #[arg(short = 'f', value_name = "FILENAME")]
    input: Option<PathBuf>,

    /// Output filename (stdout if omitted)
    #[arg(short = 'o', value_name = "FILENAME")]
    output: Option<PathBuf>,

    /// Strict mode. Stop processing after the first error.
    #[arg(short = 's')]
    strict: bool,
}

/// One input line with its 1-based position.
struct Line {
    text: String,
    pos: usize,
}

fn main() {
    logging::init_tracing();

    let args = Args::parse();
    debug!(schemes = schemes::count(), "scheme registry loaded");

    let input: Box<dyn BufRead + Send> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(err) => {
                eprintln!("{}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let output: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(err) => {
                eprintln!("{}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    let label = args
        .input
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let (succeeded, failed) = run(input, output, &label, args.strict);

    eprintln!("normalized: {succeeded}; failed: {failed}");
}

/// Drive the pipeline: normalize every non-blank line of `input` and write
/// the results to `output`. Returns the success/failure counters.
fn run<R, W>(input: R, mut output: W, input_label: &str, strict: bool) -> (u64, u64)
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let rx = spawn_reader(input, Arc::clone(&cancel));

    let mut succeeded: u64 = 0;
    let mut failed: u64 = 0;

    for line in rx {
        if line.text.is_empty() {
            continue;
        }

        let url = match normalize(&line.text) {
            Ok(url) => url,
            Err(err) => {
                failed += 1;
                debug!(error = %err, pos = line.pos, "normalization failed");
                eprintln!(
                    "parse error at \"{}:{}\": {}",
                    input_label, line.pos, line.text
                );
                if strict {
                    cancel.store(true, Ordering::Relaxed);
                    break;
                }
                continue;
            }
        };

        if let Err(err) = writeln!(output, "{url}") {
            cancel.store(true, Ordering::Relaxed);
            eprintln!("{err}");
            break;
        }

        succeeded += 1;
    }

    if let Err(err) = output.flush() {
        eprintln!("{err}");
    }

    (succeeded, failed)
}

/// Read lines on a dedicated thread, pushing them through a bounded
/// channel until the input ends or `cancel` is raised.
fn spawn_reader<R>(input: R, cancel: Arc<AtomicBool>) -> Receiver<Line>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = sync_channel::<Line>(CHANNEL_CAPACITY);

    thread::spawn(move || {
        for (idx, line) in input.lines().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let text = match line {
                Ok(text) => text,
                Err(err) => {
                    debug!(error = %err, "input read failed");
                    return;
                }
            };
            if tx.send(Line { text, pos: idx + 1 }).is_err() {
                return;
            }
        }
    });

    rx
}
