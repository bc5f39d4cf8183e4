//! Hack Assembler CLI
//!
//! ```bash
//! hack-assembler Add.asm        # writes Add.hack
//! hack-assembler -vv Pong.asm   # with debug logging
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::{LevelFilter, error, info};

use hack_assembler::assemble_file;

#[derive(ClapParser, Debug)]
#[command(name = "hack-assembler")]
#[command(author = "nand2tetris")]
#[command(version)]
#[command(about = "Assembles Hack assembly (.asm) into Hack machine code (.hack)")]
struct Args {
    /// Assembly source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger. Returns `false` if a logger was already set.
fn init_logging(verbosity: u8) -> bool {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_for(verbosity))
        .chain(std::io::stderr())
        .apply()
        .is_ok()
}

fn main() -> ExitCode {
    let args = Args::parse();
    let logging = init_logging(args.verbose);
    if !logging {
        eprintln!("warning: logger unavailable, only errors will be reported");
    }

    let start = Instant::now();
    info!("assembling {}", args.input.display());

    match assemble_file(&args.input) {
        Ok(output) => {
            info!("done in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
            println!("{} -> {}", args.input.display(), output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            if logging {
                error!("{}: {}", args.input.display(), e);
            } else {
                eprintln!("Error: {}: {}", args.input.display(), e);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn test_second_logger_reports_failure() {
        init_logging(0);
        assert!(!init_logging(1));
    }
}
