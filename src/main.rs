use clap::Parser;
use log::error;
use nalgebra::DMatrix;
use signed_mises::invariants::sign_of_trace;
use signed_mises::walker::{process_archive, WalkerConfig};
use std::process::ExitCode;

/// Add a signed von Mises equivalent stress field (S_MISES) to each frame
/// of the given result archives which contains stress results. The sign is
/// taken from the trace of the stress tensor, distinguishing tensile- from
/// compressive-dominated states.
#[derive(Parser, Debug)]
#[command(name = "s_mises", version, about, long_about = None)]
struct Args {
    /// Result archives to process in place (.json/.bin, optionally .xz/.zst)
    #[arg(value_name = "ARCHIVE")]
    paths: Vec<String>,

    /// Run the embedded self-tests and exit
    #[arg(long)]
    test: bool,
}

enum Command {
    SelfTest,
    Process(String),
}

impl Args {
    fn commands(&self) -> Vec<Command> {
        if self.test {
            return vec![Command::SelfTest];
        }
        self.paths.iter().cloned().map(Command::Process).collect()
    }
}

fn check(ok: &mut bool, name: &str, passed: bool) {
    println!("{}: {}", name, if passed { "ok" } else { "FAILED" });
    *ok &= passed;
}

/// Verbose check of the sign calculator against known batches, mirroring
/// what `cargo test` covers for embedders without the test harness.
fn run_self_test() -> bool {
    let mut ok = true;
    let tensors = DMatrix::from_row_slice(
        3,
        6,
        &[
            0.1, 0.2, -0.4, 0.4, 0.5, 0.6, //
            0.2, 0.0, -0.2, 0.3, -0.5, 0.0, //
            0.2, 0.0, 0.0, 0.3, -0.5, 0.0,
        ],
    );
    match sign_of_trace(&tensors) {
        Ok(signs) => {
            check(
                &mut ok,
                "sign_of_trace worked example",
                signs.as_slice() == [-1.0, 1.0, 1.0].as_slice(),
            );
            check(&mut ok, "zero trace maps to +1", signs[1] == 1.0);
        }
        Err(e) => {
            println!("sign_of_trace worked example: FAILED ({})", e);
            ok = false;
        }
    }
    check(
        &mut ok,
        "non-tensor width rejected",
        sign_of_trace(&DMatrix::zeros(2, 5)).is_err(),
    );
    ok
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let config = WalkerConfig::default();
    let echo_paths = args.paths.len() > 1;

    let mut failures = 0;
    for command in args.commands() {
        match command {
            Command::SelfTest => {
                if !run_self_test() {
                    failures += 1;
                }
            }
            Command::Process(path) => {
                if echo_paths {
                    println!("{}", path);
                }
                // one bad archive should not block the rest of the batch
                if let Err(e) = process_archive(&path, &config) {
                    error!("{}: {}", path, e);
                    eprintln!("error processing {}: {}", path, e);
                    failures += 1;
                }
            }
        }
    }
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
