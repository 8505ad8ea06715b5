#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = ptour_cli::run_from_env() {
        eprintln!("ptour: {error}");
        std::process::exit(error.exit_code());
    }
}
