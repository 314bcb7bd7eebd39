fn main() {
    if let Err(e) = token_carry::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
