fn main() {
    if let Err(e) = kmlparse::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
