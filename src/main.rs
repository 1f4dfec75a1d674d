fn main() {
    if let Err(e) = ironsegment::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
