fn main() {
    if let Err(err) = topowire::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
