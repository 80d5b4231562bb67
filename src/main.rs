fn main() {
    if let Err(err) = galaxy_svg::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
