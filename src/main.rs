fn main() -> Result<(), eframe::Error> {
    // Set up logging; RUST_LOG=card_carousel=debug shows gesture classification
    env_logger::init();

    // Run the carousel demo
    card_carousel::run_app()
}
