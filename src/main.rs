fn main() -> Result<(), eframe::Error> {
    // Set up logging; filter with RUST_LOG
    env_logger::init();

    // Run the editor
    patch_canvas::run_app()
}
