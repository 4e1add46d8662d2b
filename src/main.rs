fn main() {
    env_logger::init();
    log::info!("PetPal starting up");

    if let Err(e) = petpal::app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
