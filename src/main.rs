mod app;
mod audio;
mod config;
mod constants;
mod logging;
mod visualizer;

fn main() {
    if let Err(e) = app::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
