#[tokio::main]
async fn main() {
    if let Err(e) = encounters_server::run().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
