#[tokio::main]
async fn main() {
    if let Err(e) = hanekawa_server::start().await {
        eprintln!("hanekawa: {e}");
        std::process::exit(1);
    }
}
