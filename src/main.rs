#[tokio::main]
async fn main() {
    if let Err(e) = vidcore::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
