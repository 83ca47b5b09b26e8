#[tokio::main]
async fn main() {
    position_manager::start(std::env::args()).await;
}
