#[tokio::main]
async fn main() {
    mentor_availability::run().await;
}
