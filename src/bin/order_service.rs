#[tokio::main]
async fn main() {
    if let Err(e) = contracthub::run(contracthub::Service::Orders).await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
