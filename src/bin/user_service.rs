#[tokio::main]
async fn main() {
    if let Err(e) = contracthub::run(contracthub::Service::Users).await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
