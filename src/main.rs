use std::net::SocketAddr;

mod cli;

#[tokio::main]
async fn main() {
    match cli::run() {
        cli::RunOutcome::Serve(config) => {
            let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
            println!("listening on http://{addr}");
            gridmap::serve(addr, config).await;
        }
        cli::RunOutcome::Exit(code) => std::process::exit(code),
    }
}
