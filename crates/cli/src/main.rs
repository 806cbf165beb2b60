use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    lanequote_cli::run().await
}
