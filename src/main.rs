use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match medi_portal_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("medi-portal: {e}");
            ExitCode::FAILURE
        }
    }
}
