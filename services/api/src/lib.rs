mod cli;
mod infra;
mod report;
mod routes;
mod server;

use net_benefit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
