mod cli;
mod infra;
mod journey;
mod routes;
mod server;

use confirmation_statement::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
