mod cli;
mod commands;
mod demo;
mod infra;

use civic_prefill::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
