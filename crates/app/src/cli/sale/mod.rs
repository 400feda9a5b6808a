use clap::{Args, Subcommand};

mod file;
mod preview;
mod submit;

#[derive(Debug, Args)]
pub(crate) struct SaleCommand {
    #[command(subcommand)]
    command: SaleSubcommand,
}

#[derive(Debug, Subcommand)]
enum SaleSubcommand {
    /// Print the computed totals for a cart file without submitting
    Preview(preview::PreviewArgs),
    /// Submit a cart file as a sale to the backend
    Submit(submit::SubmitArgs),
}

pub(crate) async fn run(command: SaleCommand) -> Result<(), String> {
    match command.command {
        SaleSubcommand::Preview(args) => preview::run(&args),
        SaleSubcommand::Submit(args) => submit::run(args).await,
    }
}
