use clap::{Parser, Subcommand};

mod sale;

#[derive(Debug, Parser)]
#[command(name = "caixa-app", about = "Caixa checkout CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Sale(sale::SaleCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Sale(command) => sale::run(command).await,
        }
    }
}
