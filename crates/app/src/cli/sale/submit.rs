use std::path::PathBuf;

use caixa_app::{checkout::CheckoutSession, config::ApiConfig, context::AppContext};
use clap::Args;

use super::file::CartFile;

#[derive(Debug, Args)]
pub(crate) struct SubmitArgs {
    /// Path to the cart JSON file
    #[arg(long)]
    file: PathBuf,

    #[command(flatten)]
    api: ApiConfig,
}

pub(crate) async fn run(args: SubmitArgs) -> Result<(), String> {
    let cart_file = CartFile::load(&args.file)?;

    let mut session = CheckoutSession::begin(cart_file.build_cart()?);
    cart_file.apply_payments(session.cart_mut())?;

    let context = AppContext::from_config(&args.api);

    let sale = session
        .submit(context.sales.as_ref())
        .await
        .map_err(|error| format!("failed to register sale: {error}"))?;

    println!("sale_id: {}", sale.id);
    println!("sale_number: {}", sale.sale_number);

    if let Some(created_at) = sale.created_at {
        println!("created_at: {created_at}");
    }

    Ok(())
}
