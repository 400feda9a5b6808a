use std::path::PathBuf;

use caixa::amounts::format_money;
use clap::Args;

use super::file::CartFile;

#[derive(Debug, Args)]
pub(crate) struct PreviewArgs {
    /// Path to the cart JSON file
    #[arg(long)]
    file: PathBuf,
}

pub(crate) fn run(args: &PreviewArgs) -> Result<(), String> {
    let cart_file = CartFile::load(&args.file)?;

    let mut cart = cart_file.build_cart()?;
    cart_file.apply_payments(&mut cart)?;

    let subtotal = cart.subtotal().map_err(|error| error.to_string())?;
    let total = cart.total().map_err(|error| error.to_string())?;
    let total_paid = cart.total_paid().map_err(|error| error.to_string())?;
    let remaining = cart.fill_remaining().map_err(|error| error.to_string())?;
    let change = cart.change_due().map_err(|error| error.to_string())?;
    let finalizable = cart.can_finalize().map_err(|error| error.to_string())?;

    println!("items: {}", cart.len());
    println!("subtotal: {}", format_money(subtotal));
    println!("discount: {}", format_money(*cart.discount()));
    println!("total: {}", format_money(total));
    println!("paid: {}", format_money(total_paid));
    println!("remaining: {}", format_money(remaining));
    println!("change: {}", format_money(change));

    if let Some(method) = cart.primary_payment_method() {
        println!("payment_method: {method}");
    }

    println!("finalizable: {finalizable}");

    Ok(())
}
