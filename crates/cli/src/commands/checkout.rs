//! Checkout command.

use tuhogar_storefront::checkout::{CheckoutOutcome, LineOutcome, checkout};

use crate::context::Context;

/// Run the checkout sequence and report per-line results.
pub async fn run(ctx: &mut Context) {
    if ctx.cart.is_empty() {
        println!("Your cart is empty - nothing to check out.");
        return;
    }

    let outcome = checkout(&mut ctx.cart, &ctx.session, &ctx.catalog).await;

    match outcome {
        CheckoutOutcome::RequiresLogin => {
            println!("Please log in first: tuhogar login <username> <password>");
        }
        CheckoutOutcome::Completed { lines } => {
            println!("Purchase complete - {} line(s) processed.", lines.len());
        }
        CheckoutOutcome::PartialFailure { lines } => {
            println!("Checkout did not finish; the remaining lines stay in your cart:");
            for line in &lines {
                let label = match &line.outcome {
                    LineOutcome::Committed => "ok".to_string(),
                    LineOutcome::Failed(reason) => format!("FAILED: {reason}"),
                    LineOutcome::NotAttempted => "not attempted".to_string(),
                };
                println!("  {:>6} x{:<3} {}", line.product_id, line.quantity, label);
            }
            println!("Run `tuhogar checkout` again to retry the unfinished lines.");
        }
    }
}
