//! Error handling utilities

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// A [`ProfitShareError`](crate::error::ProfitShareError) prints its user
/// message and exits with its category's code. With `verbose >= 1` the
/// full context chain follows. Anything else exits with 1.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::{describe_error_code, ProfitShareError};

    error!("Fatal error: {}", error);

    let exit_code = if let Some(app_err) = error.downcast_ref::<ProfitShareError>() {
        eprintln!("{}", app_err.user_message());

        if verbose >= 1 {
            eprintln!(
                "\nE{:04}: {}",
                app_err.code(),
                describe_error_code(app_err.code())
            );
            eprintln!("\nContext Chain:\n{}", app_err.developer_message());
        }

        app_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}
