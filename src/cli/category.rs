//! Category CLI commands

use clap::Subcommand;
use tracing::debug;

use super::prompt::DialoguerConfirm;
use super::warn_if_stale;
use crate::backend::Backend;
use crate::display::format_category_list;
use crate::error::GastosResult;
use crate::models::CategoryId;
use crate::services::{AssumeYes, Confirm, Deletion, SyncController};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
    },

    /// Delete a category (expenses using it are kept)
    Delete {
        /// Category ID
        id: CategoryId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle a category command
pub async fn handle_category_command<B: Backend>(
    controller: &SyncController<B>,
    cmd: CategoryCommands,
) -> GastosResult<()> {
    let store = controller.categories();

    match cmd {
        CategoryCommands::List => {
            let categories = store.list().await?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create { name } => {
            let synced = store.create(&name).await?;
            warn_if_stale(&synced);
            match synced.into_value() {
                Some(category) => {
                    println!("Created category: {}", category.name);
                    println!("  ID: {}", category.id);
                }
                None => println!("Created category: {}", name),
            }
        }

        CategoryCommands::Delete { id, yes } => {
            // Only for the prompt text; without it the prompt shows the id
            if let Err(err) = store.list().await {
                debug!(error = %err, "category names unavailable for delete prompt");
            }

            let interactive = DialoguerConfirm::new();
            let confirm: &dyn Confirm = if yes { &AssumeYes } else { &interactive };

            match store.delete(id, confirm).await? {
                Deletion::Declined => println!("Delete cancelled."),
                Deletion::Deleted(synced) => {
                    warn_if_stale(&synced);
                    println!("Deleted category {}", synced.into_value());
                }
            }
        }
    }

    Ok(())
}
