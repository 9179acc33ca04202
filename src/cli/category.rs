//! Category CLI commands

use clap::Subcommand;

use crate::error::FinTrackResult;
use crate::models::{Category, CategoryKind};

use super::AppContext;

#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Create {
        /// Category name
        name: String,
        /// Parent category (makes this a subcategory)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// List categories as a tree
    List,
    /// Delete a category (must have no budgets or subcategories)
    Delete {
        /// Category name or id
        category: String,
    },
}

pub fn handle_category_command(ctx: &mut AppContext, cmd: CategoryCommands) -> FinTrackResult<()> {
    match cmd {
        CategoryCommands::Create { name, parent } => {
            let category = match parent {
                Some(parent) => {
                    let parent_id = ctx.resolve_category(&parent)?;
                    Category::sub(name, parent_id)
                }
                None => Category::main(name),
            };
            let id = category.id;
            ctx.store.add_category(category)?;
            ctx.save()?;
            println!("Created category {}", id);
        }
        CategoryCommands::List => {
            let state = ctx.store.state();
            if state.categories.is_empty() {
                println!("No categories yet.");
                return Ok(());
            }
            for main in state
                .categories
                .iter()
                .filter(|c| c.kind == CategoryKind::Main)
            {
                println!("{}  {}", main.id, main.name);
                for sub in state
                    .categories
                    .iter()
                    .filter(|c| c.parent_id == Some(main.id))
                {
                    println!("  {}  {}", sub.id, sub.name);
                }
            }
        }
        CategoryCommands::Delete { category } => {
            let id = ctx.resolve_category(&category)?;
            ctx.store.mutate(|m| m.delete_category(id))?;
            ctx.save()?;
            println!("Deleted category {}", id);
        }
    }
    Ok(())
}
