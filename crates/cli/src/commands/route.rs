//! Route command handler.
//!
//! Shows the routing decision for a query without fetching anything,
//! useful for checking the keyword table against real phrasings.

use clap::Args;
use tributary_core::AppResult;
use tributary_pipeline::router::{keywords_for, route};

/// Show which sources a query would be routed to
#[derive(Args, Debug)]
pub struct RouteCommand {
    /// The query to route
    pub query: String,
}

impl RouteCommand {
    /// Execute the route command.
    pub fn execute(&self) -> AppResult<()> {
        let selected = route(&self.query);

        if selected.is_empty() {
            println!("no sources match");
            return Ok(());
        }

        for kind in selected {
            println!("{}  (keywords: {})", kind, keywords_for(kind).join(", "));
        }

        Ok(())
    }
}
