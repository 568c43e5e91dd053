use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::client::SortOrder;
use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "registrar", version, about = "Records admin panel for a REST backend")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

/// Settings that take precedence over the config file.
#[derive(Args, Debug, Default)]
pub struct Overrides {
    /// Config file (default: platform config dir/registrar/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. http://localhost:3000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Records per page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Entity to show first (students, courses, instructors, employees)
    #[arg(long, global = true)]
    pub entity: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Run the interactive terminal UI (default)
    Tui,
    /// Print one page of records as a text table
    List(ListArgs),
    /// Print the entity schemas
    Entities {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Field key to sort by
    #[arg(long)]
    pub sort: Option<String>,

    #[arg(long, value_enum, default_value_t = OrderArg::Asc, requires = "sort")]
    pub order: OrderArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.ui.page_size = page_size;
        }
        if let Some(entity) = &self.entity {
            config.ui.initial_entity = entity.clone();
        }
    }
}
