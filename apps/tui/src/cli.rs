use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "neighborhood-map",
    version,
    about = "Explore the neighborhood map from the terminal"
)]
pub struct CliArgs {
    /// Print the filtered listing and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless listing as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Load locations from a JSON file instead of the built-in catalog
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<String>,

    /// Directory that popup images are resolved against
    #[arg(long, value_name = "DIR")]
    pub assets: Option<String>,

    /// Interface language (en or ar)
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Start with a category filter (e.g. sport, coffeeshop)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Start with a search applied
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(path) = &self.catalog {
            std::env::set_var("CATALOG_PATH", path);
        }
        if let Some(dir) = &self.assets {
            std::env::set_var("ASSET_DIR", dir);
        }
        if let Some(code) = &self.lang {
            std::env::set_var("DEFAULT_LANGUAGE", code);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }
}
