// App module for the neighborhood map terminal UI
// Holds the controller plus the terminal-only state around it

pub mod assets;
pub mod input;
pub mod state;

pub use assets::DirectoryAssets;
pub use input::handle_input;
pub use state::{App, Focus};
